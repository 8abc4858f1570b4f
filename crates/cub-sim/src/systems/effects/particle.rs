//! A single pooled particle and its per-tick rules.

use glam::Vec2;

use super::color::Color;

/// What the pool should do with a particle after it advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Alive,
    Expired,
    /// Fell past the bottom; re-enter at the top.
    Wrap,
}

/// Per-tick environment the particle rules depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleEnv {
    pub camera_x: f32,
    pub viewport: Vec2,
    /// Weather recycles falling particles instead of dropping them.
    pub wrap: bool,
    /// Underwater: ambient particles die above the top and never fall out.
    pub pop_at_top: bool,
    /// Drop world-space particles this far behind the camera's left edge.
    pub trail_cull: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Particle {
    pub active: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Unitless decay counter, doubles as alpha.
    pub life: f32,
    pub color: Option<Color>,
    /// Positioned relative to the camera rather than the world.
    pub screen_space: bool,
}

/// Activation parameters for one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpawn {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: f32,
    pub color: Option<Color>,
    pub screen_space: bool,
}

impl ParticleSpawn {
    pub fn at(pos: Vec2) -> Self {
        Self { pos, vel: Vec2::ZERO, size: 3.0, life: 1.0, color: None, screen_space: false }
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_life(mut self, life: f32) -> Self {
        self.life = life;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn in_screen_space(mut self) -> Self {
        self.screen_space = true;
        self
    }
}

impl Particle {
    pub const DECAY: f32 = 0.05;
    pub const SHRINK: f32 = 0.95;

    pub fn activate(&mut self, spawn: ParticleSpawn) {
        *self = Particle {
            active: true,
            pos: spawn.pos,
            vel: spawn.vel,
            size: spawn.size,
            life: spawn.life,
            color: spawn.color,
            screen_space: spawn.screen_space,
        };
    }

    /// Tinted, non-ambient particles decay; untinted and ambient ones persist.
    pub fn fades(&self) -> bool {
        self.color.map_or(false, |c| !c.is_ambient())
    }

    pub fn advance(&mut self, env: &ParticleEnv) -> Fate {
        self.pos += self.vel;

        let fades = self.fades();
        if fades {
            self.life -= Self::DECAY;
            self.size *= Self::SHRINK;
        } else if env.pop_at_top && self.pos.y < 0.0 {
            return Fate::Expired;
        }

        if self.pos.y > env.viewport.y && !env.pop_at_top {
            return if self.screen_space || env.wrap { Fate::Wrap } else { Fate::Expired };
        }
        if fades && self.life <= 0.0 {
            return Fate::Expired;
        }
        if let Some(margin) = env.trail_cull {
            if !self.screen_space && self.pos.x < env.camera_x - margin {
                return Fate::Expired;
            }
        }
        Fate::Alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> ParticleEnv {
        ParticleEnv {
            camera_x: 0.0,
            viewport: Vec2::new(800.0, 450.0),
            wrap: false,
            pop_at_top: false,
            trail_cull: None,
        }
    }

    fn live(spawn: ParticleSpawn) -> Particle {
        let mut p = Particle::default();
        p.activate(spawn);
        p
    }

    #[test]
    fn tinted_particle_decays_and_expires() {
        let mut p = live(
            ParticleSpawn::at(Vec2::new(10.0, 10.0)).with_life(0.1).with_color(Color::EMBER_RED),
        );
        assert_eq!(p.advance(&env()), Fate::Alive);
        assert!(p.size < 3.0);
        assert_eq!(p.advance(&env()), Fate::Expired);
    }

    #[test]
    fn untinted_particle_never_decays() {
        let mut p = live(ParticleSpawn::at(Vec2::new(10.0, 10.0)).with_life(0.01));
        for _ in 0..100 {
            assert_eq!(p.advance(&env()), Fate::Alive);
        }
        assert_eq!(p.life, 0.01);
    }

    #[test]
    fn falling_world_particle_expires_without_wrap() {
        let mut p = live(ParticleSpawn::at(Vec2::new(10.0, 449.0)).with_vel(Vec2::new(0.0, 5.0)));
        assert_eq!(p.advance(&env()), Fate::Expired);
    }

    #[test]
    fn falling_screen_particle_wraps() {
        let mut p = live(
            ParticleSpawn::at(Vec2::new(10.0, 449.0))
                .with_vel(Vec2::new(0.0, 5.0))
                .in_screen_space(),
        );
        assert_eq!(p.advance(&env()), Fate::Wrap);
    }

    #[test]
    fn bubbles_pop_above_the_surface() {
        let mut e = env();
        e.pop_at_top = true;
        let mut p = live(
            ParticleSpawn::at(Vec2::new(10.0, 0.5))
                .with_vel(Vec2::new(0.0, -1.0))
                .with_color(Color::BUBBLE),
        );
        assert_eq!(p.advance(&e), Fate::Expired);
    }

    #[test]
    fn trail_particles_culled_behind_camera() {
        let mut e = env();
        e.camera_x = 500.0;
        e.trail_cull = Some(100.0);
        let mut p = live(
            ParticleSpawn::at(Vec2::new(405.0, 100.0))
                .with_vel(Vec2::new(-10.0, 0.0))
                .with_color(Color::SPEED_LINE),
        );
        assert_eq!(p.advance(&e), Fate::Expired);
    }
}
