//! Transient visual effects: a fixed-capacity particle pool.
//!
//! Slots are allocated once. A spawn request on a full pool is dropped on the
//! floor; frame time stays flat no matter how many effects are requested.

mod color;
mod particle;
mod rng;

pub use color::Color;
pub use particle::{Fate, Particle, ParticleEnv, ParticleSpawn};
pub use rng::Rng;

use glam::Vec2;

pub struct ParticlePool {
    slots: Vec<Particle>,
    active: usize,
    rng: Rng,
}

impl ParticlePool {
    pub const DEFAULT_CAPACITY: usize = 300;

    /// Create a pool with the given slot count and RNG seed.
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self {
            slots: vec![Particle::default(); capacity],
            active: 0,
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Activate the first free slot. Returns false (and does nothing) when saturated.
    pub fn spawn(&mut self, spawn: ParticleSpawn) -> bool {
        if self.active == self.slots.len() {
            return false;
        }
        match self.slots.iter_mut().find(|p| !p.active) {
            Some(slot) => {
                slot.activate(spawn);
                self.active += 1;
                true
            }
            None => false,
        }
    }

    /// Spawn `count` particles built by `make`, which gets the pool's RNG.
    /// Stops silently once the pool is full.
    pub fn emit(&mut self, count: usize, mut make: impl FnMut(&mut Rng) -> ParticleSpawn) {
        for _ in 0..count {
            let spawn = make(&mut self.rng);
            if !self.spawn(spawn) {
                break;
            }
        }
    }

    /// Advance every active particle and recycle the finished ones.
    pub fn tick(&mut self, env: &ParticleEnv) {
        for p in self.slots.iter_mut().filter(|p| p.active) {
            match p.advance(env) {
                Fate::Alive => {}
                Fate::Expired => {
                    p.active = false;
                    self.active -= 1;
                }
                Fate::Wrap => {
                    p.pos.y = -10.0;
                    p.pos.x = if p.screen_space {
                        self.rng.next_f32() * env.viewport.x
                    } else {
                        env.camera_x + self.rng.next_f32() * env.viewport.x - 100.0
                    };
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|p| p.active)
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Deactivate every slot. Capacity is kept.
    pub fn clear(&mut self) {
        for p in &mut self.slots {
            p.active = false;
        }
        self.active = 0;
    }

    /// Radial-ish burst of fading sparks around `center`.
    pub fn burst(&mut self, center: Vec2, count: usize, speed: f32, colors: &[Color]) {
        self.emit(count, |rng| {
            let color = if colors.is_empty() {
                Color::WHITE
            } else {
                colors[rng.next_int(colors.len() as u32) as usize]
            };
            ParticleSpawn::at(center)
                .with_vel(Vec2::new(rng.spread(speed), rng.spread(speed)))
                .with_size(rng.range(4.0, 10.0))
                .with_color(color)
        });
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY, 42)
    }
}
