use glam::Vec2;

use crate::api::config::SimConfig;
use crate::core::geometry::Aabb;

pub const PLAYER_SIZE: Vec2 = Vec2::new(30.0, 30.0);

/// Movement model, chosen per level from its weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementMode {
    Platform,
    FreeFly,
}

/// The controller's observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Grounded,
    Airborne,
    FreeFly,
}

/// The singleton player. All timers count whole ticks down to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub grounded: bool,
    pub facing_right: bool,
    pub invulnerable_frames: u32,
    pub shoot_cooldown_frames: u32,
    pub buff_frames: u32,
    pub coyote_frames: u32,
    pub jump_buffer_frames: u32,
    pub attack_frames: u32,
    /// Squash/stretch hint for renderers, eased back to (1, 1).
    pub render_scale: Vec2,
    /// Jump input level on the previous simulated tick, for edge detection.
    pub(crate) jump_was_held: bool,
}

impl Player {
    /// Fresh player at a spawn point with the short spawn invulnerability.
    pub fn spawn(at: Vec2, config: &SimConfig) -> Self {
        Self {
            pos: at,
            size: PLAYER_SIZE,
            vel: Vec2::ZERO,
            grounded: false,
            facing_right: true,
            invulnerable_frames: config.spawn_invulnerable_frames,
            shoot_cooldown_frames: 0,
            buff_frames: 0,
            coyote_frames: 0,
            jump_buffer_frames: 0,
            attack_frames: 0,
            render_scale: Vec2::ONE,
            jump_was_held: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_frames > 0
    }

    pub fn is_buffed(&self) -> bool {
        self.buff_frames > 0
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_frames > 0
    }

    pub fn state(&self, mode: MovementMode) -> MotionState {
        match mode {
            MovementMode::FreeFly => MotionState::FreeFly,
            MovementMode::Platform if self.grounded => MotionState::Grounded,
            MovementMode::Platform => MotionState::Airborne,
        }
    }

    /// Whether a flickering sprite is drawn this frame.
    pub fn visible_on(&self, frame: u64) -> bool {
        !self.is_invulnerable() || (frame / 4) % 2 == 0
    }

    /// Put the player back at a point with zero velocity and fresh timers.
    pub fn respawn_at(&mut self, at: Vec2, invulnerable_frames: u32) {
        self.pos = at;
        self.vel = Vec2::ZERO;
        self.grounded = false;
        self.coyote_frames = 0;
        self.jump_buffer_frames = 0;
        self.invulnerable_frames = invulnerable_frames;
        self.render_scale = Vec2::ONE;
    }
}
