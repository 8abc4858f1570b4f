use crate::api::config::SimConfig;

/// Side-scrolling camera: world-space left edge plus an impulse shake.
///
/// Only the X axis scrolls; levels are one viewport tall.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    /// World-space left edge of the viewport.
    pub x: f32,
    /// Current shake magnitude in world units. Renderers jitter by up to half of it.
    pub shake: f32,
    /// Smoothed facing bias added to the follow target.
    pub look_ahead: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ease toward the player, biased in the facing direction, then clamp to the level.
    pub fn follow(&mut self, player_x: f32, facing_right: bool, level_width: f32, config: &SimConfig) {
        let bias = if facing_right {
            config.look_ahead_forward
        } else {
            -config.look_ahead_back
        };
        self.look_ahead += (bias - self.look_ahead) * config.look_ahead_lerp;

        let target = player_x - config.viewport_width * config.camera_anchor + self.look_ahead;
        self.x += (target - self.x) * config.camera_lerp;
        self.clamp_to(level_width, config.viewport_width);
    }

    /// Jump straight to the resting position for a player, e.g. after a respawn.
    pub fn snap_to(&mut self, player_x: f32, level_width: f32, config: &SimConfig) {
        self.look_ahead = 0.0;
        self.x = player_x - config.viewport_width * config.camera_anchor;
        self.clamp_to(level_width, config.viewport_width);
    }

    fn clamp_to(&mut self, level_width: f32, viewport_width: f32) {
        // levels narrower than the viewport pin to 0
        let max_x = (level_width - viewport_width).max(0.0);
        self.x = self.x.clamp(0.0, max_x);
    }

    /// Request a shake. Replaces whatever magnitude is currently decaying.
    pub fn shake(&mut self, magnitude: f32) {
        self.shake = magnitude.max(0.0);
    }

    /// Geometric decay, floored to exactly zero below the epsilon.
    pub fn decay_shake(&mut self, config: &SimConfig) {
        if self.shake > 0.0 {
            self.shake *= config.shake_decay;
            if self.shake < config.shake_epsilon {
                self.shake = 0.0;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Camera::default();
    }
}
