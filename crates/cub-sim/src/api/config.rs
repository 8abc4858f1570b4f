use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A config that parsed but cannot drive a simulation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("fixed_dt must be a positive number of seconds, got {0}")]
    BadTimestep(f32),

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Every tunable of the simulation, in per-tick units (one tick = one 60 Hz frame).
///
/// `Default` reproduces the shipped feel. Hosts may override any subset from JSON:
/// missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed timestep in seconds the host should step at (default: 1/60).
    pub fixed_dt: f32,
    /// Visible width in world units.
    pub viewport_width: f32,
    /// Visible height in world units. Also the bottom edge for ambient particles.
    pub viewport_height: f32,

    // -- platform physics --
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub move_speed: f32,
    pub acceleration: f32,
    pub ground_friction: f32,
    pub air_friction: f32,
    /// Horizontal speeds below this snap to zero when coasting.
    pub stop_threshold: f32,
    /// Negative is up.
    pub jump_force: f32,
    /// Applied to upward velocity each tick the jump input is released.
    pub jump_cut: f32,
    pub coyote_frames: u32,
    pub jump_buffer_frames: u32,

    // -- free-fly physics --
    pub swim_speed: f32,
    pub water_drag: f32,

    // -- combat --
    pub projectile_speed: f32,
    pub projectile_size: f32,
    pub projectile_damage: i32,
    /// Projectiles farther than viewport width plus this from the camera are culled.
    pub projectile_cull_margin: f32,
    pub shoot_cooldown_frames: u32,
    pub attack_pose_frames: u32,
    pub knockback_x: f32,
    pub knockback_y: f32,
    pub projectile_knockback: f32,
    pub hit_stop_frames: u32,

    // -- status effects --
    pub buff_frames: u32,
    pub buff_speed_multiplier: f32,
    pub buff_jump_multiplier: f32,
    pub spawn_invulnerable_frames: u32,
    pub hit_invulnerable_frames: u32,

    // -- world --
    /// Platform levels: falling this far below the level height is out of bounds.
    pub fall_margin: f32,
    /// Free-fly levels: the lower boundary the player bounces off.
    pub free_fly_fall_margin: f32,
    /// Ticks a dead entity stays readable (for fade-outs) before it is purged.
    pub corpse_frames: u32,
    pub particle_capacity: usize,
    pub seed: u64,

    // -- camera --
    /// Fraction of the viewport kept to the left of the player.
    pub camera_anchor: f32,
    pub camera_lerp: f32,
    pub look_ahead_forward: f32,
    pub look_ahead_back: f32,
    pub look_ahead_lerp: f32,
    pub shake_decay: f32,
    pub shake_epsilon: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            viewport_width: 800.0,
            viewport_height: 450.0,

            gravity: 0.6,
            terminal_velocity: 12.0,
            move_speed: 6.0,
            acceleration: 0.8,
            ground_friction: 0.82,
            air_friction: 0.95,
            stop_threshold: 0.1,
            jump_force: -14.0,
            jump_cut: 0.5,
            coyote_frames: 6,
            jump_buffer_frames: 5,

            swim_speed: 5.0,
            water_drag: 0.92,

            projectile_speed: 12.0,
            projectile_size: 8.0,
            projectile_damage: 1,
            projectile_cull_margin: 100.0,
            shoot_cooldown_frames: 20,
            attack_pose_frames: 10,
            knockback_x: 4.0,
            knockback_y: -6.0,
            projectile_knockback: 5.0,
            hit_stop_frames: 4,

            buff_frames: 600,
            buff_speed_multiplier: 1.4,
            buff_jump_multiplier: 1.2,
            spawn_invulnerable_frames: 60,
            hit_invulnerable_frames: 120,

            fall_margin: 100.0,
            free_fly_fall_margin: 200.0,
            corpse_frames: 30,
            particle_capacity: 300,
            seed: 42,

            camera_anchor: 1.0 / 3.0,
            camera_lerp: 0.05,
            look_ahead_forward: 100.0,
            look_ahead_back: 50.0,
            look_ahead_lerp: 0.1,
            shake_decay: 0.9,
            shake_epsilon: 0.5,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fixed_dt.is_finite() || self.fixed_dt <= 0.0 {
            return Err(ConfigError::BadTimestep(self.fixed_dt));
        }
        Ok(())
    }

    /// Fixed timestep in milliseconds, the clock used by time-keyed motion.
    pub fn frame_ms(&self) -> f32 {
        self.fixed_dt * 1000.0
    }
}
