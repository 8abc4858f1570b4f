//! Player controller: input-driven physics for both movement modes, the
//! forgiveness timers and the damage/respawn rules.

use glam::Vec2;

use crate::api::config::SimConfig;
use crate::api::events::{DamageCause, SimEvent, SoundCue};
use crate::components::player::{MovementMode, Player};
use crate::input::snapshot::InputSnapshot;
use crate::systems::Frame;

/// Landing faster than this squashes harder and shakes the camera.
const HARD_LANDING_SPEED: f32 = 10.0;
const HARD_LANDING_SHAKE: f32 = 3.0;
const DAMAGE_SHAKE: f32 = 15.0;

const JUMP_STRETCH: Vec2 = Vec2::new(0.8, 1.25);
const LAND_SQUASH: Vec2 = Vec2::new(1.15, 0.85);
const HARD_LAND_SQUASH: Vec2 = Vec2::new(1.3, 0.7);
const SCALE_RECOVERY: f32 = 0.2;

/// Count down the status timers that tick regardless of movement mode.
pub fn tick_timers(player: &mut Player) {
    player.buff_frames = player.buff_frames.saturating_sub(1);
    player.jump_buffer_frames = player.jump_buffer_frames.saturating_sub(1);
    player.attack_frames = player.attack_frames.saturating_sub(1);
    player.shoot_cooldown_frames = player.shoot_cooldown_frames.saturating_sub(1);
}

/// Turn this tick's intent into velocity. Position is integrated by the
/// terrain sweep afterwards.
pub fn drive(player: &mut Player, input: &InputSnapshot, mode: MovementMode, config: &SimConfig, frame: &mut Frame) {
    let pressed = input.jump && !player.jump_was_held;
    player.jump_was_held = input.jump;

    match mode {
        MovementMode::FreeFly => drive_free_fly(player, input, config),
        MovementMode::Platform => drive_platform(player, input, pressed, config, frame),
    }
}

fn steer(player: &mut Player, input: &InputSnapshot, accel: f32) -> bool {
    let dir = input.horizontal();
    if dir == 0.0 {
        return false;
    }
    player.vel.x += dir * accel;
    player.facing_right = dir > 0.0;
    true
}

fn drive_free_fly(player: &mut Player, input: &InputSnapshot, config: &SimConfig) {
    steer(player, input, config.acceleration);
    if input.jump {
        player.vel.y -= config.acceleration;
    } else if input.down {
        player.vel.y += config.acceleration;
    }

    player.vel *= config.water_drag;
    let cap = Vec2::splat(config.swim_speed);
    player.vel = player.vel.clamp(-cap, cap);
    player.grounded = false;
    player.coyote_frames = 0;
}

fn drive_platform(
    player: &mut Player,
    input: &InputSnapshot,
    jump_pressed: bool,
    config: &SimConfig,
    frame: &mut Frame,
) {
    let (max_speed, jump_force) = if player.is_buffed() {
        (
            config.move_speed * config.buff_speed_multiplier,
            config.jump_force * config.buff_jump_multiplier,
        )
    } else {
        (config.move_speed, config.jump_force)
    };

    if !steer(player, input, config.acceleration) {
        let friction = if player.grounded { config.ground_friction } else { config.air_friction };
        player.vel.x *= friction;
        if player.vel.x.abs() < config.stop_threshold {
            player.vel.x = 0.0;
        }
    }
    player.vel.x = player.vel.x.clamp(-max_speed, max_speed);

    if player.grounded {
        player.coyote_frames = config.coyote_frames;
    } else {
        player.coyote_frames = player.coyote_frames.saturating_sub(1);
    }
    if jump_pressed {
        player.jump_buffer_frames = config.jump_buffer_frames;
    }

    // the single jump trigger
    if player.jump_buffer_frames > 0 && player.coyote_frames > 0 {
        player.vel.y = jump_force;
        player.grounded = false;
        player.coyote_frames = 0;
        player.jump_buffer_frames = 0;
        player.render_scale = JUMP_STRETCH;
        frame.play(SoundCue::Jump);
    }

    if player.vel.y < 0.0 && !input.jump {
        player.vel.y *= config.jump_cut;
    }

    player.vel.y = (player.vel.y + config.gravity).min(config.terminal_velocity);
}

/// Landing feedback. `impact` is the downward speed just before contact.
/// Only platform mode lands; free-fly bumps into floors silently.
pub fn land(player: &mut Player, impact: f32, mode: MovementMode, frame: &mut Frame) {
    if mode != MovementMode::Platform || player.grounded {
        return;
    }
    if impact >= HARD_LANDING_SPEED {
        player.render_scale = HARD_LAND_SQUASH;
        frame.shake(HARD_LANDING_SHAKE);
    } else if impact > 2.0 {
        player.render_scale = LAND_SQUASH;
    }
}

pub fn ease_render_scale(player: &mut Player) {
    player.render_scale += (Vec2::ONE - player.render_scale) * SCALE_RECOVERY;
    if (player.render_scale - Vec2::ONE).abs().max_element() < 1e-3 {
        player.render_scale = Vec2::ONE;
    }
}

pub fn tick_invulnerability(player: &mut Player) {
    player.invulnerable_frames = player.invulnerable_frames.saturating_sub(1);
}

/// Hurt the player unless invulnerable. Returns whether damage was applied.
pub fn damage(player: &mut Player, cause: DamageCause, config: &SimConfig, frame: &mut Frame) -> bool {
    if player.is_invulnerable() {
        return false;
    }
    player.invulnerable_frames = config.hit_invulnerable_frames;
    player.vel.y = config.knockback_y;
    player.vel.x = if player.facing_right { -config.knockback_x } else { config.knockback_x };
    frame.emit(SimEvent::PlayerDamaged { cause });
    frame.play(SoundCue::Damage);
    frame.shake(DAMAGE_SHAKE);
    true
}

/// Outcome of the lower-boundary check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Inside,
    /// Free-fly: pushed back up, no penalty.
    Bounced,
    /// Platform: moved to the checkpoint.
    Respawned,
    /// Platform with no checkpoint.
    Fatal,
}

/// Check the lower world boundary and apply the mode's rule.
pub fn check_fall(
    player: &mut Player,
    mode: MovementMode,
    level_height: f32,
    checkpoint: Option<Vec2>,
    config: &SimConfig,
    frame: &mut Frame,
) -> Boundary {
    match mode {
        MovementMode::FreeFly => {
            let limit = level_height + config.free_fly_fall_margin;
            if player.pos.y <= limit {
                return Boundary::Inside;
            }
            player.pos.y = limit - 10.0;
            player.vel.y = -1.0;
            Boundary::Bounced
        }
        MovementMode::Platform => {
            if player.pos.y <= level_height + config.fall_margin {
                return Boundary::Inside;
            }
            match checkpoint {
                Some(at) => {
                    player.respawn_at(at, config.hit_invulnerable_frames);
                    frame.emit(SimEvent::PlayerDamaged { cause: DamageCause::Fall });
                    frame.play(SoundCue::Damage);
                    frame.shake(DAMAGE_SHAKE);
                    Boundary::Respawned
                }
                None => {
                    frame.emit(SimEvent::Fatal);
                    Boundary::Fatal
                }
            }
        }
    }
}
