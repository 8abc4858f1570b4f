//! Enemy motion, patrol reflection, the passive family AI and spawners.

use glam::Vec2;

use crate::api::events::{SimEvent, SoundCue};
use crate::api::types::EntityId;
use crate::components::enemy::{EnemyVariant, Motion};
use crate::components::entity::{EnemyState, Entity, Kind};
use crate::components::player::Player;
use crate::systems::effects::{Color, ParticlePool, ParticleSpawn, Rng};
use crate::systems::Frame;

/// Spawners fire for non-meteor variants only inside this band of |dx| to the player.
pub const SPAWN_NEAR: f32 = 100.0;
pub const SPAWN_FAR: f32 = 800.0;
/// Meteor spawners use a single, wider radius.
pub const METEOR_RADIUS: f32 = 1000.0;
/// Spawned enemies patrol this far either side of their spawner.
pub const SPAWN_PATROL_HALF: f32 = 400.0;

const FAMILY_NOTICE_DISTANCE: f32 = 50.0;
const FAMILY_GAP: f32 = 40.0;
const FAMILY_DEADZONE: f32 = 10.0;
const FAMILY_GAIN: f32 = 0.05;
const FAMILY_MAX_SPEED: f32 = 5.0;

/// Move one hostile enemy by its variant's rule, then reflect off patrol bounds.
/// `t_ms` is simulated time, the clock for every oscillation.
pub fn step_enemy(entity: &mut Entity, t_ms: f32) {
    let Kind::Enemy(state) = &mut entity.kind else {
        return;
    };
    let pos = &mut entity.pos;
    let vel = &mut entity.vel;

    match state.variant.motion() {
        Motion::Walk { speed_scale } => pos.x += vel.x * speed_scale,
        Motion::Hover { period_ms, amplitude, phase } => {
            pos.x += vel.x;
            pos.y += (t_ms / period_ms + phase).sin() * amplitude;
        }
        Motion::Dangle { period_ms, reach } => {
            pos.y = state.initial_y + (t_ms / period_ms).sin() * reach;
        }
        Motion::Ballistic => {
            *pos += *vel;
            return;
        }
        Motion::Follow => return,
    }

    reflect_patrol(state, pos.x, vel);
}

/// Point velocity back inside `[patrol_start, patrol_end]` once a bound is reached.
pub fn reflect_patrol(state: &EnemyState, x: f32, vel: &mut Vec2) {
    if let Some(end) = state.patrol_end {
        if x >= end {
            vel.x = -vel.x.abs();
        }
    }
    if let Some(start) = state.patrol_start {
        if x <= start {
            vel.x = vel.x.abs();
        }
    }
}

/// Whether a ballistic enemy is gone for good: fully past the left, right or
/// bottom level edge, or more than `cull_distance` from the camera and still
/// moving away from it. Other motions are never lost.
pub fn is_lost(entity: &Entity, camera_x: f32, cull_distance: f32, level_size: Vec2) -> bool {
    if !entity.enemy().is_some_and(|s| s.variant.motion() == Motion::Ballistic) {
        return false;
    }
    let (pos, size, vel) = (entity.pos, entity.size, entity.vel);
    if pos.x + size.x < 0.0 || pos.x > level_size.x || pos.y > level_size.y {
        return true;
    }
    let offset = pos.x - camera_x;
    offset.abs() > cull_distance && offset * vel.x > 0.0
}

/// Family members idle until the player comes close, then trail behind.
pub fn step_family(entity: &mut Entity, player: &Player, particles: &mut ParticlePool, frame: &mut Frame) {
    let near = entity.aabb().overlaps(&player.aabb())
        || (player.pos.x - entity.pos.x).abs() < FAMILY_NOTICE_DISTANCE;
    let id = entity.id;
    let heart_origin = Vec2::new(entity.pos.x + entity.size.x / 2.0, entity.pos.y);

    let Kind::Enemy(state) = &mut entity.kind else {
        return;
    };

    if !state.following {
        if near {
            state.following = true;
            particles.emit(5, |rng| {
                ParticleSpawn::at(heart_origin)
                    .with_vel(Vec2::new(rng.spread(1.0), -2.0))
                    .with_color(Color::HEART)
            });
            frame.play(SoundCue::Coin);
            frame.emit(SimEvent::FamilyJoined { id });
        }
        return;
    }

    let side = if player.facing_right { 1.0 } else { -1.0 };
    let target_x = player.pos.x - FAMILY_GAP * side - state.follow_offset * side;
    let dx = target_x - entity.pos.x;
    entity.vel.x = if dx.abs() > FAMILY_DEADZONE {
        (dx * FAMILY_GAIN).clamp(-FAMILY_MAX_SPEED, FAMILY_MAX_SPEED)
    } else {
        0.0
    };
    entity.pos.x += entity.vel.x;
    // stand on whatever the player stands on
    entity.pos.y = player.pos.y + player.size.y - entity.size.y;
}

/// A pending enemy, built during the entity pass and added after it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemySpawn {
    pub variant: EnemyVariant,
    pub pos: Vec2,
    pub vel: Vec2,
    pub patrol: Option<(f32, f32)>,
}

impl EnemySpawn {
    /// Lay out a new enemy at a spawner, with the variant's size, speed and
    /// health defaults and a random initial direction.
    pub fn at_spawner(variant: EnemyVariant, spawner: &Entity, rng: &mut Rng) -> Self {
        let profile = variant.profile();
        let dir = if rng.coin_flip() { 1.0 } else { -1.0 };
        let x = spawner.pos.x;
        let mut y = spawner.pos.y - profile.size.y + spawner.size.y;

        match variant {
            EnemyVariant::Ufo => y -= 100.0 + rng.next_f32() * 50.0,
            v if v.is_flyer() => y -= 100.0,
            EnemyVariant::Meteor => y = spawner.pos.y - 300.0 + rng.next_f32() * 400.0,
            _ => {}
        }

        let (vel, patrol) = match variant {
            EnemyVariant::Spider => (Vec2::ZERO, Some((x - SPAWN_PATROL_HALF, x + SPAWN_PATROL_HALF))),
            EnemyVariant::Meteor => (
                Vec2::new(-profile.speed - rng.next_f32() * 2.0, rng.spread(0.5)),
                None,
            ),
            _ => (
                Vec2::new(profile.speed * dir, 0.0),
                Some((x - SPAWN_PATROL_HALF, x + SPAWN_PATROL_HALF)),
            ),
        };

        Self { variant, pos: Vec2::new(x, y), vel, patrol }
    }

    pub fn into_entity(self, id: EntityId) -> Entity {
        let mut state = EnemyState::new(self.variant, self.pos.y);
        if let Some((start, end)) = self.patrol {
            state = state.with_patrol(start, end);
        }
        Entity::new(id, Kind::Enemy(state))
            .with_tag(format!("spawned_{}", id.0))
            .with_pos(self.pos)
            .with_size(self.variant.profile().size)
            .with_vel(self.vel)
    }
}

/// Advance a spawner's counter and, once it is due and the player is in range,
/// plan one enemy. A due spawner keeps waiting while the player is out of range.
pub fn step_spawner(spawner: &mut Entity, player_x: f32, rng: &mut Rng, frame: &mut Frame) -> Option<EnemySpawn> {
    let Kind::Spawner(state) = &mut spawner.kind else {
        return None;
    };
    if state.cooldown_frames == 0 {
        return None;
    }
    state.frames_since_spawn = state.frames_since_spawn.saturating_add(1);
    if state.frames_since_spawn < state.cooldown_frames {
        return None;
    }

    let dist = (spawner.pos.x - player_x).abs();
    let variant = state.variant;
    let in_range = if variant == EnemyVariant::Meteor {
        dist < METEOR_RADIUS
    } else {
        dist > SPAWN_NEAR && dist < SPAWN_FAR
    };
    if !in_range {
        return None;
    }

    state.frames_since_spawn = 0;
    let spawn = EnemySpawn::at_spawner(variant, spawner, rng);
    if variant != EnemyVariant::Meteor {
        frame.play(SoundCue::Roar);
    }
    log::debug!("spawner {:?} produced {:?} at {:?}", spawner.id, variant, spawn.pos);
    Some(spawn)
}
