use glam::Vec2;

use crate::api::config::SimConfig;
use crate::api::events::{KillCause, SimEvent, SoundCue};
use crate::components::entity::{Entity, Kind};
use crate::components::player::Player;
use crate::core::world::World;
use crate::input::snapshot::InputSnapshot;
use crate::systems::effects::{Color, ParticlePool, ParticleSpawn};
use crate::systems::Frame;

const FIRE_SHAKE: f32 = 2.0;
const HIT_SHAKE: f32 = 2.0;
const KILL_SHAKE: f32 = 10.0;
const WALL_BREAK_SHAKE: f32 = 5.0;
const WALL_DEBRIS: usize = 5;

/// Spawn a projectile if the fire intent is held and the cooldown has run out.
pub fn fire(
    player: &mut Player,
    input: &InputSnapshot,
    ranged_allowed: bool,
    world: &mut World,
    config: &SimConfig,
    frame: &mut Frame,
) -> bool {
    if !ranged_allowed || !input.fire || player.shoot_cooldown_frames > 0 {
        return false;
    }

    player.shoot_cooldown_frames = if player.is_buffed() {
        config.shoot_cooldown_frames / 2
    } else {
        config.shoot_cooldown_frames
    };
    player.attack_frames = config.attack_pose_frames;

    let size = config.projectile_size;
    let (x, vx) = if player.facing_right {
        (player.pos.x + player.size.x, config.projectile_speed)
    } else {
        (player.pos.x - size, -config.projectile_speed)
    };
    let y = player.pos.y + player.size.y / 2.0 - size / 2.0;

    let id = world.next_id();
    world.spawn_projectile(
        Entity::new(id, Kind::Projectile)
            .with_tag("projectile")
            .with_pos(Vec2::new(x, y))
            .with_size(Vec2::splat(size))
            .with_vel(Vec2::new(vx, 0.0)),
    );
    frame.play(SoundCue::Shoot);
    frame.shake(FIRE_SHAKE);
    true
}

/// Which target a projectile struck this tick.
enum Hit {
    Enemy(usize),
    Terrain,
    Wall(usize),
}

fn first_hit(projectile: &Entity, entities: &[Entity]) -> Option<Hit> {
    let body = projectile.aabb();
    let touching = |e: &&Entity| e.is_alive() && e.aabb().overlaps(&body);

    if let Some(i) = entities.iter().position(|e| e.is_hostile_enemy() && touching(&e)) {
        return Some(Hit::Enemy(i));
    }
    if entities.iter().filter(|e| matches!(e.kind, Kind::Platform)).any(|e| touching(&e)) {
        return Some(Hit::Terrain);
    }
    entities
        .iter()
        .position(|e| matches!(e.kind, Kind::BreakableWall) && touching(&e))
        .map(Hit::Wall)
}

/// Advance, cull and resolve every live projectile. A projectile that hits
/// anything is removed the same tick.
pub fn step_projectiles(
    world: &mut World,
    camera_x: f32,
    walls_breakable: bool,
    config: &SimConfig,
    particles: &mut ParticlePool,
    frame: &mut Frame,
) {
    let cull_distance = config.viewport_width + config.projectile_cull_margin;
    let (entities, projectiles) = world.split_mut();

    projectiles.retain_mut(|p| {
        p.pos.x += p.vel.x;
        if (p.pos.x - camera_x).abs() > cull_distance {
            return false;
        }

        match first_hit(p, entities) {
            None => true,
            Some(Hit::Terrain) => false,
            Some(Hit::Enemy(i)) => {
                strike_enemy(&mut entities[i], p.vel.x, config, frame);
                false
            }
            Some(Hit::Wall(i)) => {
                if walls_breakable {
                    break_wall(&mut entities[i], particles, frame);
                }
                false
            }
        }
    });
}

fn strike_enemy(target: &mut Entity, travel_x: f32, config: &SimConfig, frame: &mut Frame) {
    let id = target.id;
    debug_assert!(!target.dead, "projectile reached dead entity {id:?}");
    if target.dead {
        log::warn!("projectile reached dead entity {id:?}, ignoring");
        return;
    }
    let Some(state) = target.enemy_mut() else {
        return;
    };
    debug_assert!(state.health >= 0, "entity {id:?} has negative health {}", state.health);
    if state.health < 0 {
        log::warn!("entity {id:?} had negative health {} before the hit", state.health);
    }
    state.health -= config.projectile_damage;
    let variant = state.variant;
    let health_left = state.health.max(0);

    if health_left == 0 {
        state.health = 0;
        target.kill();
        let points = variant.kill_bonus();
        frame.emit(SimEvent::EnemyKilled { id, points, cause: KillCause::Projectile });
        frame.play(SoundCue::Kill);
        frame.shake(KILL_SHAKE);
        frame.freeze(config.hit_stop_frames);
    } else {
        let nudge = if travel_x > 0.0 { config.projectile_knockback } else { -config.projectile_knockback };
        target.pos.x += nudge;
        frame.emit(SimEvent::EnemyHit { id, health_left });
        frame.play(SoundCue::Damage);
        frame.shake(HIT_SHAKE);
    }
}

fn break_wall(wall: &mut Entity, particles: &mut ParticlePool, frame: &mut Frame) {
    wall.kill();
    let (origin, extent) = (wall.pos, wall.size);
    particles.emit(WALL_DEBRIS, |rng| {
        ParticleSpawn::at(origin + Vec2::new(rng.next_f32() * extent.x, rng.next_f32() * extent.y))
            .with_vel(Vec2::new(rng.spread(2.5), rng.spread(2.5)))
            .with_color(Color::SAND_WALL)
    });
    frame.emit(SimEvent::WallDestroyed { id: wall.id });
    frame.play(SoundCue::Dig);
    frame.shake(WALL_BREAK_SHAKE);
}
