//! Player-vs-entity contact rules: pickups, hazards, goals, checkpoints and
//! enemy contact (stomp or take damage).

use glam::Vec2;

use crate::api::config::SimConfig;
use crate::api::events::{DamageCause, KillCause, PickupKind, SimEvent, SoundCue};
use crate::components::entity::{Entity, Kind};
use crate::components::player::{MovementMode, Player};
use crate::systems::effects::{Color, ParticlePool, ParticleSpawn};
use crate::systems::{player as controller, Frame};

pub const COIN_POINTS: u32 = 100;
pub const WINE_POINTS: u32 = 500;
pub const STOMP_POINTS: u32 = 200;

/// Fraction of an enemy's height the player's feet must stay above for a stomp.
const STOMP_DEPTH: f32 = 0.7;
const STOMP_SHAKE: f32 = 5.0;

/// Per-level progress the contact rules write to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    /// Position of the last activated checkpoint.
    pub checkpoint: Option<Vec2>,
    pub complete: bool,
}

/// Resolve contact between the player and one live entity, if they overlap.
pub fn touch(
    entity: &mut Entity,
    player: &mut Player,
    mode: MovementMode,
    progress: &mut Progress,
    config: &SimConfig,
    particles: &mut ParticlePool,
    frame: &mut Frame,
) {
    debug_assert!(!entity.dead, "contact pass reached dead entity {:?}", entity.id);
    if entity.dead {
        log::warn!("contact pass reached dead entity {:?}, ignoring", entity.id);
        return;
    }
    if !entity.aabb().overlaps(&player.aabb()) {
        return;
    }

    match &mut entity.kind {
        Kind::Coin => {
            entity.kill();
            frame.emit(SimEvent::Pickup { kind: PickupKind::Coin, points: COIN_POINTS, coins: 1 });
            frame.play(SoundCue::Coin);
        }
        Kind::Wine => {
            entity.kill();
            player.buff_frames = config.buff_frames;
            particles.burst(player.aabb().center(), 20, 7.5, &[Color::EMBER_RED, Color::EMBER_AMBER]);
            frame.emit(SimEvent::Pickup { kind: PickupKind::Wine, points: WINE_POINTS, coins: 0 });
            frame.play(SoundCue::PowerUp);
        }
        Kind::Potion => {
            entity.kill();
            let center = entity.aabb().center();
            particles.emit(15, |rng| {
                ParticleSpawn::at(center)
                    .with_vel(Vec2::new(rng.spread(2.0), -2.0 - rng.next_f32() * 4.0))
                    .with_size(rng.range(2.0, 6.0))
                    .with_life(1.5)
                    .with_color(Color::HEART)
            });
            frame.emit(SimEvent::Pickup { kind: PickupKind::Potion, points: 0, coins: 0 });
            frame.play(SoundCue::Heal);
        }
        Kind::Flag | Kind::Trophy => {
            if !progress.complete {
                progress.complete = true;
                log::debug!("level complete via {:?}", entity.id);
                frame.emit(SimEvent::LevelComplete);
                frame.play(SoundCue::Win);
            }
        }
        Kind::Spike => {
            controller::damage(player, DamageCause::Spike, config, frame);
        }
        Kind::Checkpoint { activated } => {
            if !*activated {
                *activated = true;
                progress.checkpoint = Some(entity.pos);
                log::debug!("checkpoint {:?} activated at {:?}", entity.id, entity.pos);
                frame.emit(SimEvent::CheckpointActivated { id: entity.id, pos: entity.pos });
                frame.play(SoundCue::PowerUp);
            }
        }
        Kind::Enemy(state) => {
            if !state.variant.is_hostile() {
                return;
            }
            let stomp = mode == MovementMode::Platform
                && player.vel.y > 0.0
                && player.aabb().bottom() < entity.pos.y + entity.size.y * STOMP_DEPTH;
            if stomp {
                entity.kill();
                player.vel.y = config.jump_force / 2.0;
                frame.emit(SimEvent::EnemyKilled {
                    id: entity.id,
                    points: STOMP_POINTS,
                    cause: KillCause::Stomp,
                });
                frame.play(SoundCue::Kill);
                frame.shake(STOMP_SHAKE);
                frame.freeze(config.hit_stop_frames);
            } else {
                controller::damage(player, DamageCause::Enemy, config, frame);
            }
        }
        Kind::Platform | Kind::BreakableWall | Kind::Projectile | Kind::Spawner(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::events::Muted;
    use crate::api::types::EntityId;
    use crate::components::enemy::EnemyVariant;
    use crate::components::entity::EnemyState;

    struct Rig {
        player: Player,
        progress: Progress,
        pool: ParticlePool,
        cfg: SimConfig,
    }

    impl Rig {
        fn new() -> Self {
            let cfg = SimConfig::default();
            let mut player = Player::spawn(Vec2::new(100.0, 100.0), &cfg);
            player.invulnerable_frames = 0;
            Self { player, progress: Progress::default(), pool: ParticlePool::new(64, 1), cfg }
        }

        fn touch(&mut self, entity: &mut Entity, mode: MovementMode) -> Vec<SimEvent> {
            let mut events = Vec::new();
            let mut audio = Muted;
            let mut frame = Frame::new(&mut events, &mut audio);
            touch(entity, &mut self.player, mode, &mut self.progress, &self.cfg, &mut self.pool, &mut frame);
            drop(frame);
            events
        }
    }

    fn at_player(kind: Kind, size: Vec2) -> Entity {
        Entity::new(EntityId(7), kind).with_pos(Vec2::new(105.0, 105.0)).with_size(size)
    }

    #[test]
    fn coin_is_collected() {
        let mut rig = Rig::new();
        let mut coin = at_player(Kind::Coin, Vec2::splat(20.0));
        let events = rig.touch(&mut coin, MovementMode::Platform);
        assert!(coin.dead);
        assert_eq!(events, vec![SimEvent::Pickup { kind: PickupKind::Coin, points: 100, coins: 1 }]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "contact pass reached dead entity")]
    fn touching_a_collected_coin_is_a_logic_error() {
        let mut rig = Rig::new();
        let mut coin = at_player(Kind::Coin, Vec2::splat(20.0));
        coin.kill();
        rig.touch(&mut coin, MovementMode::Platform);
    }

    #[test]
    fn wine_starts_buff_with_sparks() {
        let mut rig = Rig::new();
        let mut wine = at_player(Kind::Wine, Vec2::new(20.0, 30.0));
        rig.touch(&mut wine, MovementMode::Platform);
        assert_eq!(rig.player.buff_frames, rig.cfg.buff_frames);
        assert_eq!(rig.pool.active_count(), 20);
    }

    #[test]
    fn goal_completes_level_exactly_once() {
        let mut rig = Rig::new();
        let mut trophy = at_player(Kind::Trophy, Vec2::splat(40.0));
        assert_eq!(rig.touch(&mut trophy, MovementMode::Platform), vec![SimEvent::LevelComplete]);
        assert!(rig.touch(&mut trophy, MovementMode::Platform).is_empty());
        assert!(rig.progress.complete);
    }

    #[test]
    fn checkpoint_records_respawn_point() {
        let mut rig = Rig::new();
        let mut cp = at_player(Kind::Checkpoint { activated: false }, Vec2::new(30.0, 40.0));
        let events = rig.touch(&mut cp, MovementMode::Platform);
        assert_eq!(rig.progress.checkpoint, Some(Vec2::new(105.0, 105.0)));
        assert_eq!(events.len(), 1);
        assert!(rig.touch(&mut cp, MovementMode::Platform).is_empty());
    }

    #[test]
    fn spike_hurts_unless_invulnerable() {
        let mut rig = Rig::new();
        let mut spike = at_player(Kind::Spike, Vec2::new(40.0, 20.0));
        assert_eq!(
            rig.touch(&mut spike, MovementMode::Platform),
            vec![SimEvent::PlayerDamaged { cause: DamageCause::Spike }]
        );
        for _ in 0..10 {
            assert!(rig.touch(&mut spike, MovementMode::Platform).is_empty());
        }
        assert_eq!(rig.player.invulnerable_frames, rig.cfg.hit_invulnerable_frames);
    }

    #[test]
    fn falling_onto_enemy_stomps_it() {
        let mut rig = Rig::new();
        rig.player.vel.y = 5.0;
        let mut enemy = Entity::new(EntityId(3), Kind::Enemy(EnemyState::new(EnemyVariant::Normal, 120.0)))
            .with_pos(Vec2::new(100.0, 120.0))
            .with_size(Vec2::splat(30.0));
        let events = rig.touch(&mut enemy, MovementMode::Platform);
        assert!(enemy.dead);
        assert_eq!(rig.player.vel.y, rig.cfg.jump_force / 2.0);
        assert_eq!(
            events,
            vec![SimEvent::EnemyKilled { id: EntityId(3), points: 200, cause: KillCause::Stomp }]
        );
    }

    #[test]
    fn side_contact_hurts_and_free_fly_never_stomps() {
        let mut rig = Rig::new();
        rig.player.vel.y = 5.0;
        let mut enemy = Entity::new(EntityId(3), Kind::Enemy(EnemyState::new(EnemyVariant::Normal, 120.0)))
            .with_pos(Vec2::new(100.0, 120.0))
            .with_size(Vec2::splat(30.0));
        let events = rig.touch(&mut enemy, MovementMode::FreeFly);
        assert!(!enemy.dead);
        assert_eq!(events, vec![SimEvent::PlayerDamaged { cause: DamageCause::Enemy }]);
    }

    #[test]
    fn family_contact_is_harmless() {
        let mut rig = Rig::new();
        let mut sis = at_player(Kind::Enemy(EnemyState::new(EnemyVariant::FamilySis, 105.0)), Vec2::splat(20.0));
        assert!(rig.touch(&mut sis, MovementMode::Platform).is_empty());
        assert!(!rig.player.is_invulnerable());
    }
}
