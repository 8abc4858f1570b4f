//! End-to-end runs through the public API: load a level, feed input, read
//! back events and state.

use cub_sim::level::EntityDesc;
use cub_sim::{
    dispatch, DamageCause, EnemyVariant, InputSnapshot, KillCause, KindTag, Level, LevelBuilder,
    Muted, Orchestrator, ParticlePool, PickupKind, SimConfig, SimEvent, Simulation, SoundCue,
};
use cub_sim::systems::effects::ParticleSpawn;
use glam::Vec2;

/// Floor top at y = 410, spanning the whole level.
fn floor_level(width: f32) -> Level {
    LevelBuilder::new(1, "scenario", width)
        .platform("floor", 0.0, 1.0, width / 40.0, 1.0)
        .spawn(Vec2::new(100.0, 380.0))
        .build()
}

fn with(mut level: Level, desc: EntityDesc) -> Level {
    level.entities.push(desc);
    level
}

fn enemy_desc(variant: EnemyVariant, pos: Vec2) -> EntityDesc {
    let mut desc = EntityDesc::new(KindTag::Enemy, pos, variant.profile().size);
    desc.variant = Some(variant);
    desc
}

fn start(level: &Level) -> Simulation {
    Simulation::new(level, SimConfig::default()).expect("valid level")
}

#[test]
fn coin_pickup_reports_score_once() {
    let level = with(
        floor_level(2000.0),
        EntityDesc::new(KindTag::Coin, Vec2::new(105.0, 385.0), Vec2::splat(20.0)),
    );
    let mut sim = start(&level);

    let mut cues: Vec<SoundCue> = Vec::new();
    let events = sim.tick(&InputSnapshot::IDLE, &mut cues).to_vec();
    assert_eq!(events, vec![SimEvent::Pickup { kind: PickupKind::Coin, points: 100, coins: 1 }]);
    assert_eq!(cues, vec![SoundCue::Coin]);

    let coin = sim.world().entities().iter().find(|e| e.kind.tag() == KindTag::Coin).unwrap();
    assert!(coin.dead);
    assert!(sim.tick(&InputSnapshot::IDLE, &mut Muted).is_empty());
}

#[test]
fn lethal_projectile_kills_and_vanishes_in_one_tick() {
    let level = with(floor_level(2000.0), enemy_desc(EnemyVariant::Normal, Vec2::new(145.0, 380.0)));
    let mut sim = start(&level);
    let enemy_id = sim.world().entities()[1].id;

    let events = sim.tick(&InputSnapshot::IDLE.with_fire(), &mut Muted).to_vec();
    assert_eq!(
        events,
        vec![SimEvent::EnemyKilled {
            id: enemy_id,
            points: EnemyVariant::Normal.kill_bonus(),
            cause: KillCause::Projectile,
        }]
    );
    assert!(sim.world().get(enemy_id).unwrap().dead);
    assert!(sim.world().projectiles().is_empty());
    assert!(sim.is_frozen(), "kills trigger hit-stop");
}

#[test]
fn hit_stop_freezes_the_world() {
    let level = with(floor_level(2000.0), enemy_desc(EnemyVariant::Normal, Vec2::new(145.0, 380.0)));
    let mut sim = start(&level);
    sim.tick(&InputSnapshot::IDLE.with_fire(), &mut Muted);

    let before = sim.player().pos;
    let cfg = SimConfig::default();
    for _ in 0..cfg.hit_stop_frames {
        assert!(sim.tick(&InputSnapshot::IDLE.with_right(), &mut Muted).is_empty());
        assert_eq!(sim.player().pos, before);
    }
    sim.tick(&InputSnapshot::IDLE.with_right(), &mut Muted);
    assert!(sim.player().pos.x > before.x);
}

#[test]
fn checkpoint_respawn_restores_position_and_reports_once() {
    // no floor: the player drops straight through the checkpoint and out of the level
    let checkpoint_at = Vec2::new(100.0, 200.0);
    let level = with(
        LevelBuilder::new(1, "pit", 2000.0).spawn(checkpoint_at).build(),
        EntityDesc::new(KindTag::Checkpoint, checkpoint_at, Vec2::new(30.0, 40.0)),
    );
    let mut sim = start(&level);

    let first = sim.tick(&InputSnapshot::IDLE, &mut Muted).to_vec();
    assert!(matches!(first.as_slice(), [SimEvent::CheckpointActivated { .. }]));
    assert_eq!(sim.checkpoint(), Some(checkpoint_at));

    for _ in 0..300 {
        let events = sim.tick(&InputSnapshot::IDLE, &mut Muted).to_vec();
        if events.is_empty() {
            continue;
        }
        assert_eq!(events, vec![SimEvent::PlayerDamaged { cause: DamageCause::Fall }]);
        assert_eq!(sim.player().pos, checkpoint_at);
        assert_eq!(sim.player().vel, Vec2::ZERO);
        assert!(!sim.is_fatal());
        return;
    }
    panic!("player never fell out of the level");
}

#[test]
fn coyote_jump_after_running_off_a_ledge() {
    let level = LevelBuilder::new(1, "ledge", 2000.0)
        .platform("ledge", 0.0, 1.0, 5.0, 1.0)
        .spawn(Vec2::new(100.0, 380.0))
        .build();
    let mut sim = start(&level);
    for _ in 0..10 {
        sim.tick(&InputSnapshot::IDLE, &mut Muted);
    }
    assert!(sim.player().grounded);

    let run = InputSnapshot::IDLE.with_right();
    let mut left_ground = false;
    for _ in 0..120 {
        sim.tick(&run, &mut Muted);
        if !sim.player().grounded {
            left_ground = true;
            break;
        }
    }
    assert!(left_ground);

    let mut cues: Vec<SoundCue> = Vec::new();
    sim.tick(&run.with_jump(), &mut cues);
    assert_eq!(cues, vec![SoundCue::Jump]);
    assert!(sim.player().vel.y < 0.0);
}

#[test]
fn buffered_jump_fires_right_after_landing() {
    let level = LevelBuilder::new(1, "drop", 2000.0)
        .platform("floor", 0.0, 1.0, 50.0, 1.0)
        .spawn(Vec2::new(100.0, 100.0))
        .build();

    // first pass: find the tick the player lands on
    let mut dry_run = start(&level);
    let landing = (1..=200)
        .find(|_| {
            dry_run.tick(&InputSnapshot::IDLE, &mut Muted);
            dry_run.player().grounded
        })
        .expect("player lands");

    // second pass: press jump two ticks early and keep holding it
    let mut sim = start(&level);
    let mut cues: Vec<SoundCue> = Vec::new();
    for t in 1..=landing + 1 {
        let input = if t >= landing - 2 { InputSnapshot::IDLE.with_jump() } else { InputSnapshot::IDLE };
        sim.tick(&input, &mut cues);
        if t < landing {
            assert!(cues.is_empty(), "no jump while airborne without coyote time");
        }
    }
    assert_eq!(cues, vec![SoundCue::Jump]);
    assert!(sim.player().vel.y < 0.0);
}

#[test]
fn free_fall_never_exceeds_terminal_velocity() {
    let level = LevelBuilder::new(1, "pit", 2000.0).spawn(Vec2::new(100.0, 0.0)).build();
    let mut sim = start(&level);
    let terminal = SimConfig::default().terminal_velocity;
    while !sim.is_fatal() {
        sim.tick(&InputSnapshot::IDLE, &mut Muted);
        assert!(sim.player().vel.y <= terminal);
    }
    assert_eq!(sim.player().vel.y, terminal);
}

#[test]
fn invulnerability_blocks_repeat_damage_without_reset() {
    let level = with(
        floor_level(2000.0),
        EntityDesc::new(KindTag::Spike, Vec2::new(0.0, 395.0), Vec2::new(2000.0, 15.0)),
    );
    let cfg = SimConfig::default();
    let mut sim = start(&level);

    let mut hits = 0;
    let mut last_frames = None;
    for _ in 0..170 {
        let events = sim.tick(&InputSnapshot::IDLE, &mut Muted).to_vec();
        let damaged = events.contains(&SimEvent::PlayerDamaged { cause: DamageCause::Spike });
        let frames = sim.player().invulnerable_frames;
        if damaged {
            hits += 1;
            assert_eq!(frames, cfg.hit_invulnerable_frames);
        } else if let Some(prev) = last_frames {
            assert!(frames < prev || frames == 0, "timer never resets while invulnerable");
        }
        last_frames = Some(frames);
    }
    assert_eq!(hits, 1);
}

#[test]
fn patrolling_enemy_turns_at_its_bounds() {
    let mut desc = enemy_desc(EnemyVariant::Normal, Vec2::new(100.0, 380.0));
    desc.vel = Vec2::new(2.0, 0.0);
    desc.patrol_start = Some(100.0);
    desc.patrol_end = Some(500.0);
    let mut level = with(floor_level(4000.0), desc);
    level.spawn_point = Vec2::new(3000.0, 380.0);
    let mut sim = start(&level);
    let id = sim.world().entities()[1].id;

    let mut turns = 0;
    let mut last_vx = 2.0;
    for _ in 0..1000 {
        sim.tick(&InputSnapshot::IDLE, &mut Muted);
        let enemy = sim.world().get(id).unwrap();
        if enemy.pos.x >= 500.0 {
            assert!(enemy.vel.x < 0.0);
        }
        if enemy.pos.x <= 100.0 {
            assert!(enemy.vel.x > 0.0);
        }
        assert!((98.0..=502.0).contains(&enemy.pos.x));
        if enemy.vel.x.signum() != f32::signum(last_vx) {
            turns += 1;
        }
        last_vx = enemy.vel.x;
    }
    assert!(turns >= 4);
}

#[test]
fn particle_pool_drops_requests_past_capacity() {
    let mut pool = ParticlePool::new(300, 7);
    for _ in 0..300 {
        assert!(pool.spawn(ParticleSpawn::at(Vec2::ZERO)));
    }
    assert!(!pool.spawn(ParticleSpawn::at(Vec2::ZERO)));
    assert_eq!(pool.active_count(), 300);
}

#[test]
fn walking_into_a_wall_stops_flush() {
    let level = with(
        floor_level(2000.0),
        EntityDesc::new(KindTag::Platform, Vec2::new(400.0, 300.0), Vec2::new(40.0, 110.0)),
    );
    let mut sim = start(&level);
    for _ in 0..90 {
        sim.tick(&InputSnapshot::IDLE.with_right(), &mut Muted);
    }
    let p = sim.player();
    assert_eq!(p.pos.x + p.size.x, 400.0);
    assert_eq!(p.vel.x, 0.0);
}

#[test]
fn trophy_completes_the_level_once_and_reaches_the_orchestrator() {
    let level = LevelBuilder::new(1, "goal", 2000.0)
        .platform("floor", 0.0, 1.0, 50.0, 1.0)
        .spawn(Vec2::new(100.0, 380.0))
        .trophy("goal", 4.0, 1.0)
        .build();
    let mut sim = start(&level);

    #[derive(Default)]
    struct Run {
        completes: u32,
        score: u32,
    }
    impl Orchestrator for Run {
        fn on_level_complete(&mut self) {
            self.completes += 1;
        }
        fn on_player_damaged(&mut self) {}
        fn on_fatal(&mut self) {}
        fn on_event(&mut self, event: &SimEvent) {
            self.score += event.points();
        }
    }

    let mut run = Run::default();
    for _ in 0..120 {
        let events = sim.tick(&InputSnapshot::IDLE.with_right(), &mut Muted);
        dispatch(events, &mut run);
    }
    assert_eq!(run.completes, 1);
    assert!(sim.is_complete());
}

#[test]
fn builtin_levels_run_headless() {
    use cub_sim::LevelProvider;
    let set = cub_sim::LevelSet::builtin();
    for id in set.ids() {
        let level = set.level(id).unwrap();
        let mut sim = start(&level);
        for i in 0..600 {
            let input = if i % 40 < 20 {
                InputSnapshot::IDLE.with_right().with_fire()
            } else {
                InputSnapshot::IDLE.with_right().with_jump()
            };
            sim.tick(&input, &mut Muted);
        }
        assert!(sim.particles().active_count() <= sim.particles().capacity());
    }
}
