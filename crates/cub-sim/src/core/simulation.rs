use glam::Vec2;

use crate::api::config::SimConfig;
use crate::api::events::{AudioSink, SimEvent};
use crate::components::enemy::EnemyVariant;
use crate::components::entity::KindTag;
use crate::components::player::{MotionState, MovementMode, Player};
use crate::core::world::World;
use crate::input::snapshot::InputSnapshot;
use crate::level::{Level, LevelError};
use crate::systems::camera::Camera;
use crate::systems::collision::{self, VerticalHit};
use crate::systems::effects::{ParticlePool, Rng};
use crate::systems::enemies::{self, EnemySpawn};
use crate::systems::environment;
use crate::systems::interactions::{self, Progress};
use crate::systems::player::{self as controller, Boundary};
use crate::systems::projectiles;
use crate::systems::Frame;

/// Salt mixed into the config seed so spawner rolls and particle rolls
/// come from independent streams.
const SPAWNER_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Player fields a renderer needs, copied out once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub facing_right: bool,
    /// False on the "off" frames of the invulnerability flicker.
    pub visible: bool,
    pub invulnerable: bool,
    pub buffed: bool,
    pub attacking: bool,
    pub render_scale: Vec2,
    pub state: MotionState,
}

/// One loaded level in motion: the entity store, the player, the camera and
/// the particle pool, advanced together one fixed tick at a time.
///
/// The simulation owns every piece of mutable state. Hosts feed it an
/// [`InputSnapshot`] and an [`AudioSink`] per tick and read the rest back
/// through the accessors once `tick` returns.
pub struct Simulation {
    config: SimConfig,
    /// Pristine copy of the loaded level, kept for restarts.
    level: Level,
    mode: MovementMode,
    world: World,
    player: Player,
    camera: Camera,
    particles: ParticlePool,
    rng: Rng,
    progress: Progress,
    hit_stop: u32,
    /// Set once the player falls out with no checkpoint. Cleared by `revive` or a reload.
    fatal: bool,
    frame: u64,
    events: Vec<SimEvent>,
}

impl Simulation {
    pub fn new(level: &Level, config: SimConfig) -> Result<Self, LevelError> {
        let mut sim = Self {
            particles: ParticlePool::new(config.particle_capacity, config.seed),
            rng: Rng::new(config.seed ^ SPAWNER_SEED_SALT),
            player: Player::spawn(level.spawn_point, &config),
            level: level.clone(),
            mode: level.weather.movement_mode(),
            world: World::new(),
            camera: Camera::new(),
            progress: Progress::default(),
            hit_stop: 0,
            fatal: false,
            frame: 0,
            events: Vec::with_capacity(16),
            config,
        };
        sim.load_level(level)?;
        Ok(sim)
    }

    /// Tear down everything and start `level` from its spawn point.
    /// The caller's level is copied; it is never touched afterwards.
    pub fn load_level(&mut self, level: &Level) -> Result<(), LevelError> {
        level.validate()?;
        self.level = level.clone();
        self.reset();
        log::info!(
            "loaded level {} \"{}\" ({} entities, {:?})",
            self.level.id,
            self.level.name,
            self.world.len(),
            self.level.weather
        );
        Ok(())
    }

    /// Reload the current level from its pristine copy.
    pub fn restart(&mut self) {
        self.reset();
        log::info!("restarted level {}", self.level.id);
    }

    /// Bring the player back after a fatal fall, at the last checkpoint or
    /// the spawn point, without resetting the rest of the level.
    pub fn revive(&mut self) {
        let at = self.progress.checkpoint.unwrap_or(self.level.spawn_point);
        self.player.respawn_at(at, self.config.spawn_invulnerable_frames);
        self.camera.snap_to(self.player.pos.x, self.level.width, &self.config);
        self.fatal = false;
        self.hit_stop = 0;
        log::info!("revived at {at:?}");
    }

    fn reset(&mut self) {
        self.mode = self.level.weather.movement_mode();
        self.world.clear();
        self.level.instantiate(&mut self.world);
        self.player = Player::spawn(self.level.spawn_point, &self.config);
        self.camera.reset();
        self.camera.snap_to(self.player.pos.x, self.level.width, &self.config);
        self.particles.clear();
        self.progress = Progress::default();
        self.hit_stop = 0;
        self.fatal = false;
        self.frame = 0;
        self.events.clear();
    }

    /// Advance one fixed tick and return the events it produced.
    pub fn tick(&mut self, input: &InputSnapshot, audio: &mut dyn AudioSink) -> &[SimEvent] {
        self.events.clear();
        self.frame += 1;

        if self.hit_stop > 0 {
            self.hit_stop -= 1;
            return &self.events;
        }
        if self.fatal {
            return &self.events;
        }

        self.world.reap(self.config.corpse_frames);

        let cfg = &self.config;
        let weather = self.level.weather;
        let viewport = Vec2::new(cfg.viewport_width, cfg.viewport_height);
        let mut frame = Frame::new(&mut self.events, audio);

        controller::tick_timers(&mut self.player);
        self.camera.decay_shake(cfg);

        // environment
        environment::emit_ambient(weather, self.camera.x, viewport, &mut self.particles);
        environment::emit_buff_trail(&self.player, &mut self.particles);
        self.particles.tick(&weather.particle_env(self.camera.x, viewport));

        // projectiles
        projectiles::fire(&mut self.player, input, weather.allows_ranged(), &mut self.world, cfg, &mut frame);
        projectiles::step_projectiles(
            &mut self.world,
            self.camera.x,
            weather.walls_breakable(),
            cfg,
            &mut self.particles,
            &mut frame,
        );

        // player vs terrain
        controller::drive(&mut self.player, input, self.mode, cfg, &mut frame);
        let player = &mut self.player;
        let terrain = self.world.entities();
        collision::sweep_x(&mut player.pos, player.size, &mut player.vel, terrain);
        player.pos.x = player.pos.x.clamp(0.0, (self.level.width - player.size.x).max(0.0));

        let impact = player.vel.y;
        let hit = collision::sweep_y(&mut player.pos, player.size, &mut player.vel, terrain);
        if hit == Some(VerticalHit::Floor) {
            controller::land(player, impact, self.mode, &mut frame);
        }
        player.grounded = self.mode == MovementMode::Platform && hit == Some(VerticalHit::Floor);

        let boundary = controller::check_fall(
            player,
            self.mode,
            self.level.height,
            self.progress.checkpoint,
            cfg,
            &mut frame,
        );
        match boundary {
            Boundary::Fatal => {
                log::info!("player fell out of level {} with no checkpoint", self.level.id);
                self.fatal = true;
            }
            Boundary::Respawned => self.camera.snap_to(player.pos.x, self.level.width, cfg),
            Boundary::Inside | Boundary::Bounced => {}
        }
        controller::tick_invulnerability(player);

        // entities
        let interact = matches!(boundary, Boundary::Inside | Boundary::Bounced);
        let t_ms = self.frame as f32 * cfg.frame_ms();
        let mut spawns: Vec<EnemySpawn> = Vec::new();

        for entity in self.world.entities_mut() {
            if entity.dead {
                continue;
            }
            match entity.kind.tag() {
                KindTag::Enemy if entity.enemy().is_some_and(|s| s.variant.is_family()) => {
                    enemies::step_family(entity, &self.player, &mut self.particles, &mut frame);
                }
                KindTag::Enemy => enemies::step_enemy(entity, t_ms),
                KindTag::Spawner => {
                    spawns.extend(enemies::step_spawner(entity, self.player.pos.x, &mut self.rng, &mut frame));
                }
                _ => {}
            }
            if interact {
                interactions::touch(
                    entity,
                    &mut self.player,
                    self.mode,
                    &mut self.progress,
                    cfg,
                    &mut self.particles,
                    &mut frame,
                );
            }
        }
        for spawn in spawns {
            let id = self.world.next_id();
            self.world.spawn(spawn.into_entity(id));
        }
        let cull_distance = cfg.viewport_width + cfg.projectile_cull_margin;
        let level_size = Vec2::new(self.level.width, self.level.height);
        let camera_x = self.camera.x;
        let culled = self.world.discard(|e| enemies::is_lost(e, camera_x, cull_distance, level_size));
        if culled > 0 {
            log::debug!("culled {culled} ballistic enemies");
        }

        self.camera.follow(self.player.pos.x, self.player.facing_right, self.level.width, cfg);

        let (shake, freeze) = frame.finish();
        if let Some(magnitude) = shake {
            self.camera.shake(magnitude);
        }
        self.hit_stop = freeze;
        controller::ease_render_scale(&mut self.player);

        &self.events
    }

    // -- Read surface --

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn movement_mode(&self) -> MovementMode {
        self.mode
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_view(&self) -> PlayerView {
        let p = &self.player;
        PlayerView {
            pos: p.pos,
            size: p.size,
            facing_right: p.facing_right,
            visible: p.visible_on(self.frame),
            invulnerable: p.is_invulnerable(),
            buffed: p.is_buffed(),
            attacking: p.is_attacking(),
            render_scale: p.render_scale,
            state: p.state(self.mode),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    /// Events from the most recent tick.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Ticks since the level was (re)loaded, frozen ticks included.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether the next tick is a hit-stop frame.
    pub fn is_frozen(&self) -> bool {
        self.hit_stop > 0
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    pub fn is_complete(&self) -> bool {
        self.progress.complete
    }

    pub fn checkpoint(&self) -> Option<Vec2> {
        self.progress.checkpoint
    }

    /// Hostile enemies still alive, family members excluded.
    pub fn hostiles_left(&self) -> usize {
        self.world.iter_live().filter(|e| e.is_hostile_enemy()).count()
    }

    /// Family members currently trailing the player.
    pub fn family_following(&self) -> Vec<EnemyVariant> {
        self.world
            .iter_live()
            .filter_map(|e| e.enemy())
            .filter(|s| s.variant.is_family() && s.following)
            .map(|s| s.variant)
            .collect()
    }

    // -- Host and test hooks --

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::events::{Muted, SoundCue};
    use crate::level::{LevelBuilder, WeatherTag};

    fn flat(weather: WeatherTag) -> Level {
        LevelBuilder::new(9, "flat", 2000.0)
            .weather(weather)
            .platform("floor", 0.0, 1.0, 50.0, 1.0)
            .build()
    }

    fn run(sim: &mut Simulation, input: InputSnapshot, ticks: usize) -> Vec<SimEvent> {
        let mut all = Vec::new();
        for _ in 0..ticks {
            all.extend_from_slice(sim.tick(&input, &mut Muted));
        }
        all
    }

    #[test]
    fn player_settles_on_the_floor() {
        let mut sim = Simulation::new(&flat(WeatherTag::Sunny), SimConfig::default()).unwrap();
        run(&mut sim, InputSnapshot::IDLE, 60);
        assert!(sim.player().grounded);
        assert_eq!(sim.player().pos.y + sim.player().size.y, 410.0);
        assert_eq!(sim.player_view().state, MotionState::Grounded);
    }

    #[test]
    fn jump_plays_a_cue_and_leaves_the_ground() {
        let mut sim = Simulation::new(&flat(WeatherTag::Sunny), SimConfig::default()).unwrap();
        run(&mut sim, InputSnapshot::IDLE, 60);
        let mut cues: Vec<SoundCue> = Vec::new();
        sim.tick(&InputSnapshot::IDLE.with_jump(), &mut cues);
        assert_eq!(cues, vec![SoundCue::Jump]);
        assert!(!sim.player().grounded);
        assert!(sim.player().vel.y < 0.0);
    }

    #[test]
    fn sea_levels_never_ground_the_player() {
        let mut sim = Simulation::new(&flat(WeatherTag::Sea), SimConfig::default()).unwrap();
        assert_eq!(sim.movement_mode(), MovementMode::FreeFly);
        run(&mut sim, InputSnapshot::IDLE.with_down(), 120);
        assert!(!sim.player().grounded);
        assert_eq!(sim.player_view().state, MotionState::FreeFly);
    }

    #[test]
    fn player_is_kept_inside_the_level_horizontally() {
        let mut sim = Simulation::new(&flat(WeatherTag::Sunny), SimConfig::default()).unwrap();
        run(&mut sim, InputSnapshot::IDLE.with_left(), 120);
        assert_eq!(sim.player().pos.x, 0.0);
    }

    #[test]
    fn falling_without_checkpoint_latches_fatal() {
        let level = LevelBuilder::new(9, "pit", 2000.0).build();
        let mut sim = Simulation::new(&level, SimConfig::default()).unwrap();
        let events = run(&mut sim, InputSnapshot::IDLE, 200);
        assert_eq!(events.iter().filter(|e| **e == SimEvent::Fatal).count(), 1);
        assert!(sim.is_fatal());

        let before = sim.player().pos;
        run(&mut sim, InputSnapshot::IDLE, 10);
        assert_eq!(sim.player().pos, before, "nothing moves after a fatal fall");

        sim.revive();
        assert!(!sim.is_fatal());
        assert_eq!(sim.player().pos, level.spawn_point);
    }

    #[test]
    fn restart_rebuilds_the_level() {
        let level = LevelBuilder::new(9, "coins", 2000.0)
            .platform("floor", 0.0, 1.0, 50.0, 1.0)
            .coin("c", 1.0, 2.0)
            .build();
        let mut sim = Simulation::new(&level, SimConfig::default()).unwrap();
        let first_id = sim.world().entities()[0].id;
        sim.world_mut().entities_mut()[1].kill();
        sim.restart();
        assert_eq!(sim.world().iter_live().count(), 2);
        assert_ne!(sim.world().entities()[0].id, first_id, "ids are never reused");
        assert_eq!(sim.frame(), 0);
    }

    #[test]
    fn invalid_level_is_rejected_at_load() {
        let mut level = flat(WeatherTag::Sunny);
        level.entities[0].size.x = 0.0;
        assert!(matches!(
            Simulation::new(&level, SimConfig::default()),
            Err(LevelError::NonPositiveSize { .. })
        ));
    }

    #[test]
    fn meteors_leaving_the_level_are_dropped() {
        use crate::components::enemy::EnemyVariant;
        use crate::level::EntityDesc;

        let mut level = flat(WeatherTag::Sunny);
        level.spawn_point = Vec2::new(1000.0, 380.0);
        let mut meteor = EntityDesc::new(KindTag::Enemy, Vec2::new(60.0, 100.0), Vec2::splat(35.0));
        meteor.variant = Some(EnemyVariant::Meteor);
        meteor.vel = Vec2::new(-5.0, 0.0);
        level.entities.push(meteor);

        let mut sim = Simulation::new(&level, SimConfig::default()).unwrap();
        assert_eq!(sim.world().len(), 2);
        run(&mut sim, InputSnapshot::IDLE, 30);
        assert_eq!(sim.world().len(), 1);
        assert!(sim.world().iter_live().all(|e| e.enemy().is_none()));
    }

    #[test]
    fn weather_particles_appear_in_snow() {
        let mut sim = Simulation::new(&flat(WeatherTag::Snow), SimConfig::default()).unwrap();
        run(&mut sim, InputSnapshot::IDLE, 30);
        assert_eq!(sim.particles().active_count(), 30);
    }
}
