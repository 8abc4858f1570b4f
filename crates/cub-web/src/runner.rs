use cub_sim::bridge::protocol::{
    HEADER_CAMERA_SHAKE, HEADER_CAMERA_X, HEADER_EVENT_COUNT, HEADER_FAMILY_FOLLOWING, HEADER_FLOATS,
    HEADER_FRAME_COUNTER, HEADER_FROZEN, HEADER_HOSTILES_LEFT, HEADER_LEVEL_HEIGHT, HEADER_LEVEL_WIDTH,
    HEADER_SOUND_COUNT, HEADER_SPRITE_COUNT, HEADER_VIEWPORT_HEIGHT, HEADER_VIEWPORT_WIDTH,
};
use cub_sim::{
    FixedTimestep, InputSnapshot, Level, LevelError, LevelProvider, LevelSet, ProtocolLayout,
    SimConfig, Simulation, SoundCue, SpriteBuffer, WireEvent,
};

/// Drives one `Simulation` from host frame callbacks.
///
/// The host calls `tick` with wall-clock frame time; the runner turns that
/// into whole fixed ticks, then repacks the read surface into flat buffers
/// the page reads through the exported pointers.
pub struct SimRunner {
    sim: Option<Simulation>,
    config: SimConfig,
    levels: LevelSet,
    input: InputSnapshot,
    timestep: FixedTimestep,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    sprites: SpriteBuffer,
    /// Cues from every tick run this frame.
    cues: Vec<SoundCue>,
    /// Flat buffer of sound cue ids for shared-buffer reads.
    sound_buffer: Vec<u8>,
    events: Vec<WireEvent>,
}

impl SimRunner {
    pub fn new(config: SimConfig) -> Self {
        let layout = ProtocolLayout::default();
        Self {
            sim: None,
            timestep: FixedTimestep::new(config.fixed_dt),
            levels: LevelSet::builtin(),
            input: InputSnapshot::IDLE,
            header: layout.header(),
            sprites: SpriteBuffer::with_capacity(layout.max_sprites),
            cues: Vec::with_capacity(layout.max_sounds),
            sound_buffer: Vec::with_capacity(layout.max_sounds),
            events: Vec::with_capacity(layout.max_events),
            layout,
            config,
        }
    }

    /// Start a level handed over as JSON.
    pub fn load_level_json(&mut self, json: &str) -> Result<(), LevelError> {
        let level = Level::from_json(json)?;
        self.start(&level)
    }

    /// Start one of the levels the runner ships with.
    pub fn load_builtin(&mut self, id: u32) -> Result<(), LevelError> {
        let level = self.levels.level(id)?;
        self.start(&level)
    }

    fn start(&mut self, level: &Level) -> Result<(), LevelError> {
        match self.sim.as_mut() {
            Some(sim) => sim.load_level(level)?,
            None => self.sim = Some(Simulation::new(level, self.config.clone())?),
        }
        self.timestep.reset();
        self.input = InputSnapshot::IDLE;
        self.cues.clear();
        self.events.clear();
        self.pack();
        Ok(())
    }

    pub fn restart(&mut self) {
        let Some(sim) = self.sim.as_mut() else {
            return;
        };
        sim.restart();
        self.timestep.reset();
        self.cues.clear();
        self.events.clear();
        self.pack();
    }

    pub fn revive(&mut self) {
        let Some(sim) = self.sim.as_mut() else {
            return;
        };
        sim.revive();
        self.pack();
    }

    /// Replace the held intent. Applies to every tick until the next call.
    pub fn set_input(&mut self, bits: u32) {
        self.input = InputSnapshot::from_bits(bits);
    }

    /// Run as many fixed ticks as `dt` seconds of wall time cover, then repack.
    pub fn tick(&mut self, dt: f32) {
        let Some(sim) = self.sim.as_mut() else {
            return;
        };

        self.cues.clear();
        self.events.clear();
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            let events = sim.tick(&self.input, &mut self.cues);
            let room = self.layout.max_events.saturating_sub(self.events.len());
            if events.len() > room {
                log::warn!("event buffer full, dropping {} events", events.len() - room);
            }
            self.events.extend(events.iter().take(room).map(|e| e.to_wire()));
        }

        self.pack();
    }

    fn pack(&mut self) {
        let Some(sim) = self.sim.as_ref() else {
            return;
        };

        self.sprites.build(sim);

        if self.cues.len() > self.layout.max_sounds {
            log::warn!("sound buffer full, dropping {} cues", self.cues.len() - self.layout.max_sounds);
        }
        self.sound_buffer.clear();
        self.sound_buffer
            .extend(self.cues.iter().take(self.layout.max_sounds).map(|&cue| cue as u8));

        let camera = sim.camera();
        let level = sim.level();
        let h = &mut self.header;
        h[HEADER_FRAME_COUNTER] = sim.frame() as f32;
        h[HEADER_SPRITE_COUNT] = self.sprites.instance_count() as f32;
        h[HEADER_SOUND_COUNT] = self.sound_buffer.len() as f32;
        h[HEADER_EVENT_COUNT] = self.events.len() as f32;
        h[HEADER_CAMERA_X] = camera.x;
        h[HEADER_CAMERA_SHAKE] = camera.shake;
        h[HEADER_LEVEL_WIDTH] = level.width;
        h[HEADER_LEVEL_HEIGHT] = level.height;
        h[HEADER_VIEWPORT_WIDTH] = self.config.viewport_width;
        h[HEADER_VIEWPORT_HEIGHT] = self.config.viewport_height;
        h[HEADER_FROZEN] = if sim.is_frozen() { 1.0 } else { 0.0 };
        h[HEADER_HOSTILES_LEFT] = sim.hostiles_left() as f32;
        h[HEADER_FAMILY_FOLLOWING] = sim.family_following().len() as f32;
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        self.sim.as_ref()
    }

    // ---- Pointer accessors for shared-buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn sprites_ptr(&self) -> *const f32 {
        self.sprites.instances_ptr()
    }

    pub fn sprite_count(&self) -> u32 {
        self.sprites.instance_count()
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<WireEvent, f32>(&self.events).as_ptr()
    }

    pub fn events_len(&self) -> u32 {
        self.events.len() as u32
    }

    // ---- Capacity accessors ----

    pub fn max_sprites(&self) -> u32 {
        self.layout.max_sprites as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
