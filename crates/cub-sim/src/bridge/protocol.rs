/// Shared frame buffer layout.
/// Must stay in sync with the host's reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 18 floats]
/// [Sprites: max_sprites × 8 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame, so the host can
/// compute offsets without knowing the build's defaults.

use crate::api::types::WireEvent;
use crate::bridge::instance::SpriteInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 18;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_SPRITES: usize = 2;
pub const HEADER_SPRITE_COUNT: usize = 3;
pub const HEADER_MAX_SOUNDS: usize = 4;
pub const HEADER_SOUND_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_CAMERA_X: usize = 8;
pub const HEADER_CAMERA_SHAKE: usize = 9;
pub const HEADER_LEVEL_WIDTH: usize = 10;
pub const HEADER_LEVEL_HEIGHT: usize = 11;
pub const HEADER_VIEWPORT_WIDTH: usize = 12;
pub const HEADER_VIEWPORT_HEIGHT: usize = 13;
pub const HEADER_PROTOCOL_VERSION: usize = 14;
pub const HEADER_FROZEN: usize = 15;
pub const HEADER_HOSTILES_LEFT: usize = 16;
pub const HEADER_FAMILY_FOLLOWING: usize = 17;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 2.0;

/// Floats per sprite (wire format, never changes).
pub const SPRITE_FLOATS: usize = SpriteInstance::FLOATS;

/// Floats per event: kind, a, b, c (wire format, never changes).
pub const EVENT_FLOATS: usize = WireEvent::FLOATS;

pub const DEFAULT_MAX_SPRITES: usize = 1024;
pub const DEFAULT_MAX_SOUNDS: usize = 32;
pub const DEFAULT_MAX_EVENTS: usize = 32;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_sprites: usize,
    pub max_sounds: usize,
    pub max_events: usize,

    /// Size of each section in floats.
    pub sprite_data_floats: usize,
    pub sound_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where each section begins.
    pub sprite_data_offset: usize,
    pub sound_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_sprites: usize, max_sounds: usize, max_events: usize) -> Self {
        let sprite_data_floats = max_sprites * SPRITE_FLOATS;
        let sound_data_floats = max_sounds;
        let event_data_floats = max_events * EVENT_FLOATS;

        let sprite_data_offset = HEADER_FLOATS;
        let sound_data_offset = sprite_data_offset + sprite_data_floats;
        let event_data_offset = sound_data_offset + sound_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_sprites,
            max_sounds,
            max_events,
            sprite_data_floats,
            sound_data_floats,
            event_data_floats,
            sprite_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Header with the capacity fields and version filled in; the runner
    /// fills the per-frame fields.
    pub fn header(&self) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_MAX_SPRITES] = self.max_sprites as f32;
        header[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header
    }
}

impl Default for ProtocolLayout {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SPRITES, DEFAULT_MAX_SOUNDS, DEFAULT_MAX_EVENTS)
    }
}
