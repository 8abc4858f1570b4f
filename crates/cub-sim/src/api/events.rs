//! Everything the simulation reports outward: structured events for the
//! run orchestrator and fire-and-forget sound cues for the audio layer.

use glam::Vec2;

use crate::api::types::{EntityId, WireEvent};

/// Named audio cues. The numeric value is the id the host's sound table uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SoundCue {
    Jump = 0,
    Shoot,
    Coin,
    Kill,
    Damage,
    PowerUp,
    Heal,
    Roar,
    Win,
    Dig,
}

/// One-way audio capability handed to `Simulation::tick`.
/// Implementations must not fail; the core never looks at a result.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Collects cues for the host to drain after the tick.
impl AudioSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

/// Discards every cue. Useful for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl AudioSink for Muted {
    fn play(&mut self, _cue: SoundCue) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageCause {
    Spike,
    Enemy,
    Fall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Coin,
    Wine,
    Potion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillCause {
    Projectile,
    Stomp,
}

/// A structured event produced during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// The player lost a hit point's worth of health. The orchestrator owns lives.
    PlayerDamaged { cause: DamageCause },
    /// Unrecoverable in-level failure (fell out of the level with no checkpoint).
    Fatal,
    LevelComplete,
    Pickup { kind: PickupKind, points: u32, coins: u32 },
    EnemyHit { id: EntityId, health_left: i32 },
    EnemyKilled { id: EntityId, points: u32, cause: KillCause },
    WallDestroyed { id: EntityId },
    CheckpointActivated { id: EntityId, pos: Vec2 },
    FamilyJoined { id: EntityId },
}

impl SimEvent {
    pub const KIND_PLAYER_DAMAGED: u32 = 1;
    pub const KIND_FATAL: u32 = 2;
    pub const KIND_LEVEL_COMPLETE: u32 = 3;
    pub const KIND_PICKUP: u32 = 4;
    pub const KIND_ENEMY_HIT: u32 = 5;
    pub const KIND_ENEMY_KILLED: u32 = 6;
    pub const KIND_WALL_DESTROYED: u32 = 7;
    pub const KIND_CHECKPOINT: u32 = 8;
    pub const KIND_FAMILY_JOINED: u32 = 9;

    /// Suggested score change carried by this event.
    pub fn points(&self) -> u32 {
        match *self {
            SimEvent::Pickup { points, .. } | SimEvent::EnemyKilled { points, .. } => points,
            _ => 0,
        }
    }

    /// Flatten into the 4-float wire format.
    pub fn to_wire(&self) -> WireEvent {
        match *self {
            SimEvent::PlayerDamaged { cause } => {
                WireEvent::new(Self::KIND_PLAYER_DAMAGED, cause as u32 as f32, 0.0, 0.0)
            }
            SimEvent::Fatal => WireEvent::new(Self::KIND_FATAL, 0.0, 0.0, 0.0),
            SimEvent::LevelComplete => WireEvent::new(Self::KIND_LEVEL_COMPLETE, 0.0, 0.0, 0.0),
            SimEvent::Pickup { kind, points, coins } => {
                WireEvent::new(Self::KIND_PICKUP, kind as u32 as f32, points as f32, coins as f32)
            }
            SimEvent::EnemyHit { id, health_left } => {
                WireEvent::new(Self::KIND_ENEMY_HIT, id.0 as f32, health_left as f32, 0.0)
            }
            SimEvent::EnemyKilled { id, points, cause } => WireEvent::new(
                Self::KIND_ENEMY_KILLED,
                id.0 as f32,
                points as f32,
                cause as u32 as f32,
            ),
            SimEvent::WallDestroyed { id } => {
                WireEvent::new(Self::KIND_WALL_DESTROYED, id.0 as f32, 0.0, 0.0)
            }
            SimEvent::CheckpointActivated { id, pos } => {
                WireEvent::new(Self::KIND_CHECKPOINT, id.0 as f32, pos.x, pos.y)
            }
            SimEvent::FamilyJoined { id } => {
                WireEvent::new(Self::KIND_FAMILY_JOINED, id.0 as f32, 0.0, 0.0)
            }
        }
    }
}

/// Run-level collaborator. The simulation never calls this itself; hosts feed
/// the events of each tick through [`dispatch`] right after `tick` returns.
pub trait Orchestrator {
    fn on_level_complete(&mut self);
    fn on_player_damaged(&mut self);
    fn on_fatal(&mut self);

    /// Score, pickups and the rest. Ignored unless overridden.
    fn on_event(&mut self, _event: &SimEvent) {}
}

/// Route a tick's events to the orchestrator callbacks, in emission order.
pub fn dispatch(events: &[SimEvent], orchestrator: &mut dyn Orchestrator) {
    for event in events {
        match event {
            SimEvent::LevelComplete => orchestrator.on_level_complete(),
            SimEvent::PlayerDamaged { .. } => orchestrator.on_player_damaged(),
            SimEvent::Fatal => orchestrator.on_fatal(),
            _ => {}
        }
        orchestrator.on_event(event);
    }
}
