pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod bridge;
pub mod input;
pub mod level;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, SimConfig};
pub use api::events::{
    dispatch, AudioSink, DamageCause, KillCause, Muted, Orchestrator, PickupKind, SimEvent, SoundCue,
};
pub use api::types::{EntityId, WireEvent};
pub use components::enemy::EnemyVariant;
pub use components::entity::{EnemyState, Entity, Kind, KindTag, SpawnerState};
pub use components::player::{MotionState, MovementMode, Player};
pub use core::geometry::{overlaps, Aabb};
pub use core::simulation::{PlayerView, Simulation};
pub use core::time::FixedTimestep;
pub use core::world::World;
pub use input::snapshot::InputSnapshot;
pub use level::{Level, LevelBuilder, LevelError, LevelProvider, LevelSet, WeatherTag};
pub use systems::camera::Camera;
pub use systems::effects::{Color, Particle, ParticlePool};
pub use bridge::instance::{SpriteBuffer, SpriteInstance};
pub use bridge::protocol::ProtocolLayout;
