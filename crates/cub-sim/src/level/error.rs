use thiserror::Error;

use crate::components::entity::KindTag;

/// Malformed level data. Loading fails fast on the first problem found.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {0} not found")]
    UnknownLevel(u32),

    #[error("level dimensions must be positive, got {width}x{height}")]
    BadDimensions { width: f32, height: f32 },

    #[error("spawn point ({x}, {y}) lies outside the level")]
    SpawnOutOfBounds { x: f32, y: f32 },

    #[error("entity #{index} `{tag}`: non-positive size {w}x{h}")]
    NonPositiveSize { index: usize, tag: String, w: f32, h: f32 },

    #[error("entity #{index} `{tag}`: non-finite position or velocity")]
    NonFinite { index: usize, tag: String },

    #[error("entity #{index} `{tag}`: enemy health must be positive, got {health}")]
    NonPositiveHealth { index: usize, tag: String, health: i32 },

    #[error("entity #{index} `{tag}`: health {health} exceeds max health {max}")]
    HealthAboveMax { index: usize, tag: String, health: i32, max: i32 },

    #[error("entity #{index} `{tag}`: spawner cooldown must be at least one frame")]
    ZeroCooldown { index: usize, tag: String },

    #[error("entity #{index} `{tag}`: {kind:?} cannot be placed in a level")]
    UnplaceableKind { index: usize, tag: String, kind: KindTag },

    #[error("invalid level json: {0}")]
    Json(#[from] serde_json::Error),
}
