use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::enemy::EnemyVariant;
use crate::components::entity::{EnemyState, Entity, Kind, KindTag, SpawnerState};
use crate::core::world::World;
use crate::level::error::LevelError;
use crate::level::weather::WeatherTag;

/// Immutable level description. The simulation instantiates a fresh world
/// from it on every (re)load and never writes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub spawn_point: Vec2,
    #[serde(default)]
    pub weather: WeatherTag,
    #[serde(default)]
    pub entities: Vec<EntityDesc>,
}

/// One authored entity. Optional fields only apply to the kinds that use them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDesc {
    #[serde(default)]
    pub tag: String,
    pub kind: KindTag,
    /// Top-left corner.
    pub pos: Vec2,
    pub size: Vec2,
    #[serde(default)]
    pub vel: Vec2,
    /// Enemy variant, or the variant a spawner produces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<EnemyVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_health: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patrol_start: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patrol_end: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_offset: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown_frames: Option<u32>,
}

impl EntityDesc {
    pub fn new(kind: KindTag, pos: Vec2, size: Vec2) -> Self {
        Self {
            tag: String::new(),
            kind,
            pos,
            size,
            vel: Vec2::ZERO,
            variant: None,
            health: None,
            max_health: None,
            patrol_start: None,
            patrol_end: None,
            initial_y: None,
            follow_offset: None,
            cooldown_frames: None,
        }
    }

    fn variant_or_default(&self) -> EnemyVariant {
        self.variant.unwrap_or_default()
    }

    /// (health, max_health) after applying the variant's defaults.
    fn health_pair(&self) -> (i32, i32) {
        let max = self
            .max_health
            .or(self.health)
            .unwrap_or_else(|| self.variant_or_default().profile().health);
        (self.health.unwrap_or(max), max)
    }

    fn validate(&self, index: usize) -> Result<(), LevelError> {
        let tag = || self.tag.clone();

        if matches!(self.kind, KindTag::Player | KindTag::Projectile) {
            return Err(LevelError::UnplaceableKind { index, tag: tag(), kind: self.kind });
        }
        if !(self.pos.is_finite() && self.vel.is_finite() && self.size.is_finite()) {
            return Err(LevelError::NonFinite { index, tag: tag() });
        }
        if !(self.size.x > 0.0 && self.size.y > 0.0) {
            return Err(LevelError::NonPositiveSize {
                index,
                tag: tag(),
                w: self.size.x,
                h: self.size.y,
            });
        }
        match self.kind {
            KindTag::Enemy => {
                let (health, max) = self.health_pair();
                if health <= 0 {
                    return Err(LevelError::NonPositiveHealth { index, tag: tag(), health });
                }
                if health > max {
                    return Err(LevelError::HealthAboveMax { index, tag: tag(), health, max });
                }
            }
            KindTag::Spawner => {
                if self.cooldown_frames.unwrap_or(0) == 0 {
                    return Err(LevelError::ZeroCooldown { index, tag: tag() });
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn to_kind(&self) -> Kind {
        match self.kind {
            KindTag::Platform => Kind::Platform,
            KindTag::BreakableWall => Kind::BreakableWall,
            KindTag::Coin => Kind::Coin,
            KindTag::Wine => Kind::Wine,
            KindTag::Potion => Kind::Potion,
            KindTag::Spike => Kind::Spike,
            KindTag::Checkpoint => Kind::Checkpoint { activated: false },
            KindTag::Flag => Kind::Flag,
            KindTag::Trophy => Kind::Trophy,
            KindTag::Enemy => {
                let (health, max_health) = self.health_pair();
                Kind::Enemy(EnemyState {
                    health,
                    max_health,
                    patrol_start: self.patrol_start,
                    patrol_end: self.patrol_end,
                    follow_offset: self.follow_offset.unwrap_or(0.0),
                    ..EnemyState::new(self.variant_or_default(), self.initial_y.unwrap_or(self.pos.y))
                })
            }
            KindTag::Spawner => Kind::Spawner(SpawnerState {
                variant: self.variant_or_default(),
                cooldown_frames: self.cooldown_frames.unwrap_or(0),
                frames_since_spawn: 0,
            }),
            // rejected by validate
            KindTag::Player | KindTag::Projectile => Kind::Platform,
        }
    }
}

impl Level {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Reject data the simulation cannot run.
    pub fn validate(&self) -> Result<(), LevelError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(LevelError::BadDimensions { width: self.width, height: self.height });
        }
        let sp = self.spawn_point;
        let inside = sp.is_finite()
            && (0.0..=self.width).contains(&sp.x)
            && (0.0..=self.height).contains(&sp.y);
        if !inside {
            return Err(LevelError::SpawnOutOfBounds { x: sp.x, y: sp.y });
        }
        for (index, desc) in self.entities.iter().enumerate() {
            desc.validate(index)?;
        }
        Ok(())
    }

    /// Build live entities into `world`, each with a fresh id.
    pub fn instantiate(&self, world: &mut World) {
        for desc in &self.entities {
            let id = world.next_id();
            let tag = if desc.tag.is_empty() {
                format!("{:?}_{}", desc.kind, id.0).to_lowercase()
            } else {
                desc.tag.clone()
            };
            world.spawn(
                Entity::new(id, desc.to_kind())
                    .with_tag(tag)
                    .with_pos(desc.pos)
                    .with_size(desc.size)
                    .with_vel(desc.vel),
            );
        }
    }
}
