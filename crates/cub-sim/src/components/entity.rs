use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::components::enemy::EnemyVariant;
use crate::core::geometry::Aabb;

/// Flat kind tag, used by level data and the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum KindTag {
    Player = 0,
    Platform,
    BreakableWall,
    Coin,
    Wine,
    Potion,
    Spike,
    Checkpoint,
    Flag,
    Trophy,
    Projectile,
    Enemy,
    Spawner,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyState {
    pub variant: EnemyVariant,
    pub health: i32,
    pub max_health: i32,
    /// World-x bounds for direction reversal. `None` means unbounded.
    pub patrol_start: Option<f32>,
    pub patrol_end: Option<f32>,
    /// Anchor height for dangling motion.
    pub initial_y: f32,
    pub following: bool,
    pub follow_offset: f32,
}

impl EnemyState {
    pub fn new(variant: EnemyVariant, initial_y: f32) -> Self {
        let health = variant.profile().health;
        Self {
            variant,
            health,
            max_health: health,
            patrol_start: None,
            patrol_end: None,
            initial_y,
            following: false,
            follow_offset: 0.0,
        }
    }

    pub fn with_patrol(mut self, start: f32, end: f32) -> Self {
        self.patrol_start = Some(start);
        self.patrol_end = Some(end);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnerState {
    pub variant: EnemyVariant,
    pub cooldown_frames: u32,
    pub frames_since_spawn: u32,
}

/// Per-kind data. Only the variant matching the entity's kind carries fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Platform,
    BreakableWall,
    Coin,
    Wine,
    Potion,
    Spike,
    Checkpoint { activated: bool },
    Flag,
    Trophy,
    Projectile,
    Enemy(EnemyState),
    Spawner(SpawnerState),
}

impl Kind {
    pub fn tag(&self) -> KindTag {
        match self {
            Kind::Platform => KindTag::Platform,
            Kind::BreakableWall => KindTag::BreakableWall,
            Kind::Coin => KindTag::Coin,
            Kind::Wine => KindTag::Wine,
            Kind::Potion => KindTag::Potion,
            Kind::Spike => KindTag::Spike,
            Kind::Checkpoint { .. } => KindTag::Checkpoint,
            Kind::Flag => KindTag::Flag,
            Kind::Trophy => KindTag::Trophy,
            Kind::Projectile => KindTag::Projectile,
            Kind::Enemy(_) => KindTag::Enemy,
            Kind::Spawner(_) => KindTag::Spawner,
        }
    }
}

/// One world object. Player state lives in [`crate::components::player::Player`].
///
/// Removal is a soft delete: `dead` entities are skipped by every pass and
/// purged by the world between ticks, so indices stay stable within a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    /// Free-form label from level data (renderers key looks off it).
    pub tag: String,
    /// Top-left corner in world space.
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub dead: bool,
    /// Ticks since death, for fade-outs.
    pub dead_for: u32,
    pub kind: Kind,
}

impl Entity {
    pub fn new(id: EntityId, kind: Kind) -> Self {
        Self {
            id,
            tag: String::new(),
            pos: Vec2::ZERO,
            size: Vec2::ONE,
            vel: Vec2::ZERO,
            dead: false,
            dead_for: 0,
            kind,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    // -- Queries --

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Terrain that blocks the player.
    pub fn is_solid(&self) -> bool {
        matches!(self.kind, Kind::Platform | Kind::BreakableWall)
    }

    pub fn enemy(&self) -> Option<&EnemyState> {
        match &self.kind {
            Kind::Enemy(e) => Some(e),
            _ => None,
        }
    }

    pub fn enemy_mut(&mut self) -> Option<&mut EnemyState> {
        match &mut self.kind {
            Kind::Enemy(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_hostile_enemy(&self) -> bool {
        self.enemy().map_or(false, |e| e.variant.is_hostile())
    }

    /// Soft delete. Idempotent.
    pub fn kill(&mut self) {
        self.dead = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_geometry() {
        let e = Entity::new(EntityId(1), Kind::Coin)
            .with_tag("coin_1")
            .with_pos(Vec2::new(10.0, 20.0))
            .with_size(Vec2::new(20.0, 20.0));
        assert_eq!(e.aabb().right(), 30.0);
        assert_eq!(e.tag, "coin_1");
        assert_eq!(e.kind.tag(), KindTag::Coin);
    }

    #[test]
    fn only_terrain_is_solid() {
        assert!(Entity::new(EntityId(1), Kind::Platform).is_solid());
        assert!(Entity::new(EntityId(2), Kind::BreakableWall).is_solid());
        assert!(!Entity::new(EntityId(3), Kind::Spike).is_solid());
    }

    #[test]
    fn family_is_not_a_hostile_enemy() {
        let fam = Entity::new(
            EntityId(1),
            Kind::Enemy(EnemyState::new(EnemyVariant::FamilyMom, 0.0)),
        );
        let bat = Entity::new(EntityId(2), Kind::Enemy(EnemyState::new(EnemyVariant::Bat, 0.0)));
        assert!(!fam.is_hostile_enemy());
        assert!(bat.is_hostile_enemy());
    }

    #[test]
    fn new_enemy_starts_at_full_health() {
        let state = EnemyState::new(EnemyVariant::Tank, 0.0);
        assert_eq!(state.health, 3);
        assert_eq!(state.health, state.max_health);
    }
}
