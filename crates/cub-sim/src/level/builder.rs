//! Tile-grid authoring helpers.
//!
//! Levels are laid out on a 40px grid with `y` counted in tiles up from the
//! bottom of the viewport, so `platform(0, 1, 30, 1)` is a floor strip whose
//! top sits one tile above the bottom edge.

use glam::Vec2;

use crate::components::enemy::EnemyVariant;
use crate::components::entity::KindTag;
use crate::level::data::{EntityDesc, Level};
use crate::level::weather::WeatherTag;

pub const TILE: f32 = 40.0;
/// Viewport height the tile rows are counted from.
pub const GRID_HEIGHT: f32 = 450.0;

/// World position of a tile's top-left corner.
pub fn tile(x: f32, y: f32) -> Vec2 {
    Vec2::new(x * TILE, GRID_HEIGHT - y * TILE)
}

pub struct LevelBuilder {
    level: Level,
}

impl LevelBuilder {
    pub fn new(id: u32, name: impl Into<String>, width: f32) -> Self {
        Self {
            level: Level {
                id,
                name: name.into(),
                width,
                height: GRID_HEIGHT,
                spawn_point: Vec2::new(50.0, GRID_HEIGHT - 150.0),
                weather: WeatherTag::Sunny,
                entities: Vec::new(),
            },
        }
    }

    pub fn weather(mut self, weather: WeatherTag) -> Self {
        self.level.weather = weather;
        self
    }

    /// Spawn point in world units.
    pub fn spawn(mut self, at: Vec2) -> Self {
        self.level.spawn_point = at;
        self
    }

    fn push(mut self, tag: &str, desc: EntityDesc) -> Self {
        let mut desc = desc;
        desc.tag = tag.to_string();
        self.level.entities.push(desc);
        self
    }

    pub fn platform(self, tag: &str, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.push(tag, EntityDesc::new(KindTag::Platform, tile(x, y), Vec2::new(w, h) * TILE))
    }

    pub fn wall(self, tag: &str, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.push(tag, EntityDesc::new(KindTag::BreakableWall, tile(x, y), Vec2::new(w, h) * TILE))
    }

    /// Full-height barrier that closes off the end of a level.
    pub fn end_gate(self, tag: &str, x: f32) -> Self {
        let pos = Vec2::new(x * TILE, -500.0);
        self.push(tag, EntityDesc::new(KindTag::Platform, pos, Vec2::new(TILE * 20.0, GRID_HEIGHT + 1000.0)))
    }

    pub fn coin(self, tag: &str, x: f32, y: f32) -> Self {
        let pos = tile(x, y) + Vec2::splat(10.0);
        self.push(tag, EntityDesc::new(KindTag::Coin, pos, Vec2::splat(20.0)))
    }

    pub fn wine(self, tag: &str, x: f32, y: f32) -> Self {
        let pos = tile(x, y) + Vec2::new(10.0, 5.0);
        self.push(tag, EntityDesc::new(KindTag::Wine, pos, Vec2::new(20.0, 30.0)))
    }

    pub fn potion(self, tag: &str, x: f32, y: f32) -> Self {
        let pos = tile(x, y) + Vec2::new(10.0, 5.0);
        self.push(tag, EntityDesc::new(KindTag::Potion, pos, Vec2::new(20.0, 25.0)))
    }

    pub fn spike(self, tag: &str, x: f32, y: f32, w: f32) -> Self {
        self.push(tag, EntityDesc::new(KindTag::Spike, tile(x, y), Vec2::new(w * TILE, TILE / 2.0)))
    }

    /// Goal marker standing on row `y`.
    pub fn trophy(self, tag: &str, x: f32, y: f32) -> Self {
        let pos = tile(x, y) - Vec2::new(0.0, TILE);
        self.push(tag, EntityDesc::new(KindTag::Trophy, pos, Vec2::splat(TILE)))
    }

    pub fn flag(self, tag: &str, x: f32, y: f32) -> Self {
        let pos = tile(x, y) - Vec2::new(0.0, TILE * 2.0);
        self.push(tag, EntityDesc::new(KindTag::Flag, pos, Vec2::new(TILE / 2.0, TILE * 2.0)))
    }

    /// Checkpoint standing on row `y`; it is also where the player respawns.
    pub fn checkpoint(self, tag: &str, x: f32, y: f32) -> Self {
        let pos = tile(x, y) - Vec2::new(0.0, TILE);
        self.push(tag, EntityDesc::new(KindTag::Checkpoint, pos, Vec2::new(30.0, TILE)))
    }

    pub fn spawner(self, tag: &str, x: f32, y: f32, variant: EnemyVariant, cooldown_frames: u32) -> Self {
        let mut desc = EntityDesc::new(KindTag::Spawner, tile(x, y), Vec2::splat(TILE));
        desc.variant = Some(variant);
        desc.cooldown_frames = Some(cooldown_frames);
        self.push(tag, desc)
    }

    /// Enemy standing on row `y`, patrolling `range` tiles to the right.
    pub fn enemy(self, tag: &str, x: f32, y: f32, range: f32, variant: EnemyVariant) -> Self {
        let profile = variant.profile();
        let pos = tile(x, y) - Vec2::new(0.0, profile.size.y);
        let mut desc = EntityDesc::new(KindTag::Enemy, pos, profile.size);
        desc.variant = Some(variant);
        desc.initial_y = Some(pos.y);
        if variant != EnemyVariant::Spider {
            desc.vel = Vec2::new(profile.speed, 0.0);
        }
        if variant != EnemyVariant::Meteor {
            desc.patrol_start = Some(x * TILE);
            desc.patrol_end = Some((x + range) * TILE);
        }
        self.push(tag, desc)
    }

    /// Passive family member, found standing on row `y`. `offset` spaces
    /// followers apart so they do not stack.
    pub fn family(self, tag: &str, x: f32, y: f32, variant: EnemyVariant, offset: f32) -> Self {
        let size = variant.profile().size;
        let mut desc = EntityDesc::new(KindTag::Enemy, tile(x, y) - Vec2::new(0.0, size.y), size);
        desc.variant = Some(variant);
        desc.follow_offset = Some(offset);
        self.push(tag, desc)
    }

    pub fn build(self) -> Level {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_count_up_from_the_bottom() {
        assert_eq!(tile(0.0, 1.0), Vec2::new(0.0, 410.0));
        assert_eq!(tile(3.0, 0.0), Vec2::new(120.0, 450.0));
    }

    #[test]
    fn enemy_stands_on_its_row_and_patrols_right() {
        let level = LevelBuilder::new(1, "test", 2000.0)
            .platform("floor", 0.0, 1.0, 30.0, 1.0)
            .enemy("e1", 15.0, 1.0, 10.0, EnemyVariant::Normal)
            .build();
        let e = &level.entities[1];
        assert_eq!(e.pos.y + e.size.y, 410.0);
        assert_eq!(e.patrol_start, Some(600.0));
        assert_eq!(e.patrol_end, Some(1000.0));
        assert_eq!(e.vel.x, 2.0);
        assert!(level.validate().is_ok());
    }

    #[test]
    fn built_levels_validate() {
        let level = LevelBuilder::new(2, "cave", 4000.0)
            .weather(WeatherTag::Cave)
            .platform("floor", 0.0, 1.0, 100.0, 1.0)
            .coin("c1", 5.0, 2.0)
            .wine("w1", 6.0, 2.0)
            .potion("p1", 7.0, 2.0)
            .spike("s1", 9.0, 1.0, 2.0)
            .checkpoint("cp", 12.0, 1.0)
            .spawner("sp", 20.0, 2.0, EnemyVariant::Bat, 300)
            .family("mom", 30.0, 1.0, EnemyVariant::FamilyMom, 35.0)
            .wall("wall", 40.0, 3.0, 1.0, 2.0)
            .trophy("goal", 95.0, 1.0)
            .end_gate("gate", 98.0)
            .build();
        assert_eq!(level.entities.len(), 11);
        assert!(level.validate().is_ok());
    }
}
