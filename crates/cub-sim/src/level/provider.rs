use std::collections::BTreeMap;

use crate::components::enemy::EnemyVariant;
use crate::level::builder::{tile, LevelBuilder};
use crate::level::data::Level;
use crate::level::error::LevelError;
use crate::level::weather::WeatherTag;

/// Source of level data keyed by id. Every call hands out an independent
/// copy; the simulation may do anything with it without touching the source.
pub trait LevelProvider {
    fn level(&self, id: u32) -> Result<Level, LevelError>;

    /// Known ids in play order.
    fn ids(&self) -> Vec<u32>;
}

/// In-memory level table.
#[derive(Debug, Clone, Default)]
pub struct LevelSet {
    levels: BTreeMap<u32, Level>,
}

impl LevelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a level after validating it.
    pub fn insert(&mut self, level: Level) -> Result<(), LevelError> {
        level.validate()?;
        self.levels.insert(level.id, level);
        Ok(())
    }

    /// Parse a JSON array of levels.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;
        let mut set = Self::new();
        for level in levels {
            set.insert(level)?;
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// A short two-level set for demos and smoke tests.
    pub fn builtin() -> Self {
        let valley = LevelBuilder::new(1, "Green Valley 1-1", 6600.0)
            .platform("floor-1", 0.0, 1.0, 30.0, 1.0)
            .enemy("e1", 15.0, 1.0, 10.0, EnemyVariant::Normal)
            .wine("wine1", 20.0, 2.0)
            .coin("c0_1", 22.0, 2.0)
            .coin("c0_2", 24.0, 2.0)
            .platform("floor-2", 35.0, 1.0, 20.0, 1.0)
            .spawner("spawner1", 45.0, 2.0, EnemyVariant::Normal, 300)
            .potion("potion1", 50.0, 2.0)
            .checkpoint("cp1", 52.0, 1.0)
            .platform("floor-tank", 60.0, 2.0, 20.0, 1.0)
            .enemy("e_tank1", 65.0, 2.0, 10.0, EnemyVariant::Tank)
            .platform("high-ground", 65.0, 5.0, 5.0, 1.0)
            .coin("c1", 66.0, 6.0)
            .spike("spikes1", 82.0, 1.0, 2.0)
            .platform("floor-end", 85.0, 1.0, 80.0, 1.0)
            .trophy("goal", 160.0, 1.0)
            .build();

        let tomb = LevelBuilder::new(5, "Pharaoh's Tomb", 4000.0)
            .weather(WeatherTag::Tomb)
            .spawn(tile(1.0, 3.0))
            .platform("floor", 0.0, 1.0, 100.0, 1.0)
            .platform("ceiling", 0.0, 11.0, 100.0, 1.0)
            .wall("sand-wall-1", 20.0, 4.0, 1.0, 3.0)
            .enemy("mummy1", 25.0, 1.0, 8.0, EnemyVariant::Mummy)
            .spawner("spider-nest", 40.0, 8.0, EnemyVariant::Spider, 400)
            .wall("sand-wall-2", 60.0, 4.0, 1.0, 3.0)
            .trophy("goal", 95.0, 1.0)
            .build();

        let mut set = Self::new();
        set.levels.insert(valley.id, valley);
        set.levels.insert(tomb.id, tomb);
        set
    }
}

impl LevelProvider for LevelSet {
    fn level(&self, id: u32) -> Result<Level, LevelError> {
        self.levels.get(&id).cloned().ok_or(LevelError::UnknownLevel(id))
    }

    fn ids(&self) -> Vec<u32> {
        self.levels.keys().copied().collect()
    }
}
