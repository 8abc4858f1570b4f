//! Enemy behavior profiles.
//!
//! Every variant maps to a static profile (size, speed, health) and a motion
//! rule. The per-tick update dispatches on [`Motion`] instead of on the variant,
//! so adding a variant means adding one row to each table.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnemyVariant {
    Normal,
    Tank,
    Fast,
    Bat,
    Bird,
    Slime,
    Fish,
    Skeleton,
    Mummy,
    Zombie,
    Spider,
    Alien,
    Ufo,
    Meteor,
    FamilyDad,
    FamilyMom,
    FamilyBro,
    FamilySis,
}

impl Default for EnemyVariant {
    fn default() -> Self {
        EnemyVariant::Normal
    }
}

/// Size, horizontal speed and health for freshly created enemies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
}

/// How an enemy moves each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Straight horizontal motion, velocity scaled by `speed_scale`.
    Walk { speed_scale: f32 },
    /// Horizontal motion plus a vertical sinusoidal drift.
    Hover { period_ms: f32, amplitude: f32, phase: f32 },
    /// Horizontally fixed; Y oscillates around the anchor height.
    Dangle { period_ms: f32, reach: f32 },
    /// Both velocity components integrated, no patrol bounds.
    Ballistic,
    /// Idle until found, then trails the player.
    Follow,
}

impl EnemyVariant {
    pub fn is_family(self) -> bool {
        matches!(
            self,
            EnemyVariant::FamilyDad
                | EnemyVariant::FamilyMom
                | EnemyVariant::FamilyBro
                | EnemyVariant::FamilySis
        )
    }

    pub fn is_hostile(self) -> bool {
        !self.is_family()
    }

    /// Elite kills are worth more.
    pub fn is_elite(self) -> bool {
        matches!(self, EnemyVariant::Tank | EnemyVariant::Zombie | EnemyVariant::Ufo)
    }

    pub fn is_flyer(self) -> bool {
        matches!(self, EnemyVariant::Bat | EnemyVariant::Bird | EnemyVariant::Ufo)
    }

    pub fn kill_bonus(self) -> u32 {
        if self.is_elite() {
            500
        } else {
            200
        }
    }

    pub fn profile(self) -> EnemyProfile {
        let (w, h, speed, health) = match self {
            EnemyVariant::Normal => (30.0, 30.0, 2.0, 1),
            EnemyVariant::Tank => (50.0, 50.0, 1.0, 3),
            EnemyVariant::Fast => (25.0, 25.0, 4.0, 1),
            EnemyVariant::Bat | EnemyVariant::Bird => (30.0, 20.0, 3.0, 1),
            EnemyVariant::Slime => (30.0, 20.0, 1.0, 2),
            EnemyVariant::Fish => (35.0, 25.0, 2.5, 1),
            EnemyVariant::Skeleton => (25.0, 45.0, 2.0, 2),
            EnemyVariant::Mummy => (30.0, 45.0, 1.0, 4),
            EnemyVariant::Zombie => (30.0, 45.0, 1.5, 3),
            EnemyVariant::Spider => (30.0, 25.0, 2.0, 1),
            EnemyVariant::Alien => (25.0, 35.0, 2.0, 2),
            EnemyVariant::Ufo => (40.0, 25.0, 4.0, 2),
            EnemyVariant::Meteor => (35.0, 35.0, 4.0, 1),
            EnemyVariant::FamilyDad => (40.0, 40.0, 0.0, 999),
            EnemyVariant::FamilyMom => (30.0, 30.0, 0.0, 999),
            EnemyVariant::FamilyBro | EnemyVariant::FamilySis => (20.0, 20.0, 0.0, 999),
        };
        EnemyProfile { size: Vec2::new(w, h), speed, health }
    }

    pub fn motion(self) -> Motion {
        match self {
            EnemyVariant::Bat | EnemyVariant::Bird => {
                Motion::Hover { period_ms: 200.0, amplitude: 1.0, phase: 0.0 }
            }
            EnemyVariant::Ufo => Motion::Hover { period_ms: 300.0, amplitude: 1.5, phase: 0.0 },
            // cos, i.e. a quarter turn ahead of the flyers
            EnemyVariant::Fish => Motion::Hover {
                period_ms: 400.0,
                amplitude: 0.5,
                phase: std::f32::consts::FRAC_PI_2,
            },
            EnemyVariant::Spider => Motion::Dangle { period_ms: 500.0, reach: 80.0 },
            EnemyVariant::Mummy => Motion::Walk { speed_scale: 0.5 },
            EnemyVariant::Meteor => Motion::Ballistic,
            v if v.is_family() => Motion::Follow,
            _ => Motion::Walk { speed_scale: 1.0 },
        }
    }
}
