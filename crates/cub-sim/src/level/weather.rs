use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::player::MovementMode;
use crate::systems::effects::ParticleEnv;

/// Per-level ambient mode. Besides the backdrop it selects the movement
/// model and a handful of gameplay rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherTag {
    Sunny,
    Rain,
    Snow,
    Cave,
    Sea,
    Tomb,
    Train,
    Space,
    Arctic,
}

impl Default for WeatherTag {
    fn default() -> Self {
        WeatherTag::Sunny
    }
}

/// Background particle stream a weather keeps alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambient {
    SpeedLines,
    Bubbles,
    Snow,
    Rain,
}

impl Ambient {
    /// The stream stops topping up once the pool holds this many particles.
    pub fn cap(self) -> usize {
        match self {
            Ambient::SpeedLines | Ambient::Bubbles => 50,
            Ambient::Snow => 200,
            Ambient::Rain => 150,
        }
    }
}

impl WeatherTag {
    pub fn movement_mode(self) -> MovementMode {
        match self {
            WeatherTag::Sea | WeatherTag::Space => MovementMode::FreeFly,
            _ => MovementMode::Platform,
        }
    }

    pub fn allows_ranged(self) -> bool {
        self != WeatherTag::Arctic
    }

    pub fn walls_breakable(self) -> bool {
        self == WeatherTag::Tomb
    }

    pub fn ambient(self) -> Option<Ambient> {
        match self {
            WeatherTag::Train => Some(Ambient::SpeedLines),
            WeatherTag::Sea => Some(Ambient::Bubbles),
            WeatherTag::Snow | WeatherTag::Arctic => Some(Ambient::Snow),
            WeatherTag::Rain => Some(Ambient::Rain),
            _ => None,
        }
    }

    pub fn particle_env(self, camera_x: f32, viewport: Vec2) -> ParticleEnv {
        ParticleEnv {
            camera_x,
            viewport,
            wrap: matches!(self, WeatherTag::Snow | WeatherTag::Arctic),
            pop_at_top: self == WeatherTag::Sea,
            trail_cull: match self {
                WeatherTag::Tomb => Some(50.0),
                WeatherTag::Train => Some(100.0),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_and_space_are_free_fly() {
        assert_eq!(WeatherTag::Sea.movement_mode(), MovementMode::FreeFly);
        assert_eq!(WeatherTag::Space.movement_mode(), MovementMode::FreeFly);
        assert_eq!(WeatherTag::Tomb.movement_mode(), MovementMode::Platform);
    }

    #[test]
    fn arctic_disables_shooting_and_tomb_breaks_walls() {
        assert!(!WeatherTag::Arctic.allows_ranged());
        assert!(WeatherTag::Sunny.allows_ranged());
        assert!(WeatherTag::Tomb.walls_breakable());
        assert!(!WeatherTag::Cave.walls_breakable());
    }

    #[test]
    fn parses_level_file_names() {
        let w: WeatherTag = serde_json::from_str("\"ARCTIC\"").unwrap();
        assert_eq!(w, WeatherTag::Arctic);
    }

    #[test]
    fn snow_wraps_and_sea_pops() {
        let vp = Vec2::new(800.0, 450.0);
        assert!(WeatherTag::Snow.particle_env(0.0, vp).wrap);
        assert!(WeatherTag::Sea.particle_env(0.0, vp).pop_at_top);
        assert_eq!(WeatherTag::Train.particle_env(0.0, vp).trail_cull, Some(100.0));
        assert_eq!(WeatherTag::Sunny.ambient(), None);
    }
}
