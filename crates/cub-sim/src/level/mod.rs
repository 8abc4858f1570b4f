pub mod builder;
pub mod data;
pub mod error;
pub mod provider;
pub mod weather;

pub use builder::LevelBuilder;
pub use data::{EntityDesc, Level};
pub use error::LevelError;
pub use provider::{LevelProvider, LevelSet};
pub use weather::{Ambient, WeatherTag};
