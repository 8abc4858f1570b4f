pub mod geometry;
pub mod simulation;
pub mod time;
pub mod world;
