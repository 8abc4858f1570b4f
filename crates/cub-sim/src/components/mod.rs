pub mod enemy;
pub mod entity;
pub mod player;
