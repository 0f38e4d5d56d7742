pub mod config;
pub mod errors;
pub mod level;
pub mod pathfinding;
pub mod plugins;
pub mod resources;

// Selective re-exports for external consumers

pub use errors::{NavError, NavResult};

pub use level::{Doodad, LevelContext, LevelDefinition, TileGrid, TileInfo};

pub use pathfinding::{FootprintOffset, LevelNavigation, ObstacleGraph, PathGraph};

pub use plugins::NavigationPlugin;
