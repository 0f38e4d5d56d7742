//! Obstacle boundaries: terrain tracing and doodad folding

use bevy::prelude::*;

pub mod boundary_tracer;
pub mod doodad_obstacles;
pub mod obstacle_set;

pub use boundary_tracer::*;
pub use doodad_obstacles::*;
pub use obstacle_set::*;

/// Core trait for objects that contribute a rectangular obstacle
pub trait Obstacle {
    /// Current world position
    fn world_position(&self) -> IVec2;

    /// Offset from the top-left of the object to its position
    fn anchor(&self) -> IVec2 {
        IVec2::ZERO
    }

    /// Ground area `(ul, dr)` relative to `world_position() - anchor()`
    fn footprint(&self) -> (IVec2, IVec2);

    /// Footprint rectangle in world space
    fn world_bounds(&self) -> (IVec2, IVec2) {
        let base = self.world_position() - self.anchor();
        let (ul, dr) = self.footprint();
        (base + ul, base + dr)
    }
}

/// Ordered supply of dynamic obstacles for one level
pub trait DoodadSource {
    fn obstacles(&self) -> impl Iterator<Item = &dyn Obstacle>;
}

impl<D: Obstacle> DoodadSource for [D] {
    fn obstacles(&self) -> impl Iterator<Item = &dyn Obstacle> {
        self.iter().map(|d| d as &dyn Obstacle)
    }
}

impl<D: Obstacle> DoodadSource for Vec<D> {
    fn obstacles(&self) -> impl Iterator<Item = &dyn Obstacle> {
        self.as_slice().obstacles()
    }
}
