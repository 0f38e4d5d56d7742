//! Rectangular obstacles from doodads

use crate::pathfinding::geometry::{Corner, FootprintOffset};
use crate::pathfinding::obstacles::{DoodadSource, Obstacle, ObstacleSet};
use bevy::prelude::*;

/// Fold one doodad's fattened footprint into `set`.
///
/// Emits the four perimeter edges with the tracer's winding and tags all four
/// corners as convex. Overlapping doodads each keep their own rectangle.
pub fn fold_obstacle(obstacle: &dyn Obstacle, offset: &FootprintOffset, set: &mut ObstacleSet) {
    let (ul, dr) = obstacle.world_bounds();
    let u = ul + offset.fat_ul();
    let v = dr + offset.fat_dr();
    let uv = IVec2::new(u.x, v.y);
    let vu = IVec2::new(v.x, u.y);

    set.add_edge(u, uv);
    set.add_edge(uv, v);
    set.add_edge(v, vu);
    set.add_edge(vu, u);

    set.add_convex_corner(u, Corner::UpLeft);
    set.add_convex_corner(uv, Corner::DownLeft);
    set.add_convex_corner(v, Corner::DownRight);
    set.add_convex_corner(vu, Corner::UpRight);
}

/// Fold every doodad of a level into `set`
pub fn fold_doodads<S>(doodads: &S, offset: &FootprintOffset, set: &mut ObstacleSet)
where
    S: DoodadSource + ?Sized,
{
    let mut folded = 0;
    for obstacle in doodads.obstacles() {
        fold_obstacle(obstacle, offset, set);
        folded += 1;
    }
    debug!("Folded {folded} doodads into the obstacle set");
}
