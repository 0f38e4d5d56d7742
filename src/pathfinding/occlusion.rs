//! Line-of-sight queries against the obstacle boundary

use crate::errors::{NavError, NavResult};
use crate::pathfinding::geometry::Point;
use crate::pathfinding::graph::ObstacleGraph;

/// Decides whether the straight segment between two vertices is obstructed.
///
/// The visibility builder only ever calls this with `u != v`; implementations
/// may treat a zero-length query as an error.
pub trait SegmentOcclusion {
    fn fully_blocks(&self, u: Point, v: Point, obstacles: &ObstacleGraph) -> NavResult<bool>;
}

/// Any obstacle edge touching the closed segment blocks it, backfacing or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeOcclusion;

impl SegmentOcclusion for EdgeOcclusion {
    fn fully_blocks(&self, u: Point, v: Point, obstacles: &ObstacleGraph) -> NavResult<bool> {
        if u == v {
            return Err(NavError::DegenerateSegment { point: u });
        }
        Ok(obstacles.fully_blocks(u, v))
    }
}

impl<F> SegmentOcclusion for F
where
    F: Fn(Point, Point, &ObstacleGraph) -> NavResult<bool>,
{
    fn fully_blocks(&self, u: Point, v: Point, obstacles: &ObstacleGraph) -> NavResult<bool> {
        self(u, v, obstacles)
    }
}
