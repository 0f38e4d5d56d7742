//! Path graph over the convex corners

use crate::errors::NavResult;
use crate::pathfinding::geometry::Point;
use crate::pathfinding::graph::{ObstacleGraph, PathGraph};
use crate::pathfinding::occlusion::SegmentOcclusion;
use bevy::prelude::*;

/// True if `u` and `v` are close enough to share a screen of size `max_span`
#[inline]
pub fn within_span(u: Point, v: Point, max_span: IVec2) -> bool {
    let d = (u - v).abs();
    d.x <= max_span.x && d.y <= max_span.y
}

/// Connect every pair of vertices that is within `max_span` and not occluded.
///
/// Every vertex appears in the result, connected or not. Pairs are visited in
/// the order given, so sorted input gives a reproducible build.
pub fn build_path_graph<O>(
    vertices: &[Point],
    obstacles: &ObstacleGraph,
    max_span: IVec2,
    oracle: &O,
) -> NavResult<PathGraph>
where
    O: SegmentOcclusion + ?Sized,
{
    let mut paths = PathGraph::new();
    let mut span_culled = 0usize;
    let mut occluded = 0usize;

    for &vertex in vertices {
        paths.add_vertex(vertex);
    }

    for (i, &u) in vertices.iter().enumerate() {
        for &v in &vertices[i + 1..] {
            if u == v {
                continue;
            }
            if !within_span(u, v, max_span) {
                span_culled += 1;
                continue;
            }
            if oracle.fully_blocks(u, v, obstacles)? {
                occluded += 1;
                continue;
            }
            paths.add_edge(u, v);
        }
    }

    debug!(
        "Path graph: {} vertices, {} edges ({span_culled} out of span, {occluded} occluded)",
        paths.num_vertices(),
        paths.num_edges()
    );
    Ok(paths)
}
