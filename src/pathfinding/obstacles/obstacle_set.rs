//! Accumulator shared by the terrain tracer and the doodad folder

use crate::pathfinding::geometry::{Corner, Point};
use crate::pathfinding::graph::ObstacleGraph;
use std::collections::HashSet;

/// Obstacle edges plus the convex corners that may become path vertices
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    obstacles: ObstacleGraph,
    vertices: HashSet<Point>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an oriented boundary edge; zero-length edges are dropped
    pub fn add_edge(&mut self, from: Point, to: Point) {
        self.obstacles.add_edge(from, to);
    }

    /// Tag a convex corner, nudged one unit out into free space
    pub fn add_convex_corner(&mut self, corner_point: Point, corner: Corner) {
        self.vertices.insert(corner_point + corner.diagonal());
    }

    pub fn obstacles(&self) -> &ObstacleGraph {
        &self.obstacles
    }

    pub fn vertices(&self) -> &HashSet<Point> {
        &self.vertices
    }

    /// Vertices in a stable `(y, x)` order
    pub fn sorted_vertices(&self) -> Vec<Point> {
        let mut sorted: Vec<Point> = self.vertices.iter().copied().collect();
        sorted.sort_unstable_by_key(|p| (p.y, p.x));
        sorted
    }

    /// Get counts of (edges, vertices)
    pub fn counts(&self) -> (usize, usize) {
        (self.obstacles.num_edges(), self.vertices.len())
    }

    pub fn into_parts(self) -> (ObstacleGraph, HashSet<Point>) {
        (self.obstacles, self.vertices)
    }
}
