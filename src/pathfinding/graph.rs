//! Edge containers for the obstacle boundary and the path network

use crate::pathfinding::geometry::{ObstacleEdge, Point};
use bevy::prelude::*;
use pathfinding::prelude::connected_components;
use std::collections::{HashMap, HashSet};

/// Directed adjacency set keyed by world point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: HashMap<Point, HashSet<Point>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: Point) {
        self.adjacency.entry(vertex).or_default();
    }

    /// Returns false if the edge was already present
    pub fn add_edge(&mut self, u: Point, v: Point) -> bool {
        self.add_vertex(v);
        self.adjacency.entry(u).or_default().insert(v)
    }

    pub fn has_edge(&self, u: Point, v: Point) -> bool {
        self.adjacency.get(&u).is_some_and(|n| n.contains(&v))
    }

    pub fn neighbours(&self, u: Point) -> impl Iterator<Item = Point> + '_ {
        self.adjacency.get(&u).into_iter().flatten().copied()
    }

    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(&u, n)| n.iter().map(move |&v| (u, v)))
    }

    pub fn num_edges(&self) -> usize {
        self.adjacency.values().map(HashSet::len).sum()
    }
}

/// Oriented edges of every fattened obstacle, used for occlusion queries only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObstacleGraph {
    graph: Graph,
}

impl ObstacleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-length edges are dropped; returns whether the edge was stored.
    pub fn add_edge(&mut self, from: Point, to: Point) -> bool {
        if from == to {
            trace!("Skipping degenerate obstacle edge at {from}");
            return false;
        }
        self.graph.add_edge(from, to)
    }

    pub fn edges(&self) -> impl Iterator<Item = ObstacleEdge> + '_ {
        self.graph.edges().map(|(from, to)| ObstacleEdge::new(from, to))
    }

    pub fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    pub fn has_edge(&self, from: Point, to: Point) -> bool {
        self.graph.has_edge(from, to)
    }

    /// True if any edge intersects `u..v`, whichever way it faces.
    ///
    /// Backfacing edges count, so a point inside one obstacle's fattened
    /// boundary cannot see out of it.
    pub fn fully_blocks(&self, u: Point, v: Point) -> bool {
        self.edges().any(|edge| edge.intersects(u, v))
    }
}

/// Undirected network of straight, unobstructed hops between convex corners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathGraph {
    graph: Graph,
}

impl PathGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: Point) {
        self.graph.add_vertex(vertex);
    }

    pub fn add_edge(&mut self, u: Point, v: Point) -> bool {
        let added = self.graph.add_edge(u, v);
        self.graph.add_edge(v, u);
        added
    }

    pub fn has_edge(&self, u: Point, v: Point) -> bool {
        self.graph.has_edge(u, v)
    }

    pub fn neighbours(&self, u: Point) -> impl Iterator<Item = Point> + '_ {
        self.graph.neighbours(u)
    }

    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.graph.vertices()
    }

    pub fn num_vertices(&self) -> usize {
        self.graph.num_vertices()
    }

    /// Each undirected edge once, lower `(y, x)` endpoint first
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.graph
            .edges()
            .filter(|(u, v)| (u.y, u.x) < (v.y, v.x))
    }

    pub fn num_edges(&self) -> usize {
        self.graph.num_edges() / 2
    }

    /// Groups of mutually reachable vertices, isolated vertices included
    pub fn components(&self) -> Vec<HashSet<Point>> {
        let starts: Vec<Point> = self.vertices().collect();
        connected_components(&starts, |&u| self.neighbours(u).collect::<Vec<_>>())
    }
}
