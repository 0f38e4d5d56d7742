use crate::errors::NavResult;
use crate::level::{LevelContext, TileSource};
use bevy::prelude::*;

pub mod geometry;
pub mod graph;
pub mod obstacles;
pub mod occlusion;
pub mod visibility;

pub use geometry::*;
pub use graph::*;
pub use obstacles::*;
pub use occlusion::*;
pub use visibility::*;

/// Obstacle boundary and path graph for one loaded level.
///
/// Built once per level and never mutated; a new level replaces the whole value.
#[derive(Debug, Clone, Resource)]
pub struct LevelNavigation {
    obstacles: ObstacleGraph,
    paths: PathGraph,
    vertices: Vec<Point>,
    offset: FootprintOffset,
    max_span: IVec2,
}

impl LevelNavigation {
    /// Build both graphs with the default edge occlusion test
    pub fn build(context: &LevelContext, offset: FootprintOffset, max_span: IVec2) -> NavResult<Self> {
        Self::build_with(&context.grid, context, offset, max_span, &EdgeOcclusion)
    }

    pub fn build_with<G, D, O>(
        grid: &G,
        doodads: &D,
        offset: FootprintOffset,
        max_span: IVec2,
        oracle: &O,
    ) -> NavResult<Self>
    where
        G: TileSource,
        D: DoodadSource + ?Sized,
        O: SegmentOcclusion + ?Sized,
    {
        let mut set = ObstacleSet::new();
        trace_boundaries(grid, &offset, &mut set);
        fold_doodads(doodads, &offset, &mut set);

        let vertices = set.sorted_vertices();
        let (obstacles, _) = set.into_parts();
        let paths = build_path_graph(&vertices, &obstacles, max_span, oracle)?;

        info!(
            "Built level navigation: {} obstacle edges, {} vertices, {} path edges",
            obstacles.num_edges(),
            vertices.len(),
            paths.num_edges()
        );

        Ok(Self {
            obstacles,
            paths,
            vertices,
            offset,
            max_span,
        })
    }

    pub fn obstacles(&self) -> &ObstacleGraph {
        &self.obstacles
    }

    pub fn paths(&self) -> &PathGraph {
        &self.paths
    }

    /// Convex corners in `(y, x)` order
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn offset(&self) -> FootprintOffset {
        self.offset
    }

    pub fn max_span(&self) -> IVec2 {
        self.max_span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{Doodad, TileGrid};
    use crate::resources::DEFAULT_VIEWPORT;

    fn context(rows: &[&str], doodads: Vec<Doodad>) -> LevelContext {
        LevelContext::new(TileGrid::from_rows(rows, 16).unwrap(), doodads).unwrap()
    }

    #[test]
    fn test_build_single_block_level() {
        let nav = LevelNavigation::build(
            &context(&["...", ".#.", "..."], vec![]),
            FootprintOffset::ZERO,
            DEFAULT_VIEWPORT,
        )
        .unwrap();

        // Only the block's four faces; the world edge is not an obstacle
        assert_eq!(nav.obstacles().num_edges(), 4);
        assert_eq!(nav.vertices().len(), 4);
        assert_eq!(nav.paths().num_edges(), 4);
        assert_eq!(nav.max_span(), DEFAULT_VIEWPORT);
        assert_eq!(nav.offset(), FootprintOffset::ZERO);
    }

    #[test]
    fn test_open_level_has_empty_graphs() {
        let nav = LevelNavigation::build(
            &context(&["...", "...", "..."], vec![]),
            FootprintOffset::ZERO,
            IVec2::new(10_000, 10_000),
        )
        .unwrap();

        assert_eq!(nav.obstacles().num_edges(), 0);
        assert!(nav.vertices().is_empty());
        assert_eq!(nav.paths().num_vertices(), 0);
        assert_eq!(nav.paths().num_edges(), 0);
    }

    #[test]
    fn test_vertices_are_sorted_and_complete() {
        let nav = LevelNavigation::build(
            &context(
                &["......", ".#..#.", "......", "..#..."],
                vec![Doodad::rect("rock".to_string(), IVec2::new(70, 50), IVec2::new(80, 56))],
            ),
            FootprintOffset::new(IVec2::new(-2, -2), IVec2::new(2, 2)).unwrap(),
            DEFAULT_VIEWPORT,
        )
        .unwrap();

        let vertices = nav.vertices();
        assert!(vertices.windows(2).all(|w| (w[0].y, w[0].x) < (w[1].y, w[1].x)));
        assert_eq!(nav.paths().num_vertices(), vertices.len());
        for &vertex in vertices {
            for edge in nav.obstacles().edges() {
                assert!(!edge.contains_point(vertex));
            }
        }
    }

    #[test]
    fn test_fattening_closes_narrow_gaps() {
        let rows = [".....", ".#.#.", "....."];
        let thin = LevelNavigation::build(&context(&rows, vec![]), FootprintOffset::ZERO, DEFAULT_VIEWPORT)
            .unwrap();
        // Blocks 16 apart; an agent 20 wide cannot fit between them
        let wide = LevelNavigation::build(
            &context(&rows, vec![]),
            FootprintOffset::from_footprint(IVec2::new(-10, -1), IVec2::new(10, 1)).unwrap(),
            DEFAULT_VIEWPORT,
        )
        .unwrap();

        let gap_top = (IVec2::new(33, 15), IVec2::new(47, 15));
        assert!(thin.paths().has_edge(gap_top.0, gap_top.1));
        assert!(wide.paths().num_edges() < thin.paths().num_edges());
    }

    #[test]
    fn test_rebuild_gives_identical_graphs() {
        let level = context(&["#..#", ".#..", "..#.", "#..."], vec![]);
        let offset = FootprintOffset::new(IVec2::new(-1, -2), IVec2::new(3, 1)).unwrap();
        let first = LevelNavigation::build(&level, offset, DEFAULT_VIEWPORT).unwrap();
        let second = LevelNavigation::build(&level, offset, DEFAULT_VIEWPORT).unwrap();
        assert_eq!(first.obstacles(), second.obstacles());
        assert_eq!(first.paths(), second.paths());
        assert_eq!(first.vertices(), second.vertices());
    }
}
