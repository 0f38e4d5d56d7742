//! Fattened terrain boundaries from a blocking tile map
//!
//! Each scan line between two rows (or two columns) of tiles is walked once,
//! tracking whether the tile on the near side (above / left) and on the far
//! side (below / right) blocks. A change in either marks a corner of a
//! boundary run. The column pass is the row pass on the transposed grid, with
//! corner offsets transposed and edges reversed so both passes share one
//! winding: the solid side of every edge is where `side_of < 0`.
//!
//! Runs still open when a scan line ends are dropped, so the world edge itself
//! never becomes an obstacle.

use crate::level::TileSource;
use crate::pathfinding::geometry::{Corner, FootprintOffset, Point};
use crate::pathfinding::obstacles::ObstacleSet;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanAxis {
    Rows,
    Columns,
}

impl ScanAxis {
    /// Tile coordinates of `step` along scan line `line`
    fn cell(self, line: i32, step: i32) -> IVec2 {
        match self {
            ScanAxis::Rows => IVec2::new(step, line),
            ScanAxis::Columns => IVec2::new(line, step),
        }
    }

    /// (number of tile lines, tiles per line)
    fn extent(self, size: UVec2) -> (i32, i32) {
        let size = size.as_ivec2();
        match self {
            ScanAxis::Rows => (size.y, size.x),
            ScanAxis::Columns => (size.x, size.y),
        }
    }

    fn corner(self, corner: Corner) -> Corner {
        match self {
            ScanAxis::Rows => corner,
            ScanAxis::Columns => corner.transposed(),
        }
    }

    fn emit(self, set: &mut ObstacleSet, from: Point, to: Point) {
        match self {
            ScanAxis::Rows => set.add_edge(from, to),
            ScanAxis::Columns => set.add_edge(to, from),
        }
    }
}

/// Trace every blocked region of `grid` into `set`.
pub fn trace_boundaries(grid: &impl TileSource, offset: &FootprintOffset, set: &mut ObstacleSet) {
    for axis in [ScanAxis::Rows, ScanAxis::Columns] {
        let (edges_before, vertices_before) = set.counts();
        trace_axis(grid, offset, axis, set);
        let (edges, vertices) = set.counts();
        debug!(
            "{axis:?} pass: {} obstacle edges, {} convex corners",
            edges - edges_before,
            vertices - vertices_before
        );
    }
}

fn trace_axis(grid: &impl TileSource, offset: &FootprintOffset, axis: ScanAxis, set: &mut ObstacleSet) {
    let tile_size = grid.tile_size();
    let (lines, steps) = axis.extent(grid.size());

    for line in 0..=lines {
        // Everything before the first tile is world edge
        let (mut near, mut far) = (true, true);
        let mut origin = Point::ZERO;

        for step in 0..steps {
            let now_near = grid.is_blocking(axis.cell(line - 1, step));
            let now_far = grid.is_blocking(axis.cell(line, step));
            if now_near == near && now_far == far {
                continue;
            }

            let tile_corner = axis.cell(line, step) * tile_size;
            let fattened = |corner: Corner| tile_corner + offset.corner(axis.corner(corner));

            // Close a run with solid on the near side
            if near && !far {
                if now_far {
                    // concave
                    axis.emit(set, origin, fattened(Corner::DownLeft));
                } else {
                    let end = fattened(Corner::DownRight);
                    axis.emit(set, origin, end);
                    set.add_convex_corner(end, axis.corner(Corner::DownRight));
                }
            }

            // Close a run with solid on the far side
            if !near && far {
                if now_near {
                    // concave
                    axis.emit(set, fattened(Corner::UpLeft), origin);
                } else {
                    let end = fattened(Corner::UpRight);
                    axis.emit(set, end, origin);
                    set.add_convex_corner(end, axis.corner(Corner::UpRight));
                }
            }

            // Open a run with solid on the near side
            if now_near && !now_far {
                origin = if far {
                    // concave
                    fattened(Corner::DownRight)
                } else {
                    let start = fattened(Corner::DownLeft);
                    set.add_convex_corner(start, axis.corner(Corner::DownLeft));
                    start
                };
            }

            // Open a run with solid on the far side
            if !now_near && now_far {
                origin = if near {
                    // concave
                    fattened(Corner::UpRight)
                } else {
                    let start = fattened(Corner::UpLeft);
                    set.add_convex_corner(start, axis.corner(Corner::UpLeft));
                    start
                };
            }

            near = now_near;
            far = now_far;
        }
    }
}
