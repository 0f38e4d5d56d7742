//! Integer geometry primitives shared by the obstacle tracer and the visibility builder

use crate::errors::{NavError, NavResult};
use bevy::prelude::*;

/// World pixel coordinate
pub type Point = IVec2;

/// One of the four corners of an axis-aligned rectangle (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Corner {
    /// Unit step from the corner out into free space
    pub fn diagonal(self) -> IVec2 {
        match self {
            Corner::UpLeft => IVec2::new(-1, -1),
            Corner::UpRight => IVec2::new(1, -1),
            Corner::DownLeft => IVec2::new(-1, 1),
            Corner::DownRight => IVec2::new(1, 1),
        }
    }

    /// The same corner after swapping the x and y axes
    pub fn transposed(self) -> Corner {
        match self {
            Corner::UpRight => Corner::DownLeft,
            Corner::DownLeft => Corner::UpRight,
            corner => corner,
        }
    }
}

/// Minkowski expansion applied to every obstacle boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FootprintOffset {
    fat_ul: IVec2,
    fat_dr: IVec2,
}

impl FootprintOffset {
    /// No fattening: the agent is a point
    pub const ZERO: FootprintOffset = FootprintOffset {
        fat_ul: IVec2::ZERO,
        fat_dr: IVec2::ZERO,
    };

    pub fn new(fat_ul: IVec2, fat_dr: IVec2) -> NavResult<Self> {
        if fat_ul.x > 0 || fat_ul.y > 0 || fat_dr.x < 0 || fat_dr.y < 0 {
            return Err(NavError::InvalidFootprint { fat_ul, fat_dr });
        }
        Ok(Self { fat_ul, fat_dr })
    }

    /// Mirror an agent footprint around its anchor.
    ///
    /// An agent anchored at `p` covers `p + ul ..= p + dr`, so it overlaps an
    /// obstacle `a ..= b` exactly when `p` lies in `a - dr ..= b - ul`.
    pub fn from_footprint(ul: IVec2, dr: IVec2) -> NavResult<Self> {
        Self::new(-dr, -ul)
    }

    pub fn fat_ul(&self) -> IVec2 {
        self.fat_ul
    }

    pub fn fat_dr(&self) -> IVec2 {
        self.fat_dr
    }

    pub fn fat_ur(&self) -> IVec2 {
        IVec2::new(self.fat_dr.x, self.fat_ul.y)
    }

    pub fn fat_dl(&self) -> IVec2 {
        IVec2::new(self.fat_ul.x, self.fat_dr.y)
    }

    pub fn corner(&self, corner: Corner) -> IVec2 {
        match corner {
            Corner::UpLeft => self.fat_ul,
            Corner::UpRight => self.fat_ur(),
            Corner::DownLeft => self.fat_dl(),
            Corner::DownRight => self.fat_dr,
        }
    }
}

impl Default for FootprintOffset {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Oriented segment of a fattened obstacle boundary.
///
/// `side_of(p) < 0` means `p` is on the solid side and `side_of(p) > 0` on the
/// free side. Walking `from -> to` with y pointing up, the solid side is on
/// the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObstacleEdge {
    pub from: Point,
    pub to: Point,
}

impl ObstacleEdge {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn is_degenerate(&self) -> bool {
        self.from == self.to
    }

    pub fn side_of(&self, point: Point) -> i64 {
        orientation(self.from, self.to, point)
    }

    /// True if the closed segment `a..b` touches this edge anywhere
    pub fn intersects(&self, a: Point, b: Point) -> bool {
        segments_intersect(self.from, self.to, a, b)
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.side_of(point) == 0 && within_bounds(self.from, self.to, point)
    }
}

/// Twice the signed area of the triangle `a, b, c`
#[inline]
pub fn orientation(a: Point, b: Point, c: Point) -> i64 {
    let ab = (b - a).as_i64vec2();
    let ac = (c - a).as_i64vec2();
    ab.x * ac.y - ab.y * ac.x
}

#[inline]
fn within_bounds(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Closed segment intersection, collinear overlap included.
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let d1 = orientation(q1, q2, p1).signum();
    let d2 = orientation(q1, q2, p2).signum();
    let d3 = orientation(p1, p2, q1).signum();
    let d4 = orientation(p1, p2, q2).signum();

    if d1 * d2 < 0 && d3 * d4 < 0 {
        return true;
    }

    (d1 == 0 && within_bounds(q1, q2, p1))
        || (d2 == 0 && within_bounds(q1, q2, p2))
        || (d3 == 0 && within_bounds(p1, p2, q1))
        || (d4 == 0 && within_bounds(p1, p2, q2))
}
