//! Free-standing world objects that block movement

use crate::errors::{NavError, NavResult};
use crate::pathfinding::obstacles::Obstacle;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// A renderable world object with a rectangular ground footprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doodad {
    pub name: String,
    pub position: IVec2,
    /// Sprite anchor; the footprint is relative to `position - anchor`
    pub anchor: IVec2,
    pub footprint_ul: IVec2,
    pub footprint_dr: IVec2,
}

impl Doodad {
    pub fn new(
        name: String,
        position: IVec2,
        anchor: IVec2,
        footprint_ul: IVec2,
        footprint_dr: IVec2,
    ) -> Self {
        Self {
            name,
            position,
            anchor,
            footprint_ul,
            footprint_dr,
        }
    }

    /// A doodad whose footprint is the rectangle `ul..dr` in world space
    pub fn rect(name: String, ul: IVec2, dr: IVec2) -> Self {
        Self::new(name, ul, IVec2::ZERO, IVec2::ZERO, dr - ul)
    }

    pub fn validate_footprint(&self) -> NavResult<()> {
        if self.footprint_ul.x > self.footprint_dr.x || self.footprint_ul.y > self.footprint_dr.y {
            return Err(NavError::InvertedDoodadFootprint {
                name: self.name.clone(),
                ul: self.footprint_ul,
                dr: self.footprint_dr,
            });
        }
        Ok(())
    }
}

impl Obstacle for Doodad {
    fn world_position(&self) -> IVec2 {
        self.position
    }

    fn anchor(&self) -> IVec2 {
        self.anchor
    }

    fn footprint(&self) -> (IVec2, IVec2) {
        (self.footprint_ul, self.footprint_dr)
    }
}
