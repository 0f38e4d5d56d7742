//! Immutable per-level blocking map

use crate::errors::{NavError, NavResult};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Properties of one tile index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInfo {
    pub name: String,
    pub blocking: bool, // Agents cannot walk through
}

/// Returned for every query outside the grid
static WORLD_EDGE: TileInfo = TileInfo {
    name: String::new(),
    blocking: true,
};

impl TileInfo {
    pub fn new(name: impl Into<String>, blocking: bool) -> Self {
        Self {
            name: name.into(),
            blocking,
        }
    }

    pub fn open(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn wall(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// The blocking sentinel standing in for everything beyond the world edge
    pub fn world_edge() -> &'static TileInfo {
        &WORLD_EDGE
    }
}

/// Read-only view of a blocking map, in tile coordinates.
pub trait TileSource {
    /// Grid size in tiles
    fn size(&self) -> UVec2;

    /// Edge length of a tile in world pixels
    fn tile_size(&self) -> i32;

    /// Out-of-range cells must report blocking.
    fn is_blocking(&self, cell: IVec2) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_size: i32,
    tiles: Vec<u8>,           // tile index at (x, y) is tiles[x + y * width]
    tile_infos: Vec<TileInfo>, // info for tile index
}

impl TileGrid {
    /// Build a grid, rejecting anything the tracer could not walk safely
    pub fn new(
        width: u32,
        height: u32,
        tile_size: i32,
        tiles: Vec<u8>,
        tile_infos: Vec<TileInfo>,
    ) -> NavResult<Self> {
        if width == 0 || height == 0 {
            return Err(NavError::EmptyGrid { width, height });
        }
        if tile_size <= 0 {
            return Err(NavError::InvalidTileSize { size: tile_size });
        }

        let expected = width as usize * height as usize;
        if tiles.len() != expected {
            return Err(NavError::NonRectangularGrid {
                width,
                height,
                expected,
                actual: tiles.len(),
            });
        }

        if let Some((i, &index)) = tiles
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= tile_infos.len())
        {
            return Err(NavError::MissingTileInfo {
                index,
                x: (i % width as usize) as u32,
                y: (i / width as usize) as u32,
                known: tile_infos.len(),
            });
        }

        Ok(Self {
            width,
            height,
            tile_size,
            tiles,
            tile_infos,
        })
    }

    /// Build a grid from rows of text, `#` blocking and anything else open
    pub fn from_rows(rows: &[&str], tile_size: i32) -> NavResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.chars().count()) as u32;
        let tiles = rows
            .iter()
            .flat_map(|row| row.chars().map(|c| u8::from(c == '#')))
            .collect();
        Self::new(
            width,
            height,
            tile_size,
            tiles,
            vec![TileInfo::open("floor"), TileInfo::wall("wall")],
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn tile_infos(&self) -> &[TileInfo] {
        &self.tile_infos
    }

    /// Tile info at tile coordinates
    pub fn tile(&self, x: i32, y: i32) -> &TileInfo {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return TileInfo::world_edge();
        }
        let index = self.tiles[x as usize + y as usize * self.width as usize];
        &self.tile_infos[index as usize]
    }

    /// Tile info at a world coordinate
    pub fn query(&self, world: IVec2) -> &TileInfo {
        let cell = world.div_euclid(IVec2::splat(self.tile_size));
        self.tile(cell.x, cell.y)
    }

    /// World size in pixels
    pub fn world_size(&self) -> IVec2 {
        self.size().as_ivec2() * self.tile_size
    }

    pub fn blocked_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|&&index| self.tile_infos[index as usize].blocking)
            .count()
    }
}

impl TileSource for TileGrid {
    fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    fn tile_size(&self) -> i32 {
        self.tile_size
    }

    fn is_blocking(&self, cell: IVec2) -> bool {
        self.tile(cell.x, cell.y).blocking
    }
}
