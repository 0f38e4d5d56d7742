use crate::errors::{NavError, NavResult};
use crate::pathfinding::obstacles::{DoodadSource, Obstacle};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationErrors};

pub mod doodad;
pub mod tile_grid;

pub use doodad::*;
pub use tile_grid::*;

/// Everything the navigation builder reads for one level
#[derive(Debug, Clone, Resource)]
pub struct LevelContext {
    pub grid: TileGrid,
    pub doodads: Vec<Doodad>,
}

impl LevelContext {
    pub fn new(grid: TileGrid, doodads: Vec<Doodad>) -> NavResult<Self> {
        for doodad in &doodads {
            doodad.validate_footprint()?;
        }
        Ok(Self { grid, doodads })
    }
}

impl DoodadSource for LevelContext {
    fn obstacles(&self) -> impl Iterator<Item = &dyn Obstacle> {
        self.doodads.obstacles()
    }
}

/// Serialized level: tile map plus the doodads placed on it
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LevelDefinition {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(range(min = 1, max = 4096))]
    pub width: u32,
    #[validate(range(min = 1, max = 4096))]
    pub height: u32,
    #[validate(range(min = 1, max = 256))]
    pub tile_size: i32,
    pub tiles: Vec<u8>, // Flattened 2D array (row-major)
    #[validate(length(min = 1, max = 256))]
    pub tile_infos: Vec<TileInfo>,
    pub doodads: Vec<Doodad>,
}

impl LevelDefinition {
    pub fn new(name: String, grid: &TileGrid, doodads: Vec<Doodad>) -> NavResult<Self> {
        let level = Self {
            name,
            width: grid.width(),
            height: grid.height(),
            tile_size: grid.tile_size(),
            tiles: grid.tiles().to_vec(),
            tile_infos: grid.tile_infos().to_vec(),
            doodads,
        };
        level.validate().map_err(|errors| validation_failed(&errors))?;
        Ok(level)
    }

    /// Check the grid and doodads and produce the builder's input
    pub fn to_context(&self) -> NavResult<LevelContext> {
        let grid = TileGrid::new(
            self.width,
            self.height,
            self.tile_size,
            self.tiles.clone(),
            self.tile_infos.clone(),
        )?;
        LevelContext::new(grid, self.doodads.clone())
    }

    pub fn into_context(self) -> NavResult<LevelContext> {
        let grid = TileGrid::new(
            self.width,
            self.height,
            self.tile_size,
            self.tiles,
            self.tile_infos,
        )?;
        LevelContext::new(grid, self.doodads)
    }

    /// Import a level from a grayscale PNG; each pixel's luma is its tile index
    pub fn from_png<P: AsRef<Path>>(
        path: P,
        name: String,
        tile_size: i32,
        tile_infos: Vec<TileInfo>,
    ) -> NavResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NavError::LevelFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let image = image::open(path)
            .map_err(|e| NavError::ImageImportFailed {
                reason: format!("{}: {e}", path.display()),
            })?
            .to_luma8();
        let (width, height) = image.dimensions();
        debug!("Imported {width}x{height} tile map from {}", path.display());

        let grid = TileGrid::new(width, height, tile_size, image.into_raw(), tile_infos)?;
        Self::new(name, &grid, Vec::new())
    }

    /// Get the levels directory path
    pub fn get_levels_dir() -> NavResult<PathBuf> {
        std::env::current_dir()
            .map_err(NavError::Io)
            .map(|dir| dir.join("levels"))
    }

    /// Load a level from the levels directory
    pub fn load_from_file<P: AsRef<Path>>(filename: P) -> NavResult<Self> {
        let file_path = Self::get_levels_dir()?.join(filename);

        if !file_path.exists() {
            return Err(NavError::LevelFileNotFound { path: file_path });
        }

        let data = std::fs::read(&file_path)?;

        let (level, _): (LevelDefinition, usize) =
            bincode::serde::decode_from_slice(&data, bincode::config::standard()).map_err(|e| {
                NavError::CorruptedLevelFile {
                    reason: format!("Failed to deserialize level data: {e}"),
                }
            })?;

        level.validate().map_err(|errors| validation_failed(&errors))?;

        info!("Loaded level '{}' from {}", level.name, file_path.display());
        Ok(level)
    }

    /// Save the level to the levels directory
    pub fn save_to_file<P: AsRef<Path>>(&self, filename: P) -> NavResult<PathBuf> {
        self.validate().map_err(|errors| validation_failed(&errors))?;

        let file_path = Self::get_levels_dir()?.join(filename);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data =
            bincode::serde::encode_to_vec(self, bincode::config::standard()).map_err(|e| {
                NavError::CorruptedLevelFile {
                    reason: format!("Failed to serialize level: {e}"),
                }
            })?;
        std::fs::write(&file_path, data)?;

        Ok(file_path)
    }
}

fn validation_failed(errors: &ValidationErrors) -> NavError {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            format!("{field}: {}", messages.join(", "))
        })
        .collect::<Vec<String>>()
        .join("; ");
    NavError::LevelValidationFailed { reason: details }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_level() -> LevelDefinition {
        let grid = TileGrid::from_rows(&["....", ".#..", "...."], 16).unwrap();
        LevelDefinition::new(
            "sample".to_string(),
            &grid,
            vec![Doodad::rect(
                "barrel".to_string(),
                IVec2::new(40, 4),
                IVec2::new(48, 10),
            )],
        )
        .unwrap()
    }

    #[test]
    fn test_level_to_context() {
        let level = sample_level();
        let context = level.to_context().unwrap();
        assert_eq!(context.grid.width(), 4);
        assert_eq!(context.grid.height(), 3);
        assert!(context.grid.is_blocking(IVec2::new(1, 1)));
        assert_eq!(context.obstacles().count(), 1);
    }

    #[test]
    fn test_level_validation_rejects_bad_tile_size() {
        let mut level = sample_level();
        level.tile_size = 0;
        assert!(level.validate().is_err());
        assert!(matches!(
            level.into_context(),
            Err(NavError::InvalidTileSize { size: 0 })
        ));
    }

    #[test]
    fn test_level_with_short_tile_array() {
        let mut level = sample_level();
        level.tiles.pop();
        assert!(matches!(
            level.to_context(),
            Err(NavError::NonRectangularGrid { expected: 12, actual: 11, .. })
        ));
    }

    #[test]
    fn test_context_rejects_inverted_doodad() {
        let grid = TileGrid::from_rows(&["..", ".."], 16).unwrap();
        let broken = Doodad::new(
            "broken".to_string(),
            IVec2::ZERO,
            IVec2::ZERO,
            IVec2::new(8, 8),
            IVec2::new(2, 2),
        );
        assert!(matches!(
            LevelContext::new(grid, vec![broken]),
            Err(NavError::InvertedDoodadFootprint { .. })
        ));
    }

    #[test]
    fn test_bincode_roundtrip_keeps_level() {
        let level = sample_level();
        let data = bincode::serde::encode_to_vec(&level, bincode::config::standard()).unwrap();
        let (decoded, _): (LevelDefinition, usize) =
            bincode::serde::decode_from_slice(&data, bincode::config::standard()).unwrap();
        assert_eq!(decoded.tiles, level.tiles);
        assert_eq!(decoded.tile_infos, level.tile_infos);
        assert_eq!(decoded.doodads, level.doodads);
    }

    #[test]
    fn test_png_import_uses_luma_as_tile_index() {
        let dir = std::env::temp_dir().join("tilenav_png_import");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("level.png");

        let mut image = image::GrayImage::new(3, 2);
        image.put_pixel(1, 0, image::Luma([1]));
        image.put_pixel(2, 1, image::Luma([2]));
        image.save(&path).unwrap();

        let infos = vec![
            TileInfo::open("grass"),
            TileInfo::wall("rock"),
            TileInfo::open("sand"),
        ];
        let level = LevelDefinition::from_png(&path, "imported".to_string(), 16, infos).unwrap();
        assert_eq!((level.width, level.height), (3, 2));
        assert_eq!(level.tiles, vec![0, 1, 0, 0, 0, 2]);

        let context = level.into_context().unwrap();
        assert!(context.grid.is_blocking(IVec2::new(1, 0)));
        assert!(!context.grid.is_blocking(IVec2::new(2, 1)));
    }

    #[test]
    fn test_png_import_reports_unknown_tile_index() {
        let dir = std::env::temp_dir().join("tilenav_png_unknown");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("level.png");

        let mut image = image::GrayImage::new(2, 2);
        image.put_pixel(0, 1, image::Luma([7]));
        image.save(&path).unwrap();

        let result = LevelDefinition::from_png(&path, "bad".to_string(), 16, vec![TileInfo::open("grass")]);
        assert!(matches!(
            result,
            Err(NavError::MissingTileInfo { index: 7, x: 0, y: 1, .. })
        ));
    }

    #[test]
    fn test_missing_png_is_reported() {
        let result = LevelDefinition::from_png(
            "/nonexistent/level.png",
            "missing".to_string(),
            16,
            vec![TileInfo::open("grass")],
        );
        assert!(matches!(result, Err(NavError::LevelFileNotFound { .. })));
    }
}
