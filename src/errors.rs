use bevy::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    // Level-related errors
    #[error("Level file not found at path: {path}")]
    LevelFileNotFound { path: PathBuf },

    #[error("Corrupted level file: {reason}")]
    CorruptedLevelFile { reason: String },

    #[error("Level validation failed: {reason}")]
    LevelValidationFailed { reason: String },

    #[error("Failed to import level image: {reason}")]
    ImageImportFailed { reason: String },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // Grid and footprint preconditions
    #[error("Tile grid {width}x{height} expects {expected} tiles, got {actual}")]
    NonRectangularGrid {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Tile grid must have a non-zero size, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("Tile index {index} at ({x}, {y}) has no tile info ({known} known)")]
    MissingTileInfo {
        index: u8,
        x: u32,
        y: u32,
        known: usize,
    },

    #[error("Tile size must be positive, got {size}")]
    InvalidTileSize { size: i32 },

    #[error("Fattening offset has wrong signs: fat_ul={fat_ul} must be <= 0, fat_dr={fat_dr} must be >= 0")]
    InvalidFootprint { fat_ul: IVec2, fat_dr: IVec2 },

    #[error("Doodad '{name}' has an inverted footprint: ul={ul}, dr={dr}")]
    InvertedDoodadFootprint { name: String, ul: IVec2, dr: IVec2 },

    // Occlusion oracle failures
    #[error("Occlusion query on a zero-length segment at {point}")]
    DegenerateSegment { point: IVec2 },
}

/// Result type alias for all operations
pub type NavResult<T> = Result<T, NavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_error_display() {
        let err = NavError::NonRectangularGrid {
            width: 3,
            height: 3,
            expected: 9,
            actual: 8,
        };
        assert_eq!(
            err.to_string(),
            "Tile grid 3x3 expects 9 tiles, got 8"
        );

        let err = NavError::ConfigDirNotFound;
        assert_eq!(err.to_string(), "Failed to get config directory");

        let err = NavError::DegenerateSegment {
            point: IVec2::new(4, 5),
        };
        assert!(err.to_string().contains("zero-length"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: NavError = io.into();
        assert!(matches!(err, NavError::Io(_)));
    }
}
