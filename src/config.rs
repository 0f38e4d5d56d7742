use crate::errors::{NavError, NavResult};
use crate::resources::NavConfig;
use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub mod range_types;

const CONFIG_DIR_NAME: &str = "tilenav";
const CONFIG_FILE_NAME: &str = "config.toml";

/// `<config dir>/tilenav/config.toml`, creating the directory if needed
pub fn get_config_path() -> NavResult<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or(NavError::ConfigDirNotFound)?
        .join(CONFIG_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load the user config, falling back to defaults when it is missing or unreadable
pub fn load_config() -> NavConfig {
    match get_config_path().and_then(|path| read_config(&path)) {
        Ok(Some(config)) => config,
        Ok(None) => NavConfig::default(),
        Err(err) => {
            warn!("Ignoring navigation config: {err}");
            NavConfig::default()
        }
    }
}

pub fn save_config(config: &NavConfig) -> NavResult<()> {
    write_config(&get_config_path()?, config)
}

/// `Ok(None)` if there is no file at `path`
pub fn read_config(path: &Path) -> NavResult<Option<NavConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    Ok(Some(toml::from_str(&contents)?))
}

pub fn write_config(path: &Path, config: &NavConfig) -> NavResult<()> {
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    debug!("Saved navigation config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::range_types::TileSize;

    #[test]
    fn test_write_then_read_config() {
        let dir = std::env::temp_dir().join("tilenav_config_roundtrip");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);

        let mut config = NavConfig::default();
        config.settings.tile_size = TileSize::new(32);
        write_config(&path, &config).unwrap();

        let loaded = read_config(&path).unwrap().unwrap();
        assert_eq!(loaded.settings.tile_size.get(), 32);
    }

    #[test]
    fn test_missing_config_reads_as_none() {
        let path = std::env::temp_dir().join("tilenav_config_missing/none.toml");
        assert!(read_config(&path).unwrap().is_none());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = std::env::temp_dir().join("tilenav_config_malformed");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, "settings = 5").unwrap();

        assert!(matches!(
            read_config(&path),
            Err(NavError::DeserializationFailed(_))
        ));
    }
}
