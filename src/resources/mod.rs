use crate::config::range_types::*;
use crate::errors::NavResult;
use crate::pathfinding::FootprintOffset;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Default renderer viewport; path edges never span more than this.
pub const DEFAULT_VIEWPORT: IVec2 = IVec2::new(267, 150);

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default)]
pub struct NavConfig {
    pub settings: NavSettings,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
// NOTE: When adding new fields, keep NavSettings::default in sync
pub struct NavSettings {
    // Span cull, owned by the renderer's viewport
    pub viewport_width: SpanExtent,
    pub viewport_height: SpanExtent,

    // Level settings
    pub tile_size: TileSize,
    pub level_file_path: String, // Path to level file relative to levels directory

    // Navigating agent footprint, relative to its anchor
    pub agent_footprint_ul: IVec2,
    pub agent_footprint_dr: IVec2,

    pub debug: bool,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            viewport_width: SpanExtent::new(DEFAULT_VIEWPORT.x),
            viewport_height: SpanExtent::new(DEFAULT_VIEWPORT.y),

            tile_size: TileSize::new(16),
            level_file_path: "level.bin".to_string(),

            agent_footprint_ul: IVec2::new(-4, -2),
            agent_footprint_dr: IVec2::new(4, 2),

            debug: false,
        }
    }
}

impl NavSettings {
    /// Largest per-axis extent of a single path edge
    pub fn max_span(&self) -> IVec2 {
        IVec2::new(self.viewport_width.get(), self.viewport_height.get())
    }

    /// Fattening offset for the configured agent footprint
    pub fn footprint_offset(&self) -> NavResult<FootprintOffset> {
        FootprintOffset::from_footprint(self.agent_footprint_ul, self.agent_footprint_dr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_span_matches_viewport() {
        let settings = NavSettings::default();
        assert_eq!(settings.max_span(), DEFAULT_VIEWPORT);
    }

    #[test]
    fn test_default_footprint_offset_is_mirrored() {
        let offset = NavSettings::default().footprint_offset().unwrap();
        assert_eq!(offset.fat_ul(), IVec2::new(-4, -2));
        assert_eq!(offset.fat_dr(), IVec2::new(4, 2));
    }

    #[test]
    fn test_config_toml_roundtrip_keeps_settings() {
        let mut config = NavConfig::default();
        config.settings.viewport_width = SpanExtent::new(320);
        config.settings.debug = true;

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: NavConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.settings.viewport_width.get(), 320);
        assert!(parsed.settings.debug);
        assert_eq!(parsed.settings.agent_footprint_ul, IVec2::new(-4, -2));
    }
}
