use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// A tile edge length in world pixels constrained to [1, 256]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
pub struct TileSize(i32);

impl TileSize {
    const MIN: i32 = 1;
    const MAX: i32 = 256;

    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self::new(16)
    }
}

/// A span cull extent in world pixels constrained to [1, 8192]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
pub struct SpanExtent(i32);

impl SpanExtent {
    const MIN: i32 = 1;
    const MAX: i32 = 8192;

    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl Default for SpanExtent {
    fn default() -> Self {
        Self::new(267)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_size_clamping() {
        assert_eq!(TileSize::new(0).get(), 1);
        assert_eq!(TileSize::new(-8).get(), 1);
        assert_eq!(TileSize::new(32).get(), 32);
        assert_eq!(TileSize::new(1000).get(), 256);
        assert_eq!(TileSize::default().get(), 16);
    }

    #[test]
    fn test_span_extent_clamping() {
        assert_eq!(SpanExtent::new(0).get(), 1);
        assert_eq!(SpanExtent::new(150).get(), 150);
        assert_eq!(SpanExtent::new(100_000).get(), 8192);
    }

    #[test]
    fn test_range_type_display() {
        assert_eq!(TileSize::new(24).to_string(), "24");
        assert_eq!(SpanExtent::new(267).to_string(), "267");
    }
}
