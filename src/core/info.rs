use serde::Serialize;
use std::fmt;

use crate::core::geo::{tiles_per_side, PixelBounds, Point, Size};
use crate::core::state::ViewportState;
use crate::core::viewport::TileRange;
use crate::tiles::cache::CacheStats;
use crate::tiles::request::Generation;
use crate::tiles::set::TileCounts;

/// Snapshot of the map for status displays and logs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapInfo {
    pub zoom: u8,
    /// Rounded to whole pixels
    pub center: Point,
    pub world_size: f64,
    pub tiles_per_side: u32,
    pub viewport: Size,
    pub bounds: PixelBounds,
    pub visible: Option<TileRange>,
    pub visible_count: usize,
    pub tiles: TileCounts,
    pub cache: CacheStats,
    pub generation: Generation,
}

impl MapInfo {
    pub fn new(
        state: &ViewportState,
        tiles: TileCounts,
        cache: CacheStats,
        generation: Generation,
    ) -> Self {
        let visible = state.visible_range();
        let center = state.center();
        Self {
            zoom: state.zoom(),
            center: Point::new(center.x.round(), center.y.round()),
            world_size: state.world_size(),
            tiles_per_side: tiles_per_side(state.zoom()),
            viewport: state.size(),
            bounds: state.bounds(),
            visible,
            visible_count: visible.map_or(0, |range| range.len()),
            tiles,
            cache,
            generation,
        }
    }
}

impl fmt::Display for MapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Zoom: {} ({}x{} tiles)", self.zoom, self.tiles_per_side, self.tiles_per_side)?;
        writeln!(f, "Center: {}, {}", self.center.x, self.center.y)?;
        writeln!(f, "World: {}px", self.world_size)?;
        writeln!(f, "Viewport: {}x{}", self.viewport.width.round(), self.viewport.height.round())?;
        match &self.visible {
            Some(range) => writeln!(
                f,
                "Visible: {} tiles (x {}..={}, y {}..={})",
                self.visible_count, range.min_x, range.max_x, range.min_y, range.max_y
            )?,
            None => writeln!(f, "Visible: none")?,
        }
        writeln!(
            f,
            "Tiles: {} loaded, {} loading, {} pending, {} failed",
            self.tiles.loaded, self.tiles.loading, self.tiles.pending, self.tiles.failed
        )?;
        write!(
            f,
            "Cache: {}/{} ({:.0}% hits)",
            self.cache.entries,
            self.cache.capacity,
            self.cache.hit_rate() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_for_initial_state() {
        let state = ViewportState::new(1, Size::new(800.0, 600.0));
        let info = MapInfo::new(&state, TileCounts::default(), CacheStats::default(), Generation(3));
        assert_eq!(info.tiles_per_side, 2);
        assert_eq!(info.world_size, 512.0);
        assert_eq!(info.visible_count, 4);
        assert_eq!(info.center, Point::new(256.0, 256.0));

        let text = info.to_string();
        assert!(text.starts_with("Zoom: 1 (2x2 tiles)"));
        assert!(text.contains("Visible: 4 tiles"));
    }

    #[test]
    fn test_info_serializes() {
        let state = ViewportState::new(0, Size::new(0.0, 0.0));
        let info = MapInfo::new(
            &state,
            TileCounts::default(),
            CacheStats::default(),
            Generation::default(),
        );
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["zoom"], 0);
        assert!(json["visible"].is_null());
        assert_eq!(json["visible_count"], 0);
    }
}
