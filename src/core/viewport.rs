//! Pure viewport/tile geometry.
//!
//! Everything here works in world pixels at a single zoom level: the world is
//! `2^z * TILE_SIZE` pixels per side and the viewport is a box of the
//! viewport's size centered on the world-space center point. Nothing in this
//! module holds state or performs I/O.
//!
//! Visible tiles are selected by exact bounding-box intersection: tile column
//! `x` covers `[256x, 256(x+1))` and is visible iff that interval overlaps
//! `[left, right)` of the viewport. The same rule applies to rows.

use serde::{Deserialize, Serialize};

use crate::core::constants::TILE_SIZE;
use crate::core::geo::{tiles_per_side, world_size, PixelBounds, Point, Size, TileCoord};

/// Inclusive rectangle of tile indices at one zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRange {
    pub z: u8,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl TileRange {
    /// Number of tiles in the range
    pub fn len(&self) -> usize {
        let columns = (self.max_x - self.min_x) as usize + 1;
        let rows = (self.max_y - self.min_y) as usize + 1;
        columns * rows
    }

    /// A range always holds at least one tile
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, coord: &TileCoord) -> bool {
        coord.z == self.z
            && (self.min_x..=self.max_x).contains(&coord.x)
            && (self.min_y..=self.max_y).contains(&coord.y)
    }

    /// Grow the range by `margin` tiles on every side, clamped to the grid.
    pub fn expand(&self, margin: u32) -> TileRange {
        let last = tiles_per_side(self.z) - 1;
        TileRange {
            z: self.z,
            min_x: self.min_x.saturating_sub(margin),
            min_y: self.min_y.saturating_sub(margin),
            max_x: self.max_x.saturating_add(margin).min(last),
            max_y: self.max_y.saturating_add(margin).min(last),
        }
    }

    /// Tiles in row-major order (y outer, x inner)
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> {
        let TileRange { z, min_x, min_y, max_x, max_y } = *self;
        (min_y..=max_y).flat_map(move |y| (min_x..=max_x).map(move |x| TileCoord::new(x, y, z)))
    }

    pub fn to_vec(&self) -> Vec<TileCoord> {
        let mut tiles = Vec::with_capacity(self.len());
        tiles.extend(self.iter());
        tiles
    }
}

/// World-pixel box covered by a viewport of `size` centered on `center`
pub fn viewport_bounds(center: Point, size: Size) -> PixelBounds {
    PixelBounds::from_center(center, size.sanitized())
}

/// The tile range intersecting the viewport, or `None` when nothing is visible.
///
/// Returns `None` for a zero-area viewport, a non-finite center, or a viewport
/// lying entirely outside the world.
pub fn tile_range_for_viewport(zoom: u8, center: Point, size: Size) -> Option<TileRange> {
    let size = size.sanitized();
    if size.is_empty() || !center.is_finite() {
        return None;
    }

    let bounds = viewport_bounds(center, size);
    let extent = world_size(zoom);
    let world = PixelBounds::new(Point::default(), Point::new(extent, extent));
    if !bounds.intersects(&world) {
        return None;
    }

    let last = tiles_per_side(zoom) as i64 - 1;
    Some(TileRange {
        z: zoom,
        min_x: first_index(bounds.min.x, last),
        min_y: first_index(bounds.min.y, last),
        max_x: last_index(bounds.max.x, last),
        max_y: last_index(bounds.max.y, last),
    })
}

fn first_index(min: f64, last: i64) -> u32 {
    ((min / TILE_SIZE as f64).floor() as i64).clamp(0, last) as u32
}

fn last_index(max: f64, last: i64) -> u32 {
    ((max / TILE_SIZE as f64).ceil() as i64 - 1).clamp(0, last) as u32
}

/// Tiles visible in the viewport, row-major.
pub fn tiles_for_viewport(
    zoom: u8,
    center_x: f64,
    center_y: f64,
    viewport_width: f64,
    viewport_height: f64,
) -> Vec<TileCoord> {
    tile_range_for_viewport(
        zoom,
        Point::new(center_x, center_y),
        Size::new(viewport_width, viewport_height),
    )
    .map(|range| range.to_vec())
    .unwrap_or_default()
}

/// Top-left pixel at which a tile is drawn, with the viewport's geometric
/// center showing the world point `(center_x, center_y)`.
pub fn tile_position(
    tile_x: u32,
    tile_y: u32,
    center_x: f64,
    center_y: f64,
    viewport_width: f64,
    viewport_height: f64,
) -> Point {
    let tile = TILE_SIZE as f64;
    Point::new(
        tile_x as f64 * tile - center_x + viewport_width / 2.0,
        tile_y as f64 * tile - center_y + viewport_height / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(tiles: &[TileCoord]) -> Vec<(u32, u32)> {
        tiles.iter().map(|t| (t.x, t.y)).collect()
    }

    #[test]
    fn test_single_tile_world() {
        let tiles = tiles_for_viewport(0, 128.0, 128.0, 800.0, 600.0);
        assert_eq!(tiles, vec![TileCoord::new(0, 0, 0)]);
    }

    #[test]
    fn test_whole_world_visible_at_zoom_one() {
        let tiles = tiles_for_viewport(1, 256.0, 256.0, 800.0, 600.0);
        assert_eq!(coords(&tiles), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert!(tiles.iter().all(|t| t.z == 1));
    }

    #[test]
    fn test_edge_touching_tiles_are_excluded() {
        // Viewport spans exactly [256, 512) horizontally and vertically.
        let tiles = tiles_for_viewport(2, 384.0, 384.0, 256.0, 256.0);
        assert_eq!(coords(&tiles), vec![(1, 1)]);
    }

    #[test]
    fn test_partially_visible_edge_tiles_are_included() {
        let tiles = tiles_for_viewport(2, 384.0, 384.0, 258.0, 258.0);
        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles.first(), Some(&TileCoord::new(0, 0, 2)));
        assert_eq!(tiles.last(), Some(&TileCoord::new(2, 2, 2)));
    }

    #[test]
    fn test_empty_viewport_yields_no_tiles() {
        assert!(tiles_for_viewport(1, 256.0, 256.0, 0.0, 600.0).is_empty());
        assert!(tiles_for_viewport(1, 256.0, 256.0, -5.0, -5.0).is_empty());
        assert!(tiles_for_viewport(1, f64::NAN, 256.0, 100.0, 100.0).is_empty());
    }

    #[test]
    fn test_viewport_outside_world_yields_no_tiles() {
        assert!(tiles_for_viewport(1, -1000.0, 256.0, 100.0, 100.0).is_empty());
        assert!(tiles_for_viewport(1, 256.0, 5000.0, 100.0, 100.0).is_empty());
    }

    #[test]
    fn test_range_expand_is_clamped() {
        let range = tile_range_for_viewport(3, Point::new(128.0, 128.0), Size::new(10.0, 10.0))
            .expect("visible");
        assert_eq!((range.min_x, range.max_x), (0, 0));
        let expanded = range.expand(2);
        assert_eq!((expanded.min_x, expanded.min_y), (0, 0));
        assert_eq!((expanded.max_x, expanded.max_y), (2, 2));
        assert_eq!(expanded.len(), 9);
        assert!(expanded.contains(&TileCoord::new(2, 1, 3)));
        assert!(!expanded.contains(&TileCoord::new(2, 1, 2)));
    }

    #[test]
    fn test_tile_position() {
        let pos = tile_position(0, 0, 128.0, 128.0, 800.0, 600.0);
        assert_eq!(pos, Point::new(272.0, 172.0));

        let pos = tile_position(1, 1, 256.0, 256.0, 800.0, 600.0);
        assert_eq!(pos, Point::new(400.0, 300.0));
    }
}
