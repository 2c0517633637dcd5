use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use crate::{MapError, Result};

/// A point in world or screen pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Pixel dimensions of a viewport or container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Negative and non-finite dimensions collapse to zero.
    pub fn sanitized(&self) -> Size {
        Size::new(sanitize_extent(self.width), sanitize_extent(self.height))
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Size {
    fn default() -> Self {
        let (width, height) = crate::core::constants::DEFAULT_VIEWPORT_SIZE;
        Self::new(width, height)
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Axis-aligned box in world pixels, half-open on the max side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelBounds {
    pub min: Point,
    pub max: Point,
}

impl PixelBounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Box of `size` centered on `center`
    pub fn from_center(center: Point, size: Size) -> Self {
        let half = size.center();
        Self::new(center.subtract(&half), center.add(&half))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Strict overlap test; boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &PixelBounds) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Stable identifier used as a render key, `"z-x-y"`
    pub fn id(&self) -> String {
        format!("{}-{}-{}", self.z, self.x, self.y)
    }

    /// Like [`TileCoord::new`], but rejects zooms outside the supported
    /// range and indices off the grid.
    pub fn try_new(x: u32, y: u32, z: u8) -> Result<Self> {
        let coord = Self::new(x, y, z);
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&z) || !coord.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "tile {} is not on the z{} grid",
                coord, z
            )));
        }
        Ok(coord)
    }

    /// Checks if the tile is valid for its zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = tiles_per_side(self.z);
        self.x < max_coord && self.y < max_coord
    }

    /// World-pixel box covered by this tile
    pub fn bounds(&self) -> PixelBounds {
        let size = TILE_SIZE as f64;
        let min = Point::new(self.x as f64 * size, self.y as f64 * size);
        PixelBounds::new(min, Point::new(min.x + size, min.y + size))
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Number of tiles along one side of the grid at `zoom`
pub fn tiles_per_side(zoom: u8) -> u32 {
    1u32 << zoom.min(31)
}

/// Side length of the square world in pixels at `zoom`
pub fn world_size(zoom: u8) -> f64 {
    tiles_per_side(zoom) as f64 * TILE_SIZE as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_coord_id_and_display() {
        let coord = TileCoord::new(3, 1, 2);
        assert_eq!(coord.id(), "2-3-1");
        assert_eq!(coord.to_string(), "2/3/1");
    }

    #[test]
    fn test_tile_coord_validity() {
        assert!(TileCoord::new(0, 0, 0).is_valid());
        assert!(!TileCoord::new(1, 0, 0).is_valid());
        assert!(TileCoord::new(7, 7, 3).is_valid());
        assert!(!TileCoord::new(8, 7, 3).is_valid());
    }

    #[test]
    fn test_try_new() {
        assert_eq!(TileCoord::try_new(3, 3, 2).unwrap(), TileCoord::new(3, 3, 2));
        assert!(matches!(
            TileCoord::try_new(4, 0, 2),
            Err(MapError::InvalidCoordinates(_))
        ));
        assert!(TileCoord::try_new(0, 0, MAX_ZOOM + 1).is_err());
    }

    #[test]
    fn test_world_size() {
        assert_eq!(world_size(0), 256.0);
        assert_eq!(world_size(1), 512.0);
        assert_eq!(world_size(3), 2048.0);
        assert_eq!(tiles_per_side(2), 4);
    }

    #[test]
    fn test_size_sanitized() {
        let size = Size::new(-10.0, f64::NAN).sanitized();
        assert_eq!(size, Size::new(0.0, 0.0));
        assert!(size.is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_bounds_intersection_is_strict() {
        let a = PixelBounds::new(Point::new(0.0, 0.0), Point::new(256.0, 256.0));
        let touching = PixelBounds::new(Point::new(256.0, 0.0), Point::new(512.0, 256.0));
        let overlapping = PixelBounds::new(Point::new(255.0, 10.0), Point::new(300.0, 20.0));
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(a.contains(&Point::new(0.0, 0.0)));
        assert!(!a.contains(&Point::new(256.0, 10.0)));
    }

    #[test]
    fn test_tile_bounds() {
        let bounds = TileCoord::new(1, 2, 2).bounds();
        assert_eq!(bounds.min, Point::new(256.0, 512.0));
        assert_eq!(bounds.max, Point::new(512.0, 768.0));
    }
}
