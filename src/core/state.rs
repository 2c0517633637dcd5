use serde::{Deserialize, Serialize};

use crate::core::constants::{MAX_ZOOM, MIN_ZOOM};
use crate::core::geo::{world_size, PixelBounds, Point, Size, TileCoord};
use crate::core::viewport::{self, TileRange};

/// Zoom level, world-space center and viewport size of the map.
///
/// Only [`crate::core::map::TileMap`] mutates this; everyone else reads it
/// through a shared reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    zoom: u8,
    center: Point,
    size: Size,
}

impl ViewportState {
    /// Dead-center of the world at `zoom` (clamped to the zoom bounds).
    pub fn new(zoom: u8, size: Size) -> Self {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let half = world_size(zoom) / 2.0;
        Self {
            zoom,
            center: Point::new(half, half),
            size: size.sanitized(),
        }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn world_size(&self) -> f64 {
        world_size(self.zoom)
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom < MAX_ZOOM
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    /// World-pixel box currently shown
    pub fn bounds(&self) -> PixelBounds {
        viewport::viewport_bounds(self.center, self.size)
    }

    pub fn visible_range(&self) -> Option<TileRange> {
        viewport::tile_range_for_viewport(self.zoom, self.center, self.size)
    }

    pub fn visible_tiles(&self) -> Vec<TileCoord> {
        self.visible_range().map(|range| range.to_vec()).unwrap_or_default()
    }

    /// Drawing position of `coord` relative to a surface of `frame` size.
    pub fn tile_position_in(&self, coord: &TileCoord, frame: Size) -> Point {
        viewport::tile_position(
            coord.x,
            coord.y,
            self.center.x,
            self.center.y,
            frame.width,
            frame.height,
        )
    }

    pub fn tile_position(&self, coord: &TileCoord) -> Point {
        self.tile_position_in(coord, self.size)
    }

    /// The world doubles, so the center doubles with it.
    pub(crate) fn zoom_in(&mut self) -> bool {
        if !self.can_zoom_in() {
            return false;
        }
        self.zoom += 1;
        self.center = self.center.multiply(2.0);
        true
    }

    pub(crate) fn zoom_out(&mut self) -> bool {
        if !self.can_zoom_out() {
            return false;
        }
        self.zoom -= 1;
        self.center = self.center.multiply(0.5);
        true
    }

    /// Dragging right moves the visible world left: the center moves against the drag.
    pub(crate) fn pan(&mut self, delta_x: f64, delta_y: f64) -> bool {
        if !(delta_x.is_finite() && delta_y.is_finite()) {
            return false;
        }
        let extent = self.world_size();
        let center = Point::new(
            (self.center.x - delta_x).clamp(0.0, extent),
            (self.center.y - delta_y).clamp(0.0, extent),
        );
        if center == self.center {
            return false;
        }
        self.center = center;
        true
    }

    pub(crate) fn resize(&mut self, width: f64, height: f64) -> bool {
        let size = Size::new(width, height).sanitized();
        if size == self.size {
            return false;
        }
        self.size = size;
        true
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(MIN_ZOOM, Size::default())
    }
}
