use super::tile::RenderTile;
use crate::core::geo::Size;

/// Something that can paint positioned tiles
pub trait RenderSurface {
    /// Called once before the tiles of a frame
    fn begin_frame(&mut self, _size: Size) {}

    fn draw_tile(&mut self, tile: &RenderTile);
}

/// Surface that keeps the last frame's tiles, for headless use and tests
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: Option<Size>,
    pub frames: usize,
    pub tiles: Vec<RenderTile>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tile(&self, tile_id: &str) -> Option<&RenderTile> {
        self.tiles.iter().find(|tile| tile.tile_id == tile_id)
    }
}

impl RenderSurface for RecordingSurface {
    fn begin_frame(&mut self, size: Size) {
        self.size = Some(size);
        self.frames += 1;
        self.tiles.clear();
    }

    fn draw_tile(&mut self, tile: &RenderTile) {
        self.tiles.push(tile.clone());
    }
}
