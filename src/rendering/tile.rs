//! What the map hands to whatever paints it.

use std::sync::Arc;

use crate::core::constants::TILE_SIZE;
use crate::core::geo::{Point, Size, TileCoord};
use crate::tiles::error::{TileErrorKind, TileFetchError};
use crate::tiles::set::{TileEntry, TileStatus};

/// Which surface size feeds the tile positioning transform
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PositionFrame {
    /// The viewport's geometric center shows the map center
    #[default]
    Viewport,
    /// A larger scroll container whose center shows the map center
    Container(Size),
}

/// Text drawn in place of a tile that failed to load
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlaceholder {
    pub kind: TileErrorKind,
    /// e.g. "Access Denied (403)"
    pub title: String,
    /// e.g. "Tile 2/1/3"
    pub label: String,
    pub hint: String,
}

impl TilePlaceholder {
    pub fn for_error(coord: TileCoord, error: &TileFetchError) -> Self {
        Self {
            kind: error.kind,
            title: error.message(),
            label: format!("Tile {}", coord),
            hint: error.hint().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TileContent {
    Loading,
    Image(Arc<Vec<u8>>),
    Failed(TilePlaceholder),
}

/// One tile positioned on the rendering surface
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTile {
    /// `"z-x-y"`, stable across frames
    pub tile_id: String,
    pub coord: TileCoord,
    /// Top-left corner in surface pixels
    pub position: Point,
    /// Edge length in pixels
    pub size: u32,
    /// Where the image comes from
    pub url: String,
    pub content: TileContent,
}

impl RenderTile {
    pub(crate) fn from_entry(entry: &TileEntry, position: Point, url: String) -> Self {
        let content = match &entry.status {
            TileStatus::Pending | TileStatus::Loading => TileContent::Loading,
            TileStatus::Loaded(data) => TileContent::Image(Arc::clone(data)),
            TileStatus::Failed(error) => {
                TileContent::Failed(TilePlaceholder::for_error(entry.coord, error))
            }
        };
        Self {
            tile_id: entry.coord.id(),
            coord: entry.coord,
            position,
            size: TILE_SIZE,
            url,
            content,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.content, TileContent::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::request::Generation;

    #[test]
    fn test_placeholder_text() {
        let coord = TileCoord::new(1, 3, 2);
        let placeholder = TilePlaceholder::for_error(coord, &TileFetchError::from_status(403));
        assert_eq!(placeholder.title, "Access Denied (403)");
        assert_eq!(placeholder.label, "Tile 2/1/3");
        assert_eq!(placeholder.hint, "Check your API token");
    }

    #[test]
    fn test_render_tile_from_entry() {
        let entry = TileEntry {
            coord: TileCoord::new(1, 0, 1),
            status: TileStatus::Loading,
            generation: Generation(0),
        };
        let tile = RenderTile::from_entry(&entry, Point::new(10.0, 20.0), "u".into());
        assert_eq!(tile.tile_id, "1-1-0");
        assert_eq!(tile.size, 256);
        assert!(tile.is_loading());
    }
}
