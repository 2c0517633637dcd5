#[cfg(feature = "render")]
pub mod decode;
pub mod surface;
pub mod tile;

// Re-export main types
#[cfg(feature = "render")]
pub use decode::decode_tile;
pub use surface::{RecordingSurface, RenderSurface};
pub use tile::{PositionFrame, RenderTile, TileContent, TilePlaceholder};
