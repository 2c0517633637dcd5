//! # tileview
//!
//! Viewport and tile engine for a small slippy map.
//!
//! A [`TileMap`] owns the zoom level, center and viewport size, works out
//! which 256px tiles are visible, and keeps an accumulated, deduplicated set
//! of tiles with their load state. Fetching runs in the background through a
//! [`TileLoader`]; painting is left to a [`rendering::RenderSurface`] or, with
//! the `egui` feature, to [`ui::TileMapWidget`].

pub mod core;
pub mod prelude;
pub mod rendering;
pub mod runtime;
pub mod tiles;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::MapConfig,
    geo::{PixelBounds, Point, Size, TileCoord},
    info::MapInfo,
    map::TileMap,
    state::ViewportState,
    viewport::{tile_position, tiles_for_viewport, TileRange},
};

pub use tiles::{
    FetchOutcome, FetchRequest, Generation, HttpTileFetcher, TileCache, TileErrorKind,
    TileFetchError, TileFetcher, TileLoader, TileLoaderConfig, TileServerSource, TileSource,
    TileStatus,
};

pub use rendering::{PositionFrame, RenderSurface, RenderTile, TileContent, TilePlaceholder};

#[cfg(feature = "egui")]
pub use ui::{TileMapWidget, TileTextures};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Install `env_logger` with an `info` default; `RUST_LOG` overrides it.
///
/// Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
