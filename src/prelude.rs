//! Prelude module for common tileview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use tileview::prelude::*;`

pub use crate::core::{
    config::MapConfig,
    constants::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE},
    geo::{tiles_per_side, world_size, PixelBounds, Point, Size, TileCoord},
    info::MapInfo,
    map::TileMap,
    state::ViewportState,
    viewport::{tile_position, tiles_for_viewport, TileRange},
};

pub use crate::tiles::{
    CacheStats, FetchOutcome, FetchRequest, Generation, HttpTileFetcher, TileCache, TileCounts,
    TileErrorKind, TileFetchError, TileFetcher, TileLoader, TileLoaderConfig, TileServerSource,
    TileSource, TileStatus,
};

pub use crate::rendering::{
    PositionFrame, RecordingSurface, RenderSurface, RenderTile, TileContent, TilePlaceholder,
};

pub use crate::runtime::{runtime, spawn, AsyncHandle, AsyncSpawner};

#[cfg(feature = "egui")]
pub use crate::ui::{info_panel, zoom_controls, TileMapWidget, TileTextures};

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
