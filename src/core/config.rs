//! Map configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Zoom bounds and the tile size are constants, not configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_KEEP_BUFFER, DEFAULT_OVERSCAN, DEFAULT_TILE_CAPACITY,
    DEFAULT_TILE_SERVER_URL, MAX_ZOOM, MIN_TILE_CAPACITY, MIN_ZOOM,
};
use crate::core::geo::Size;
use crate::tiles::loader::TileLoaderConfig;
use crate::{MapError, Result};

/// Environment variable holding the tile server base URL
pub const ENV_TILE_SERVER_URL: &str = "TILEVIEW_TILE_SERVER_URL";
/// Environment variable holding the API token
pub const ENV_API_TOKEN: &str = "TILEVIEW_API_TOKEN";
/// Environment variable holding the initial zoom level
pub const ENV_INITIAL_ZOOM: &str = "TILEVIEW_INITIAL_ZOOM";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub initial_zoom: u8,
    pub base_url: String,
    pub token: String,
    /// Size assumed until the rendering surface reports its own
    pub viewport: Size,
    /// Tiles prefetched beyond each visible edge
    pub overscan: u32,
    /// Tiles further than this outside the visible range are dropped
    pub keep_buffer: u32,
    /// Maximum accumulated tile entries
    pub tile_capacity: usize,
    /// Maximum cached tile payloads
    pub cache_capacity: usize,
    pub loader: TileLoaderConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_zoom: MIN_ZOOM,
            base_url: DEFAULT_TILE_SERVER_URL.to_string(),
            token: String::new(),
            viewport: Size::default(),
            overscan: DEFAULT_OVERSCAN,
            keep_buffer: DEFAULT_KEEP_BUFFER,
            tile_capacity: DEFAULT_TILE_CAPACITY,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            loader: TileLoaderConfig::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Defaults overridden by the `TILEVIEW_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup; unset or empty values are skipped.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup(ENV_TILE_SERVER_URL) {
            self.base_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.token = token;
        }
        if let Some(zoom) = lookup(ENV_INITIAL_ZOOM) {
            self.initial_zoom = zoom.trim().parse().map_err(|_| {
                MapError::InvalidConfig(format!("{} must be an integer, got {:?}", ENV_INITIAL_ZOOM, zoom))
            })?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.initial_zoom) {
            return Err(MapError::InvalidConfig(format!(
                "initial_zoom {} outside [{}, {}]",
                self.initial_zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(MapError::InvalidConfig("base_url must not be empty".into()));
        }
        if self.cache_capacity == 0 {
            return Err(MapError::InvalidConfig("cache_capacity must be positive".into()));
        }
        // The whole grid at the deepest zoom has to fit, or visible tiles could be evicted.
        if self.tile_capacity < MIN_TILE_CAPACITY {
            return Err(MapError::InvalidConfig(format!(
                "tile_capacity ({}) must be at least {}",
                self.tile_capacity, MIN_TILE_CAPACITY
            )));
        }
        if self.keep_buffer < self.overscan {
            return Err(MapError::InvalidConfig(format!(
                "keep_buffer ({}) must be at least overscan ({})",
                self.keep_buffer, self.overscan
            )));
        }
        if self.loader.max_concurrent == 0 {
            return Err(MapError::InvalidConfig("loader.max_concurrent must be positive".into()));
        }
        Ok(())
    }
}
