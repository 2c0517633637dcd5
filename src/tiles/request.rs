use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::error::TileFetchError;
use crate::core::geo::TileCoord;

/// Zoom epoch of the map; bumped every time the zoom level changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Generation {
        Generation(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen{}", self.0)
    }
}

/// A tile the map wants fetched, tagged with the generation it was issued in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub coord: TileCoord,
    pub url: String,
    pub generation: Generation,
}

/// Completed fetch travelling back to the map
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub coord: TileCoord,
    pub generation: Generation,
    pub result: Result<Arc<Vec<u8>>, TileFetchError>,
    pub elapsed: Duration,
}

impl FetchOutcome {
    pub fn success(request: &FetchRequest, data: Vec<u8>) -> Self {
        Self {
            coord: request.coord,
            generation: request.generation,
            result: Ok(Arc::new(data)),
            elapsed: Duration::ZERO,
        }
    }

    pub fn failure(request: &FetchRequest, error: TileFetchError) -> Self {
        Self {
            coord: request.coord,
            generation: request.generation,
            result: Err(error),
            elapsed: Duration::ZERO,
        }
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
