//! The accumulated set of tiles the map currently keeps mounted.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

use super::cache::TileCache;
use super::error::TileFetchError;
use super::request::Generation;
use crate::core::geo::TileCoord;

/// Load state of one accumulated tile
#[derive(Debug, Clone, PartialEq)]
pub enum TileStatus {
    /// Wanted, fetch not issued yet
    Pending,
    /// Fetch in flight
    Loading,
    Loaded(Arc<Vec<u8>>),
    Failed(TileFetchError),
}

impl TileStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileEntry {
    pub coord: TileCoord,
    pub status: TileStatus,
    /// Generation the entry was created in
    pub generation: Generation,
}

/// Per-status tally of the accumulated set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TileCounts {
    pub pending: usize,
    pub loading: usize,
    pub loaded: usize,
    pub failed: usize,
}

impl TileCounts {
    pub fn total(&self) -> usize {
        self.pending + self.loading + self.loaded + self.failed
    }
}

/// Tiles keyed by coordinate, never holding two entries for the same `(x, y, z)`.
///
/// Bounded by capacity; when full, the tile least recently seen in the
/// viewport is dropped first.
#[derive(Debug)]
pub struct TileSet {
    entries: LruCache<TileCoord, TileEntry>,
}

impl TileSet {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.entries.contains(coord)
    }

    pub fn get(&self, coord: &TileCoord) -> Option<&TileEntry> {
        self.entries.peek(coord)
    }

    pub(crate) fn get_mut(&mut self, coord: &TileCoord) -> Option<&mut TileEntry> {
        self.entries.peek_mut(coord)
    }

    /// Insert every coordinate not already present.
    ///
    /// Present coordinates are only marked as recently seen. New tiles found
    /// in `cache` start out loaded; the rest start pending. Returns the
    /// newly inserted coordinates.
    pub fn add(
        &mut self,
        coords: impl IntoIterator<Item = TileCoord>,
        generation: Generation,
        cache: &TileCache,
    ) -> Vec<TileCoord> {
        let mut added = Vec::new();
        for coord in coords {
            if self.entries.get(&coord).is_some() {
                continue;
            }
            let status = match cache.get(&coord) {
                Some(data) => TileStatus::Loaded(data),
                None => TileStatus::Pending,
            };
            let entry = TileEntry {
                coord,
                status,
                generation,
            };
            if let Some((evicted, _)) = self.entries.push(coord, entry) {
                log::debug!("tile set full, evicted {}", evicted);
            }
            added.push(coord);
        }
        added
    }

    /// Keep only tiles matching `keep`; returns the removed coordinates.
    pub fn retain(&mut self, mut keep: impl FnMut(&TileCoord) -> bool) -> Vec<TileCoord> {
        let doomed: Vec<TileCoord> = self
            .entries
            .iter()
            .map(|(coord, _)| *coord)
            .filter(|coord| !keep(coord))
            .collect();
        for coord in &doomed {
            self.entries.pop(coord);
        }
        doomed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileEntry> {
        self.entries.iter().map(|(_, entry)| entry)
    }

    /// Coordinates in row-major order, independent of recency
    pub fn coords(&self) -> Vec<TileCoord> {
        let mut coords: Vec<TileCoord> = self.entries.iter().map(|(coord, _)| *coord).collect();
        coords.sort_by_key(|c| (c.z, c.y, c.x));
        coords
    }

    pub fn pending(&self) -> Vec<TileCoord> {
        let mut coords: Vec<TileCoord> = self
            .iter()
            .filter(|entry| entry.status.is_pending())
            .map(|entry| entry.coord)
            .collect();
        coords.sort_by_key(|c| (c.z, c.y, c.x));
        coords
    }

    pub fn counts(&self) -> TileCounts {
        let mut counts = TileCounts::default();
        for entry in self.iter() {
            match entry.status {
                TileStatus::Pending => counts.pending += 1,
                TileStatus::Loading => counts.loading += 1,
                TileStatus::Loaded(_) => counts.loaded += 1,
                TileStatus::Failed(_) => counts.failed += 1,
            }
        }
        counts
    }
}
