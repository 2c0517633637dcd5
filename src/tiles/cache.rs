use lru::LruCache;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use crate::core::constants::DEFAULT_CACHE_CAPACITY;
use crate::core::geo::TileCoord;

/// Hit/miss counters and occupancy of a [`TileCache`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

#[derive(Debug)]
struct Store {
    tiles: LruCache<TileCoord, Arc<Vec<u8>>>,
    hits: u64,
    misses: u64,
}

/// Payloads of successfully fetched tiles, least recently used evicted first.
///
/// Failures never enter the cache. Clones share the same storage, so a
/// cache can outlive the map that filled it.
#[derive(Debug, Clone)]
pub struct TileCache {
    store: Arc<Mutex<Store>>,
}

impl TileCache {
    /// Capacity is raised to one if zero
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(Mutex::new(Store {
                tiles: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            })),
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }

    /// Look a tile up, counting the hit or miss and refreshing its recency
    pub fn get(&self, coord: &TileCoord) -> Option<Arc<Vec<u8>>> {
        let mut store = self.store.lock().ok()?;
        let found = store.tiles.get(coord).cloned();
        if found.is_some() {
            store.hits += 1;
        } else {
            store.misses += 1;
        }
        found
    }

    pub fn put(&self, coord: TileCoord, data: Arc<Vec<u8>>) {
        if let Ok(mut store) = self.store.lock() {
            if let Some((evicted, _)) = store.tiles.push(coord, data) {
                if evicted != coord {
                    log::debug!("tile cache full, dropped {}", evicted);
                }
            }
        }
    }

    /// Presence check that leaves recency and counters alone
    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.store
            .lock()
            .is_ok_and(|store| store.tiles.contains(coord))
    }

    pub fn remove(&self, coord: &TileCoord) -> Option<Arc<Vec<u8>>> {
        self.store.lock().ok()?.tiles.pop(coord)
    }

    pub fn clear(&self) {
        if let Ok(mut store) = self.store.lock() {
            store.tiles.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.store.lock().map_or(0, |store| store.tiles.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.store.lock().map_or(0, |store| store.tiles.cap().get())
    }

    pub fn stats(&self) -> CacheStats {
        self.store
            .lock()
            .map(|store| CacheStats {
                entries: store.tiles.len(),
                capacity: store.tiles.cap().get(),
                hits: store.hits,
                misses: store.misses,
            })
            .unwrap_or_default()
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_remove() {
        let cache = TileCache::new(4);
        let tile = TileCoord::new(1, 0, 1);
        assert!(cache.is_empty());

        cache.put(tile, Arc::new(vec![1, 2, 3]));
        assert!(cache.contains(&tile));
        assert_eq!(cache.get(&tile).as_deref(), Some(&vec![1, 2, 3]));
        assert_eq!(cache.remove(&tile).map(|d| d.len()), Some(3));
        assert!(cache.get(&tile).is_none());

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_least_recently_used_goes_first() {
        let cache = TileCache::new(2);
        let a = TileCoord::new(0, 0, 1);
        let b = TileCoord::new(1, 0, 1);
        let c = TileCoord::new(0, 1, 1);

        cache.put(a, Arc::new(vec![1]));
        cache.put(b, Arc::new(vec![2]));
        assert!(cache.get(&a).is_some());
        cache.put(c, Arc::new(vec![3]));

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&a));
        assert!(!cache.contains(&b));
        assert!(cache.contains(&c));
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = TileCache::new(0);
        assert_eq!(cache.capacity(), 1);
        let shared = cache.clone();
        shared.put(TileCoord::new(0, 0, 0), Arc::new(vec![9]));
        assert!(cache.contains(&TileCoord::new(0, 0, 0)));
        cache.clear();
        assert!(shared.is_empty());
    }
}
