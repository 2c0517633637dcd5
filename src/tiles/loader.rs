use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use super::fetcher::TileFetcher;
use super::request::{FetchOutcome, FetchRequest, Generation};
use crate::core::geo::TileCoord;
use crate::core::map::TileMap;
use crate::prelude::{Arc, HashMap, Instant};
use crate::runtime::{self, AsyncHandle};

/// Configuration for the tile loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLoaderConfig {
    /// Maximum concurrent tile downloads
    pub max_concurrent: usize,
    /// Per-request timeout
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for TileLoaderConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 6,
            timeout_secs: 30,
            user_agent: format!("tileview/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Configuration presets for TileLoaderConfig
impl TileLoaderConfig {
    pub fn low_resource() -> Self {
        Self {
            max_concurrent: 2,
            timeout_secs: 60,
            ..Self::default()
        }
    }

    pub fn high_performance() -> Self {
        Self {
            max_concurrent: 16,
            timeout_secs: 15,
            ..Self::default()
        }
    }

    pub fn for_testing() -> Self {
        Self {
            max_concurrent: 4,
            timeout_secs: 5,
            ..Self::default()
        }
    }
}

struct InFlight {
    /// Sequence number of the task, unique per loader
    task: u64,
    generation: Generation,
    handle: Box<dyn AsyncHandle>,
}

/// Background tile loader with bounded concurrency.
///
/// Every queued request runs as its own task; finished fetches come back
/// through a channel that the owner drains once per frame. The loader never
/// touches map state itself, so a late result can at worst be rejected by
/// [`TileMap::apply_fetch_result`].
pub struct TileLoader {
    fetcher: Arc<dyn TileFetcher>,
    config: TileLoaderConfig,
    permits: Arc<Semaphore>,
    result_tx: Sender<(u64, FetchOutcome)>,
    result_rx: Receiver<(u64, FetchOutcome)>,
    in_flight: HashMap<TileCoord, InFlight>,
    next_task: u64,
}

impl TileLoader {
    pub fn new(fetcher: Arc<dyn TileFetcher>, config: TileLoaderConfig) -> Self {
        let (result_tx, result_rx) = unbounded();
        let permits = Arc::new(Semaphore::new(config.max_concurrent.max(1)));
        Self {
            fetcher,
            config,
            permits,
            result_tx,
            result_rx,
            in_flight: HashMap::default(),
            next_task: 0,
        }
    }

    pub fn config(&self) -> &TileLoaderConfig {
        &self.config
    }

    /// Start fetching a tile. Must be called from within the async runtime.
    ///
    /// Returns `false` when the same tile is already in flight for the same
    /// generation. A request from an older generation is superseded.
    pub fn queue(&mut self, request: FetchRequest) -> bool {
        if let Some(existing) = self.in_flight.get(&request.coord) {
            if existing.generation == request.generation && !existing.handle.is_finished() {
                log::debug!("skipping duplicate tile request {}", request.coord);
                return false;
            }
            existing.handle.cancel();
        }

        let coord = request.coord;
        let generation = request.generation;
        let task = self.next_task;
        self.next_task = self.next_task.wrapping_add(1);
        let fetcher = Arc::clone(&self.fetcher);
        let permits = Arc::clone(&self.permits);
        let result_tx = self.result_tx.clone();

        let handle = runtime::spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };
            let started = Instant::now();
            let outcome = match fetcher.fetch(&request.url).await {
                Ok(data) => {
                    log::debug!("downloaded tile {} ({} bytes)", request.coord, data.len());
                    FetchOutcome::success(&request, data)
                }
                Err(e) => FetchOutcome::failure(&request, e),
            };
            let _ = result_tx.send((task, outcome.with_elapsed(started.elapsed())));
        });

        self.in_flight.insert(
            coord,
            InFlight {
                task,
                generation,
                handle,
            },
        );
        true
    }

    /// Queue a batch; returns how many were actually started
    pub fn queue_all(&mut self, requests: impl IntoIterator<Item = FetchRequest>) -> usize {
        requests
            .into_iter()
            .map(|request| self.queue(request))
            .filter(|started| *started)
            .count()
    }

    /// Try to receive completed tile results (non-blocking)
    pub fn try_recv_results(&mut self) -> Vec<FetchOutcome> {
        let mut results = Vec::new();
        while let Ok((task, outcome)) = self.result_rx.try_recv() {
            // A re-queued tile has a newer task under the same key; leave it tracked.
            let finished = self
                .in_flight
                .get(&outcome.coord)
                .is_some_and(|f| f.task == task);
            if finished {
                self.in_flight.remove(&outcome.coord);
            }
            results.push(outcome);
        }
        results
    }

    /// Abort in-flight fetches matching `unwanted`; returns how many were cancelled
    pub fn cancel_where(&mut self, mut unwanted: impl FnMut(&TileCoord, Generation) -> bool) -> usize {
        let before = self.in_flight.len();
        self.in_flight.retain(|coord, in_flight| {
            if unwanted(coord, in_flight.generation) {
                in_flight.handle.cancel();
                false
            } else {
                true
            }
        });
        let cancelled = before - self.in_flight.len();
        if cancelled > 0 {
            log::debug!("cancelled {} tile fetches", cancelled);
        }
        cancelled
    }

    /// Abort fetches for tiles the map has dropped or superseded
    pub fn cancel_unwanted(&mut self, map: &TileMap) -> usize {
        self.cancel_where(|coord, generation| !map.is_wanted(coord, generation))
    }

    pub fn cancel_all(&mut self) {
        for (_, in_flight) in self.in_flight.drain() {
            in_flight.handle.cancel();
        }
    }

    /// Fetches queued or running
    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty() && self.result_rx.is_empty()
    }

    /// One frame of loader bookkeeping: apply finished results, drop
    /// unwanted fetches, start fetches for newly wanted tiles.
    ///
    /// Returns the number of results the map accepted.
    pub fn sync(&mut self, map: &mut TileMap) -> usize {
        let mut applied = 0;
        for outcome in self.try_recv_results() {
            if map.apply_fetch_result(outcome) {
                applied += 1;
            }
        }
        self.cancel_unwanted(map);
        self.queue_all(map.take_fetch_requests());
        applied
    }
}

impl Drop for TileLoader {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
