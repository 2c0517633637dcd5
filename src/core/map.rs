use crate::{
    core::{
        config::MapConfig,
        constants::MIN_TILE_CAPACITY,
        geo::{Size, TileCoord},
        info::MapInfo,
        state::ViewportState,
        viewport::TileRange,
    },
    rendering::{PositionFrame, RenderSurface, RenderTile},
    tiles::{
        cache::TileCache,
        request::{FetchOutcome, FetchRequest, Generation},
        set::{TileSet, TileStatus},
        source::{TileServerSource, TileSource},
    },
    Result,
};

/// The slippy map engine.
///
/// Owns the viewport state and the accumulated tile set, and is the only
/// place either changes. Every operation recomputes the visible range
/// synchronously; fetching happens elsewhere and reports back through
/// [`TileMap::apply_fetch_result`].
pub struct TileMap {
    state: ViewportState,
    tiles: TileSet,
    cache: TileCache,
    source: Box<dyn TileSource>,
    overscan: u32,
    keep_buffer: u32,
    generation: Generation,
}

impl TileMap {
    pub fn new(config: MapConfig) -> Result<Self> {
        config.validate()?;
        let source = TileServerSource::new(config.base_url.clone(), config.token.clone());
        Ok(Self::with_source(config, Box::new(source)))
    }

    /// Build around a custom URL scheme. The config is not validated here.
    pub fn with_source(config: MapConfig, source: Box<dyn TileSource>) -> Self {
        let cache = TileCache::new(config.cache_capacity);
        Self::with_cache(config, source, cache)
    }

    /// Share a byte cache with other maps.
    ///
    /// A `tile_capacity` below [`MIN_TILE_CAPACITY`] is raised to it, so the
    /// visible tiles always fit.
    pub fn with_cache(config: MapConfig, source: Box<dyn TileSource>, cache: TileCache) -> Self {
        let mut map = Self {
            state: ViewportState::new(config.initial_zoom, config.viewport),
            tiles: TileSet::new(config.tile_capacity.max(MIN_TILE_CAPACITY)),
            cache,
            source,
            overscan: config.overscan,
            keep_buffer: config.keep_buffer.max(config.overscan),
            generation: Generation::default(),
        };
        map.refresh();
        map
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn zoom(&self) -> u8 {
        self.state.zoom()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    pub fn can_zoom_in(&self) -> bool {
        self.state.can_zoom_in()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.state.can_zoom_out()
    }

    pub fn zoom_in(&mut self) -> bool {
        if !self.state.zoom_in() {
            return false;
        }
        self.zoom_changed();
        true
    }

    pub fn zoom_out(&mut self) -> bool {
        if !self.state.zoom_out() {
            return false;
        }
        self.zoom_changed();
        true
    }

    /// Move the map by a drag delta in screen pixels
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) -> bool {
        if !self.state.pan(delta_x, delta_y) {
            return false;
        }
        self.refresh();
        true
    }

    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if !self.state.resize(width, height) {
            return false;
        }
        self.refresh();
        true
    }

    fn zoom_changed(&mut self) {
        // Tiles of the old zoom can never be shown again; results still in
        // flight for them carry the old generation and will be dropped.
        self.tiles.clear();
        self.generation = self.generation.next();
        log::info!(
            "zoom changed to {} ({}), center {:.1},{:.1}",
            self.state.zoom(),
            self.generation,
            self.state.center().x,
            self.state.center().y
        );
        self.refresh();
    }

    /// Bring the tile set in line with the current viewport.
    fn refresh(&mut self) {
        let Some(visible) = self.state.visible_range() else {
            log::debug!("viewport shows no tiles, keeping {} entries", self.tiles.len());
            return;
        };

        let keep = visible.expand(self.keep_buffer);
        let evicted = self.tiles.retain(|coord| keep.contains(coord));

        let mut added = self
            .tiles
            .add(visible.expand(self.overscan).iter(), self.generation, &self.cache);
        // Visible tiles are touched last so capacity eviction picks prefetched ones first.
        added.extend(self.tiles.add(visible.iter(), self.generation, &self.cache));

        log::debug!(
            "visible {}..={} x {}..={} at z{}: {} added, {} evicted, {} held",
            visible.min_x,
            visible.max_x,
            visible.min_y,
            visible.max_y,
            visible.z,
            added.len(),
            evicted.len(),
            self.tiles.len()
        );
    }

    pub fn visible_range(&self) -> Option<TileRange> {
        self.state.visible_range()
    }

    /// Exact visible tiles, row-major
    pub fn visible_tiles(&self) -> Vec<TileCoord> {
        self.state.visible_tiles()
    }

    pub fn contains_tile(&self, coord: &TileCoord) -> bool {
        self.tiles.contains(coord)
    }

    pub fn tile_url(&self, coord: &TileCoord) -> String {
        self.source.url(*coord)
    }

    /// Mark every pending tile as loading and hand out requests for them.
    pub fn take_fetch_requests(&mut self) -> Vec<FetchRequest> {
        let pending = self.tiles.pending();
        let mut requests = Vec::with_capacity(pending.len());
        for coord in pending {
            if let Some(entry) = self.tiles.get_mut(&coord) {
                entry.status = TileStatus::Loading;
                entry.generation = self.generation;
                requests.push(FetchRequest {
                    coord,
                    url: self.source.url(coord),
                    generation: self.generation,
                });
            }
        }
        requests
    }

    /// Record a finished fetch. Returns `false` when the result is stale.
    pub fn apply_fetch_result(&mut self, outcome: FetchOutcome) -> bool {
        let FetchOutcome {
            coord,
            generation,
            result,
            elapsed,
        } = outcome;

        if generation != self.generation {
            log::debug!("discarding {} result for {} (now {})", generation, coord, self.generation);
            return false;
        }
        let Some(entry) = self.tiles.get_mut(&coord) else {
            log::debug!("discarding result for dropped tile {}", coord);
            return false;
        };
        if !entry.status.is_loading() {
            log::debug!("discarding result for {}, tile is not loading", coord);
            return false;
        }

        match result {
            Ok(data) => {
                log::info!("loaded tile {} ({} bytes, {:?})", coord, data.len(), elapsed);
                self.cache.put(coord, data.clone());
                entry.status = TileStatus::Loaded(data);
            }
            Err(error) => {
                log::warn!("tile {} failed: {}", coord, error);
                entry.status = TileStatus::Failed(error);
            }
        }
        true
    }

    /// Whether a fetch issued for `coord` in `generation` is still useful
    pub fn is_wanted(&self, coord: &TileCoord, generation: Generation) -> bool {
        generation == self.generation
            && self
                .tiles
                .get(coord)
                .is_some_and(|entry| entry.status.is_loading())
    }

    /// Every accumulated tile positioned for the viewport
    pub fn render_tiles(&self) -> Vec<RenderTile> {
        self.render_tiles_in(PositionFrame::Viewport)
    }

    pub fn render_tiles_in(&self, frame: PositionFrame) -> Vec<RenderTile> {
        let frame = match frame {
            PositionFrame::Viewport => self.state.size(),
            PositionFrame::Container(size) => size.sanitized(),
        };
        self.tiles
            .coords()
            .into_iter()
            .filter_map(|coord| self.tiles.get(&coord))
            .map(|entry| {
                RenderTile::from_entry(
                    entry,
                    self.state.tile_position_in(&entry.coord, frame),
                    self.source.url(entry.coord),
                )
            })
            .collect()
    }

    pub fn render_to(&self, surface: &mut dyn RenderSurface) {
        surface.begin_frame(self.state.size());
        for tile in self.render_tiles() {
            surface.draw_tile(&tile);
        }
    }

    pub fn info(&self) -> MapInfo {
        MapInfo::new(&self.state, self.tiles.counts(), self.cache.stats(), self.generation)
    }

    pub fn viewport_size(&self) -> Size {
        self.state.size()
    }
}

impl std::fmt::Debug for TileMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileMap")
            .field("state", &self.state)
            .field("tiles", &self.tiles.len())
            .field("generation", &self.generation)
            .finish()
    }
}
