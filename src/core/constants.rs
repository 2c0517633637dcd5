//! Engine-wide constants for the tile grid and viewport defaults.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// Square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Lowest zoom level the map can show (a single tile covers the world).
pub const MIN_ZOOM: u8 = 0;

/// Highest zoom level served by the tile server (8×8 tiles).
pub const MAX_ZOOM: u8 = 3;

/// Placeholder viewport size used until the surface reports a real one.
pub const DEFAULT_VIEWPORT_SIZE: (f64, f64) = (800.0, 600.0);

/// Tiles fetched beyond each visible edge.
pub const DEFAULT_OVERSCAN: u32 = 1;

/// Accumulated tiles further than this many tiles outside the visible range are evicted.
pub const DEFAULT_KEEP_BUFFER: u32 = 2;

/// Upper bound on accumulated tile entries.
pub const DEFAULT_TILE_CAPACITY: usize = 256;

/// Smallest tile set that holds the whole grid at the deepest zoom.
pub const MIN_TILE_CAPACITY: usize = 1 << (2 * MAX_ZOOM as usize);

/// Upper bound on cached tile payloads.
pub const DEFAULT_CACHE_CAPACITY: usize = 512;

/// Tile server used when nothing else is configured.
pub const DEFAULT_TILE_SERVER_URL: &str = "https://challenge-tiler.services.propelleraero.com";
