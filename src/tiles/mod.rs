//! Tile sourcing, fetching and bookkeeping around the coordinate engine.

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod loader;
pub mod request;
pub mod set;
pub mod source;

// Re-exports for convenience
pub use cache::{CacheStats, TileCache};
pub use error::{TileErrorKind, TileFetchError};
pub use fetcher::{HttpTileFetcher, TileFetcher};
pub use loader::{TileLoader, TileLoaderConfig};
pub use request::{FetchOutcome, FetchRequest, Generation};
pub use set::{TileCounts, TileEntry, TileSet, TileStatus};
pub use source::{TileServerSource, TileSource};
