//! Drive the map without a window: zoom in, pan a little, wait for tiles.
//!
//! ```text
//! TILEVIEW_API_TOKEN=... cargo run --example headless
//! ```

use std::sync::Arc;
use std::time::Duration;

use tileview::prelude::*;
use tileview::rendering::decode_tile;

async fn settle(map: &mut TileMap, loader: &mut TileLoader) {
    loader.sync(map);
    let deadline = Instant::now() + Duration::from_secs(20);
    while !loader.is_idle() && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(25)).await;
        loader.sync(map);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tileview::init_logging();

    let config = MapConfig::from_env()?;
    let mut map = TileMap::new(config.clone())?;
    let fetcher = HttpTileFetcher::new(&config.loader)?;
    let mut loader = TileLoader::new(Arc::new(fetcher), config.loader.clone());

    settle(&mut map, &mut loader).await;
    log::info!("initial view\n{}", map.info());

    map.zoom_in();
    map.zoom_in();
    map.pan(-200.0, 120.0);
    settle(&mut map, &mut loader).await;

    let mut surface = RecordingSurface::new();
    map.render_to(&mut surface);
    for tile in &surface.tiles {
        let state = match &tile.content {
            TileContent::Loading => "loading".to_string(),
            TileContent::Image(data) => match decode_tile(data) {
                Some(image) => format!("{}x{} image", image.width(), image.height()),
                None => format!("{} bytes, not an image", data.len()),
            },
            TileContent::Failed(placeholder) => placeholder.title.clone(),
        };
        println!(
            "{:>7} at ({:>6.0}, {:>6.0}): {}",
            tile.tile_id, tile.position.x, tile.position.y, state
        );
    }

    println!("{}", serde_json::to_string_pretty(&map.info())?);
    Ok(())
}
