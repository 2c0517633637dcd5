use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use tileview::{
    ui::{info_panel, zoom_controls, TileMapWidget, TileTextures},
    HttpTileFetcher, MapConfig, TileLoader, TileMap,
};

#[derive(Parser, Debug)]
#[command(name = "tileview-app")]
#[command(about = "Pan and zoom a tiled map served over HTTP")]
struct Args {
    /// JSON configuration file; TILEVIEW_* environment variables apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial zoom level (0-3)
    #[arg(short, long)]
    zoom: Option<u8>,

    /// Tile server base URL
    #[arg(long)]
    base_url: Option<String>,

    /// API token appended to tile URLs
    #[arg(long)]
    token: Option<String>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<MapConfig> {
        let mut config = match &self.config {
            Some(path) => MapConfig::from_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => MapConfig::from_env()?,
        };
        if let Some(zoom) = self.zoom {
            config.initial_zoom = zoom;
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(token) = self.token {
            config.token = token;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Standalone map viewer application
fn main() -> anyhow::Result<()> {
    tileview::init_logging();

    let config = Args::parse().into_config()?;
    if config.token.is_empty() {
        log::warn!("no API token configured, the tile server will likely answer 403");
    }

    // Fetch tasks are spawned from the UI thread, so it has to sit inside the runtime.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("tileview-fetch")
        .build()?;
    let _guard = runtime.enter();

    let map = TileMap::new(config.clone())?;
    let fetcher = HttpTileFetcher::new(&config.loader)?;
    let loader = TileLoader::new(Arc::new(fetcher), config.loader.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_title("Tileview"),
        ..Default::default()
    };

    eframe::run_native(
        "tileview-app",
        options,
        Box::new(|_cc| Box::new(TileviewApp::new(map, loader))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))?;

    Ok(())
}

/// The main application struct
struct TileviewApp {
    map: TileMap,
    loader: TileLoader,
    textures: TileTextures,
    show_info_panel: bool,
}

impl TileviewApp {
    fn new(map: TileMap, loader: TileLoader) -> Self {
        Self {
            map,
            loader,
            textures: TileTextures::new(),
            show_info_panel: true,
        }
    }
}

impl eframe::App for TileviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.loader.sync(&mut self.map);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                zoom_controls(ui, &mut self.map);
                ui.separator();
                ui.checkbox(&mut self.show_info_panel, "Info");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let center = self.map.state().center();
                    ui.label(format!(
                        "Center: {:.0}, {:.0} | Fetching: {}",
                        center.x,
                        center.y,
                        self.loader.pending_count()
                    ));
                });
            });
        });

        if self.show_info_panel {
            egui::SidePanel::right("info_panel")
                .resizable(false)
                .default_width(240.0)
                .show(ctx, |ui| {
                    ui.heading("Map");
                    ui.separator();
                    info_panel(ui, &self.map.info());
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ui.add(TileMapWidget::new(&mut self.map, &mut self.textures));
            });

        // Pan and resize may have revealed tiles; start them this frame.
        self.loader.sync(&mut self.map);

        if !self.loader.is_idle() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
