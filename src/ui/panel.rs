use egui::{Grid, Ui};

use crate::core::info::MapInfo;

/// Read-only table of the map's current state
pub fn info_panel(ui: &mut Ui, info: &MapInfo) {
    Grid::new("tileview_info")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            row(ui, "Zoom", info.zoom.to_string());
            row(ui, "Grid", format!("{0}x{0} tiles", info.tiles_per_side));
            row(ui, "Center", format!("{}, {}", info.center.x, info.center.y));
            row(ui, "World", format!("{} px", info.world_size));
            row(
                ui,
                "Viewport",
                format!("{:.0}x{:.0}", info.viewport.width, info.viewport.height),
            );
            let visible = match &info.visible {
                Some(range) => format!(
                    "{} (x {}..={}, y {}..={})",
                    info.visible_count, range.min_x, range.max_x, range.min_y, range.max_y
                ),
                None => "none".to_string(),
            };
            row(ui, "Visible", visible);
            row(ui, "Loaded", info.tiles.loaded.to_string());
            row(ui, "Loading", (info.tiles.loading + info.tiles.pending).to_string());
            row(ui, "Failed", info.tiles.failed.to_string());
            row(
                ui,
                "Cache",
                format!(
                    "{}/{} ({:.0}% hits)",
                    info.cache.entries,
                    info.cache.capacity,
                    info.cache.hit_rate() * 100.0
                ),
            );
            row(ui, "Generation", info.generation.to_string());
        });
}

fn row(ui: &mut Ui, name: &str, value: String) {
    ui.label(name);
    ui.monospace(value);
    ui.end_row();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MapConfig;
    use crate::core::map::TileMap;
    use crate::ui::zoom_controls;

    #[test]
    fn test_panels_render_headless() {
        let mut map = TileMap::new(MapConfig::default()).unwrap();
        let ctx = egui::Context::default();
        let mut changed = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                info_panel(ui, &map.info());
                changed = zoom_controls(ui, &mut map);
            });
        });
        assert!(!changed);
        assert_eq!(map.zoom(), 0);
    }
}
