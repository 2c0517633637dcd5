use egui::{Button, RichText, Ui};

use crate::core::map::TileMap;

/// "+" / zoom level / "−" row. Buttons are disabled at the zoom bounds.
///
/// Returns `true` when the zoom changed.
pub fn zoom_controls(ui: &mut Ui, map: &mut TileMap) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        let zoom_in = ui
            .add_enabled(map.can_zoom_in(), Button::new(RichText::new("+").strong()))
            .on_hover_text("Zoom in");
        if zoom_in.clicked() {
            changed |= map.zoom_in();
        }

        ui.label(format!("Zoom {}", map.zoom()));

        let zoom_out = ui
            .add_enabled(map.can_zoom_out(), Button::new(RichText::new("−").strong()))
            .on_hover_text("Zoom out");
        if zoom_out.clicked() {
            changed |= map.zoom_out();
        }
    });
    changed
}
