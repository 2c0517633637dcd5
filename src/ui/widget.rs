use egui::{
    Align2, Color32, CursorIcon, FontId, Painter, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2,
    Widget,
};

use super::textures::TileTextures;
use crate::core::map::TileMap;
use crate::rendering::{RenderTile, TileContent, TilePlaceholder};
use crate::tiles::error::TileErrorKind;

const BACKGROUND: Color32 = Color32::from_rgb(242, 239, 233);
const LOADING_FILL: Color32 = Color32::from_rgb(219, 234, 254);
const LOADING_TEXT: Color32 = Color32::from_rgb(37, 99, 235);
const GRID_STROKE: Color32 = Color32::from_rgb(200, 200, 200);

/// Pan-and-paint widget for a [`TileMap`].
///
/// The map follows the widget's allocated size every frame and pans with
/// pointer drags. Zooming is left to the caller (see [`super::zoom_controls`]).
///
/// ```rust,ignore
/// ui.add(TileMapWidget::new(&mut map, &mut textures));
/// ```
pub struct TileMapWidget<'a> {
    map: &'a mut TileMap,
    textures: &'a mut TileTextures,
    interactive: bool,
    show_center: bool,
}

impl<'a> TileMapWidget<'a> {
    pub fn new(map: &'a mut TileMap, textures: &'a mut TileTextures) -> Self {
        Self {
            map,
            textures,
            interactive: true,
            show_center: true,
        }
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn show_center(mut self, show: bool) -> Self {
        self.show_center = show;
        self
    }
}

impl Widget for TileMapWidget<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let sense = if self.interactive {
            Sense::click_and_drag()
        } else {
            Sense::hover()
        };
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), sense);

        self.map.resize(rect.width() as f64, rect.height() as f64);

        if self.interactive {
            if response.dragged() {
                let delta = response.drag_delta();
                if delta != Vec2::ZERO {
                    self.map.pan(delta.x as f64, delta.y as f64);
                }
                ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
            } else if response.hovered() {
                ui.ctx().set_cursor_icon(CursorIcon::Grab);
            }
        }

        self.textures.prune(self.map);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);

        for tile in self.map.render_tiles() {
            let tile_rect = Rect::from_min_size(
                rect.min + Vec2::new(tile.position.x as f32, tile.position.y as f32),
                Vec2::splat(tile.size as f32),
            );
            if !tile_rect.intersects(rect) {
                continue;
            }
            paint_tile(ui, &painter, self.textures, &tile, tile_rect);
        }

        if self.show_center {
            paint_center_marker(&painter, rect.center());
        }

        response
    }
}

fn paint_tile(
    ui: &Ui,
    painter: &Painter,
    textures: &mut TileTextures,
    tile: &RenderTile,
    rect: Rect,
) {
    match &tile.content {
        TileContent::Image(data) => match textures.get_or_load(ui.ctx(), tile.coord, data) {
            Some(texture) => {
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(texture, rect, uv, Color32::WHITE);
            }
            None => paint_message(painter, rect, Color32::from_gray(230), &[
                ("Invalid Image", 14.0, Color32::from_gray(80)),
                (format!("Tile {}", tile.coord).as_str(), 12.0, Color32::from_gray(110)),
            ]),
        },
        TileContent::Loading => paint_message(painter, rect, LOADING_FILL, &[(
            "Loading...",
            14.0,
            LOADING_TEXT,
        )]),
        TileContent::Failed(placeholder) => paint_placeholder(painter, rect, placeholder),
    }
    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, GRID_STROKE));
}

fn paint_placeholder(painter: &Painter, rect: Rect, placeholder: &TilePlaceholder) {
    let (fill, text) = placeholder_colors(placeholder.kind);
    paint_message(painter, rect, fill, &[
        (placeholder.title.as_str(), 15.0, text),
        (placeholder.label.as_str(), 12.0, text.gamma_multiply(0.8)),
        (placeholder.hint.as_str(), 11.0, Color32::from_gray(100)),
    ]);
}

/// Fill `rect` and stack the lines vertically around its center.
fn paint_message(painter: &Painter, rect: Rect, fill: Color32, lines: &[(&str, f32, Color32)]) {
    painter.rect_filled(rect, 0.0, fill);
    let spacing = 20.0;
    let top = rect.center().y - spacing * (lines.len() as f32 - 1.0) / 2.0;
    for (i, (text, size, color)) in lines.iter().enumerate() {
        painter.text(
            Pos2::new(rect.center().x, top + spacing * i as f32),
            Align2::CENTER_CENTER,
            *text,
            FontId::proportional(*size),
            *color,
        );
    }
}

fn placeholder_colors(kind: TileErrorKind) -> (Color32, Color32) {
    match kind {
        TileErrorKind::NotFound => (Color32::from_rgb(243, 244, 246), Color32::from_rgb(75, 85, 99)),
        TileErrorKind::Forbidden => (Color32::from_rgb(254, 243, 199), Color32::from_rgb(146, 64, 14)),
        TileErrorKind::ServerError => (Color32::from_rgb(254, 226, 226), Color32::from_rgb(153, 27, 27)),
        TileErrorKind::Network => (Color32::from_rgb(237, 233, 254), Color32::from_rgb(91, 33, 182)),
        TileErrorKind::Unknown => (Color32::from_rgb(229, 231, 235), Color32::from_rgb(55, 65, 81)),
    }
}

fn paint_center_marker(painter: &Painter, center: Pos2) {
    let stroke = Stroke::new(2.0, Color32::from_rgb(220, 38, 38));
    painter.circle_stroke(center, 6.0, stroke);
    painter.line_segment([center - Vec2::X * 10.0, center + Vec2::X * 10.0], stroke);
    painter.line_segment([center - Vec2::Y * 10.0, center + Vec2::Y * 10.0], stroke);
}

/// Extension trait for adding a map with one call
pub trait TileMapWidgetExt {
    fn tile_map(&mut self, map: &mut TileMap, textures: &mut TileTextures) -> Response;
}

impl TileMapWidgetExt for Ui {
    fn tile_map(&mut self, map: &mut TileMap, textures: &mut TileTextures) -> Response {
        self.add(TileMapWidget::new(map, textures))
    }
}
