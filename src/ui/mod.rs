//! egui front end for [`crate::TileMap`].

pub mod controls;
pub mod panel;
pub mod textures;
pub mod widget;

pub use controls::zoom_controls;
pub use panel::info_panel;
pub use textures::TileTextures;
pub use widget::{TileMapWidget, TileMapWidgetExt};
