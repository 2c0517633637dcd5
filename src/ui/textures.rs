use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::core::geo::TileCoord;
use crate::core::map::TileMap;
use crate::prelude::HashMap;
use crate::rendering::decode_tile;

enum Slot {
    Ready(TextureHandle),
    /// Bytes that are not an image; remembered so decoding is tried only once
    Undecodable,
}

/// GPU textures for loaded tiles, keyed by coordinate.
///
/// Dropping a handle frees the texture, so pruning is all the cleanup needed.
#[derive(Default)]
pub struct TileTextures {
    slots: HashMap<TileCoord, Slot>,
}

impl TileTextures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for `coord`, decoding `data` on first use.
    ///
    /// Returns `None` when the bytes cannot be decoded.
    pub fn get_or_load(&mut self, ctx: &Context, coord: TileCoord, data: &[u8]) -> Option<TextureId> {
        let slot = self.slots.entry(coord).or_insert_with(|| match decode_rgba(data) {
            Some(image) => Slot::Ready(ctx.load_texture(
                format!("tile-{}", coord.id()),
                image,
                TextureOptions::LINEAR,
            )),
            None => {
                log::warn!("tile {} is not a decodable image ({} bytes)", coord, data.len());
                Slot::Undecodable
            }
        });
        match slot {
            Slot::Ready(handle) => Some(handle.id()),
            Slot::Undecodable => None,
        }
    }

    /// Drop textures for tiles the map no longer holds as loaded.
    pub fn prune(&mut self, map: &TileMap) -> usize {
        let before = self.slots.len();
        self.slots.retain(|coord, _| {
            map.tiles()
                .get(coord)
                .is_some_and(|entry| entry.status.is_loaded())
        });
        before - self.slots.len()
    }

    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.slots.contains_key(coord)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

fn decode_rgba(bytes: &[u8]) -> Option<ColorImage> {
    let image = decode_tile(bytes)?;
    let size = [image.width() as usize, image.height() as usize];
    Some(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}
