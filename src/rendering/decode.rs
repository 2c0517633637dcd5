//! Tile image decoding shared by every pixel-painting front end.

use image::RgbaImage;

/// Decode PNG/JPEG/... tile bytes into RGBA8 pixels.
pub fn decode_tile(bytes: &[u8]) -> Option<RgbaImage> {
    match image::load_from_memory(bytes) {
        Ok(image) => Some(image.to_rgba8()),
        Err(e) => {
            log::debug!("tile image decode failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_decode_png() {
        let source = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        source
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();

        let decoded = decode_tile(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(0, 0), &image::Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode_tile(b"<html>forbidden</html>").is_none());
    }
}
