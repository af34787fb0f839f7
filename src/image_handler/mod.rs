// SPDX-License-Identifier: MPL-2.0
//! Source decoding into premultiplied pixmaps.
//!
//! Raster formats go through the `image` crate, SVG sources through
//! `resvg`. Either way the result is a `tiny_skia::Pixmap`, the pixel
//! container the compositor draws from.

use crate::error::{Error, Result};
use resvg::usvg;
use std::path::Path;
use tiny_skia::Pixmap;

/// Decodes an image file into a pixmap, dispatching on extension.
pub fn load_pixmap<P: AsRef<Path>>(path: P) -> Result<Pixmap> {
    let path = path.as_ref();
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

    match extension.to_lowercase().as_str() {
        "svg" => {
            let svg_data = std::fs::read(path)?;
            let tree = usvg::Tree::from_data(&svg_data, &usvg::Options::default())
                .map_err(|e| Error::Svg(e.to_string()))?;

            let pixmap_size = tree.size().to_int_size();
            let mut pixmap = Pixmap::new(pixmap_size.width(), pixmap_size.height())
                .ok_or_else(|| Error::Svg("SVG has zero area".to_string()))?;
            resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
            Ok(pixmap)
        }
        _ => {
            let bytes = std::fs::read(path)?;
            decode_pixmap(&bytes)
        }
    }
}

/// Decodes in-memory raster bytes (PNG, JPEG, ...) into a pixmap.
pub fn decode_pixmap(bytes: &[u8]) -> Result<Pixmap> {
    let decoded = image_rs::load_from_memory(bytes)?;
    rgba_to_pixmap(decoded.to_rgba8())
}

/// Converts straight-alpha RGBA pixels into a premultiplied pixmap.
fn rgba_to_pixmap(rgba: image_rs::RgbaImage) -> Result<Pixmap> {
    let (width, height) = rgba.dimensions();
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::Raster("image has zero area".to_string()))?;

    for (pixel, out) in rgba.pixels().zip(pixmap.pixels_mut()) {
        let [r, g, b, a] = pixel.0;
        *out = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}
