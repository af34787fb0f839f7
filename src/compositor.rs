// SPDX-License-Identifier: MPL-2.0
//! Flattens an image stack into a single container-sized raster.
//!
//! Replays every loaded image's transform in ascending stacking order:
//! rotation and scale pivot on the image's own center point, and the
//! pan offset is already baked into that center. The result matches
//! the live visual state of the stage pixel for pixel.

use crate::editor::entity::ImageEntity;
use crate::error::{Error, Result};
use crate::geometry::Size;
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};

/// Draws every loaded entity, in iteration order, onto a transparent
/// pixmap of `container` dimensions.
///
/// Pure with respect to the model: two calls over the same state
/// produce bit-identical pixmaps. Entities still in placeholder state
/// are skipped.
pub fn compose<'a, I>(images: I, container: Size) -> Result<Pixmap>
where
    I: IntoIterator<Item = &'a ImageEntity>,
{
    if container.is_empty() {
        return Err(Error::Raster("container has zero area".to_string()));
    }
    let mut canvas = Pixmap::new(
        container.width.round() as u32,
        container.height.round() as u32,
    )
    .ok_or_else(|| Error::Raster("container has zero area".to_string()))?;

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };

    for image in images {
        let Some(pixels) = image.pixels() else {
            continue;
        };
        let transform = image_transform(image);
        canvas.draw_pixmap(0, 0, pixels.as_ref(), &paint, transform, None);
    }

    Ok(canvas)
}

/// Encodes a flattened pixmap as PNG bytes.
pub fn export_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    pixmap.encode_png().map_err(|e| Error::Encode(e.to_string()))
}

/// The affine transform that places one image's natural-size pixels at
/// its on-stage footprint.
///
/// Applied to a source point, innermost first: scale the natural size
/// to the display size, offset to the scale-compensated draw position,
/// apply the uniform scale about the origin, then rotate about the
/// center point. The draw position `(cx - w*s/2) / s` undoes the scale
/// so the final footprint is `display_size * scale` centered on
/// `center_point`.
fn image_transform(image: &ImageEntity) -> Transform {
    let center = image.center_point();
    let display = image.display_size();
    let natural = image.natural_size();
    let scale = image.transform().scale.value();

    let draw_x = (center.x - display.width * scale / 2.0) / scale;
    let draw_y = (center.y - display.height * scale / 2.0) / scale;

    Transform::from_rotate_at(image.transform().rotation, center.x, center.y)
        .pre_scale(scale, scale)
        .pre_translate(draw_x, draw_y)
        .pre_scale(display.width / natural.width, display.height / natural.height)
}
