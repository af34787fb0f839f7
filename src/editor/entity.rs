// SPDX-License-Identifier: MPL-2.0
//! Per-image state: identity, stacking order, placement geometry and
//! the cumulative visual transform.

use crate::config::SourceOptions;
use crate::editor::placement::Placement;
use crate::geometry::{Point, ScaleFactor, Size, Vec2};
use tiny_skia::Pixmap;

/// Stable identifier for an image entity, unique within one editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub(crate) u64);

impl ImageId {
    /// Returns the raw id value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Cumulative visual transform applied on top of the initial placement.
///
/// `translate` is the cumulative pan offset from the placed position,
/// `rotation` is in degrees (unbounded) and `scale` is the uniform
/// factor, always within its clamped range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform2D {
    pub translate: Vec2,
    pub rotation: f32,
    pub scale: ScaleFactor,
}

/// One image on the stage.
///
/// Created as a placeholder (no pixels) by an add or replace request,
/// populated and placed once its source decodes. `center_point` is the
/// single source of truth for position; it and `transform.translate`
/// always move by the same delta.
#[derive(Debug, Clone)]
pub struct ImageEntity {
    id: ImageId,
    url: String,
    close_button: bool,
    click_to_select: bool,
    auto_select: bool,
    order: u32,
    pixels: Option<Pixmap>,
    natural_size: Size,
    display_size: Size,
    center_point: Point,
    transform: Transform2D,
}

impl ImageEntity {
    pub(crate) fn new(id: ImageId, options: SourceOptions, order: u32, auto_select: bool) -> Self {
        Self {
            id,
            url: options.url,
            close_button: options.close_button,
            click_to_select: options.click_to_select,
            auto_select,
            order,
            pixels: None,
            natural_size: Size::default(),
            display_size: Size::default(),
            center_point: Point::ORIGIN,
            transform: Transform2D::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ImageId {
        self.id
    }

    /// The source URL this entity was created from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the rendering shell shows a remove button for this image.
    #[must_use]
    pub fn close_button(&self) -> bool {
        self.close_button
    }

    /// Whether a tap on this image selects it.
    #[must_use]
    pub fn click_to_select(&self) -> bool {
        self.click_to_select
    }

    pub(crate) fn auto_select(&self) -> bool {
        self.auto_select
    }

    /// 1-based stacking position; higher order draws on top.
    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    pub(crate) fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    pub(crate) fn demote_order(&mut self) {
        self.order -= 1;
    }

    /// Whether the source has decoded and the entity has been placed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.pixels.is_some()
    }

    /// The decoded pixels, if the entity has left placeholder state.
    #[must_use]
    pub fn pixels(&self) -> Option<&Pixmap> {
        self.pixels.as_ref()
    }

    /// Intrinsic pixel dimensions, fixed once decoded.
    #[must_use]
    pub fn natural_size(&self) -> Size {
        self.natural_size
    }

    /// Dimensions after fit-to-container placement, fixed until replaced.
    #[must_use]
    pub fn display_size(&self) -> Size {
        self.display_size
    }

    /// Geometric center in container coordinates.
    #[must_use]
    pub fn center_point(&self) -> Point {
        self.center_point
    }

    #[must_use]
    pub fn transform(&self) -> Transform2D {
        self.transform
    }

    /// Populates the entity with decoded pixels and placement geometry,
    /// resetting the transform to identity.
    pub(crate) fn place(&mut self, pixels: Pixmap, placement: Placement) {
        self.natural_size = Size::new(pixels.width() as f32, pixels.height() as f32);
        self.pixels = Some(pixels);
        self.display_size = placement.display_size;
        self.center_point = placement.center_point;
        self.transform = Transform2D::default();
    }

    /// Moves the image by a delta, keeping `center_point` and
    /// `transform.translate` in lockstep.
    pub(crate) fn translate_by(&mut self, delta: Vec2) {
        self.transform.translate = self.transform.translate + delta;
        self.center_point += delta;
    }

    /// Sets the pan state directly from gesture-session snapshots.
    pub(crate) fn set_pan(&mut self, translate: Vec2, center_point: Point) {
        self.transform.translate = translate;
        self.center_point = center_point;
    }

    pub(crate) fn set_rotation(&mut self, degrees: f32) {
        self.transform.rotation = degrees;
    }

    pub(crate) fn set_scale(&mut self, scale: ScaleFactor) {
        self.transform.scale = scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::placement;

    fn blank_pixmap(width: u32, height: u32) -> Pixmap {
        Pixmap::new(width, height).expect("pixmap allocation")
    }

    fn placed_entity() -> ImageEntity {
        let mut entity = ImageEntity::new(ImageId(1), SourceOptions::new("a.png"), 1, false);
        let pixels = blank_pixmap(200, 100);
        let fit = placement::fit(Size::new(200.0, 100.0), Size::new(400.0, 400.0));
        entity.place(pixels, fit);
        entity
    }

    #[test]
    fn placeholder_has_no_pixels_and_identity_transform() {
        let entity = ImageEntity::new(ImageId(7), SourceOptions::new("x.png"), 3, true);
        assert!(!entity.is_loaded());
        assert_eq!(entity.order(), 3);
        assert_eq!(entity.transform(), Transform2D::default());
        assert_eq!(entity.center_point(), Point::ORIGIN);
    }

    #[test]
    fn place_records_natural_and_display_size() {
        let entity = placed_entity();
        assert!(entity.is_loaded());
        assert_eq!(entity.natural_size(), Size::new(200.0, 100.0));
        assert_eq!(entity.display_size(), Size::new(400.0, 200.0));
    }

    #[test]
    fn place_resets_transform() {
        let mut entity = placed_entity();
        entity.translate_by(Vec2::new(10.0, 10.0));
        entity.set_rotation(45.0);

        let fit = placement::fit(Size::new(100.0, 100.0), Size::new(400.0, 400.0));
        entity.place(blank_pixmap(100, 100), fit);

        assert_eq!(entity.transform(), Transform2D::default());
    }

    #[test]
    fn translate_by_moves_center_and_translate_together() {
        let mut entity = placed_entity();
        let start_center = entity.center_point();
        let start_translate = entity.transform().translate;

        entity.translate_by(Vec2::new(12.0, -7.0));
        entity.translate_by(Vec2::new(3.0, 4.0));

        let center_delta = entity.center_point() - start_center;
        let translate_delta = entity.transform().translate - start_translate;
        assert_eq!(center_delta, translate_delta);
        assert_eq!(center_delta, Vec2::new(15.0, -3.0));
    }
}
