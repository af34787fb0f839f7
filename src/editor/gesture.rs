// SPDX-License-Identifier: MPL-2.0
//! Gesture session state machines for pan, rotate and pinch.
//!
//! The three channels are independent: each owns its start-of-gesture
//! snapshot and may be active concurrently with the others (a pinch
//! usually arrives together with a pan from the same two-finger
//! gesture). Events carry the *cumulative* delta since gesture start,
//! and every move recomputes from the snapshot rather than from the
//! previous frame, so high-frequency input cannot accumulate rounding
//! drift over a long gesture.

use crate::editor::entity::ImageEntity;
use crate::geometry::{Point, ScaleFactor, Vec2};

/// Phase of a gesture event. `Move` repeats zero or more times after
/// `Start`; there is no end phase, a channel simply stops receiving
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Start,
    Move,
}

/// A pan event; `delta` is the cumulative offset since gesture start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanEvent {
    pub phase: GesturePhase,
    pub delta: Vec2,
}

/// A rotate event; `rotation` is the cumulative rotation in degrees
/// since gesture start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateEvent {
    pub phase: GesturePhase,
    pub rotation: f32,
}

/// A pinch event; `scale` is the cumulative multiplicative factor since
/// gesture start (1.0 = no change).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchEvent {
    pub phase: GesturePhase,
    pub scale: f32,
}

/// Pan channel: snapshots the translate offset and center point at
/// gesture start and derives every update from them.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PanSession {
    start_pan: Vec2,
    start_center: Point,
}

impl PanSession {
    pub(crate) fn begin(&mut self, image: &ImageEntity) {
        self.start_pan = image.transform().translate;
        self.start_center = image.center_point();
    }

    pub(crate) fn apply(&self, image: &mut ImageEntity, delta: Vec2) {
        image.set_pan(self.start_pan + delta, self.start_center + delta);
    }
}

/// Rotate channel: snapshots the rotation at gesture start.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RotateSession {
    start_rotation: f32,
}

impl RotateSession {
    pub(crate) fn begin(&mut self, image: &ImageEntity) {
        self.start_rotation = image.transform().rotation;
    }

    pub(crate) fn apply(&self, image: &mut ImageEntity, delta_degrees: f32) {
        image.set_rotation(self.start_rotation + delta_degrees);
    }
}

/// Pinch channel: snapshots the scale at gesture start; the committed
/// scale is clamped by `ScaleFactor`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PinchSession {
    start_scale: ScaleFactor,
}

impl Default for PinchSession {
    fn default() -> Self {
        Self {
            start_scale: ScaleFactor::default(),
        }
    }
}

impl PinchSession {
    pub(crate) fn begin(&mut self, image: &ImageEntity) {
        self.start_scale = image.transform().scale;
    }

    pub(crate) fn apply(&self, image: &mut ImageEntity, factor: f32) {
        image.set_scale(self.start_scale.pinched(factor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceOptions;
    use crate::editor::entity::ImageId;
    use crate::editor::placement;
    use crate::geometry::Size;
    use tiny_skia::Pixmap;

    fn placed_entity() -> ImageEntity {
        let mut entity = ImageEntity::new(ImageId(1), SourceOptions::new("a.png"), 1, false);
        let pixels = Pixmap::new(200, 100).expect("pixmap allocation");
        let fit = placement::fit(Size::new(200.0, 100.0), Size::new(400.0, 400.0));
        entity.place(pixels, fit);
        entity
    }

    #[test]
    fn pan_keeps_center_and_translate_deltas_equal() {
        let mut image = placed_entity();
        let start_center = image.center_point();
        let start_pan = image.transform().translate;

        let mut session = PanSession::default();
        session.begin(&image);
        for delta in [
            Vec2::new(1.0, 1.0),
            Vec2::new(5.5, -3.0),
            Vec2::new(40.0, 12.0),
        ] {
            session.apply(&mut image, delta);
            let center_delta = image.center_point() - start_center;
            let translate_delta = image.transform().translate - start_pan;
            assert_eq!(center_delta, translate_delta);
            assert_eq!(center_delta, delta);
        }
    }

    #[test]
    fn pan_moves_recompute_from_snapshot_not_previous_frame() {
        let mut image = placed_entity();
        let mut session = PanSession::default();
        session.begin(&image);

        // Many tiny cumulative deltas; the final state depends only on
        // the last one.
        for i in 1..=1000 {
            session.apply(&mut image, Vec2::new(i as f32 * 0.1, 0.0));
        }

        let expected = Vec2::new(100.0, 0.0);
        assert_eq!(image.transform().translate, expected);
    }

    #[test]
    fn second_pan_gesture_starts_from_committed_state() {
        let mut image = placed_entity();
        let mut session = PanSession::default();

        session.begin(&image);
        session.apply(&mut image, Vec2::new(10.0, 0.0));

        session.begin(&image);
        session.apply(&mut image, Vec2::new(0.0, 5.0));

        assert_eq!(image.transform().translate, Vec2::new(10.0, 5.0));
    }

    #[test]
    fn rotate_accumulates_from_gesture_start() {
        let mut image = placed_entity();
        let mut session = RotateSession::default();

        session.begin(&image);
        session.apply(&mut image, 30.0);
        session.apply(&mut image, 90.0);
        assert_eq!(image.transform().rotation, 90.0);

        session.begin(&image);
        session.apply(&mut image, -450.0);
        // Rotation is unbounded; no wrapping.
        assert_eq!(image.transform().rotation, -360.0);
    }

    #[test]
    fn pinch_scales_from_snapshot_and_clamps() {
        let mut image = placed_entity();
        let mut session = PinchSession::default();

        session.begin(&image);
        session.apply(&mut image, 10.0);
        assert_eq!(image.transform().scale.value(), 5.0);

        session.apply(&mut image, 0.01);
        assert_eq!(image.transform().scale.value(), 0.2);

        session.apply(&mut image, 1.5);
        assert_eq!(image.transform().scale.value(), 1.5);
    }

    #[test]
    fn pinch_resumes_from_committed_scale() {
        let mut image = placed_entity();
        let mut session = PinchSession::default();

        session.begin(&image);
        session.apply(&mut image, 2.0);

        session.begin(&image);
        session.apply(&mut image, 2.0);
        assert_eq!(image.transform().scale.value(), 4.0);
    }

    #[test]
    fn channels_compose_on_the_same_image() {
        let mut image = placed_entity();
        let mut pan = PanSession::default();
        let mut pinch = PinchSession::default();

        pan.begin(&image);
        pinch.begin(&image);
        pan.apply(&mut image, Vec2::new(8.0, 8.0));
        pinch.apply(&mut image, 2.0);
        pan.apply(&mut image, Vec2::new(16.0, 8.0));

        assert_eq!(image.transform().translate, Vec2::new(16.0, 8.0));
        assert_eq!(image.transform().scale.value(), 2.0);
    }
}
