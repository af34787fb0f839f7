// SPDX-License-Identifier: MPL-2.0
//! Initial fit-to-container placement for newly decoded images.

use crate::geometry::{Point, Size};

/// Geometry computed for a freshly decoded image: the fitted display
/// size, the top-left offset inside the container and the resulting
/// center point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub display_size: Size,
    pub top_left: Point,
    pub center_point: Point,
}

/// Fits an image of `natural` dimensions inside `container`, preserving
/// aspect ratio, and centers it along the axis with more slack.
///
/// The fit ratio is `min(container.w / natural.w, container.h /
/// natural.h)`, so the display size never exceeds the container on
/// either axis. Only one axis is centered: when the horizontal slack
/// exceeds the vertical slack the image is centered horizontally with
/// its top pinned to 0, otherwise it is centered vertically with its
/// left pinned to 0.
#[must_use]
pub fn fit(natural: Size, container: Size) -> Placement {
    let ratio = (container.width / natural.width).min(container.height / natural.height);
    let display_size = natural.scaled(ratio);

    let mut top_left = Point::ORIGIN;
    if (container.width - display_size.width) > (container.height - display_size.height) {
        top_left.x = (container.width - display_size.width) / 2.0;
    } else {
        top_left.y = (container.height - display_size.height) / 2.0;
    }

    let center_point = Point::new(
        top_left.x + display_size.width / 2.0,
        top_left.y + display_size.height / 2.0,
    );

    Placement {
        display_size,
        top_left,
        center_point,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_in_square_container_centers_vertically() {
        // 400x400 container, 200x100 image: ratio 2, display (400, 200),
        // horizontal slack 0 < vertical slack 200.
        let placement = fit(Size::new(200.0, 100.0), Size::new(400.0, 400.0));
        assert_eq!(placement.display_size, Size::new(400.0, 200.0));
        assert_eq!(placement.top_left, Point::new(0.0, 100.0));
        assert_eq!(placement.center_point, Point::new(200.0, 200.0));
    }

    #[test]
    fn tall_image_in_square_container_centers_horizontally() {
        let placement = fit(Size::new(100.0, 200.0), Size::new(400.0, 400.0));
        assert_eq!(placement.display_size, Size::new(200.0, 400.0));
        assert_eq!(placement.top_left, Point::new(100.0, 0.0));
        assert_eq!(placement.center_point, Point::new(200.0, 200.0));
    }

    #[test]
    fn display_size_never_exceeds_container() {
        let cases = [
            (Size::new(1000.0, 10.0), Size::new(400.0, 300.0)),
            (Size::new(10.0, 1000.0), Size::new(400.0, 300.0)),
            (Size::new(333.0, 777.0), Size::new(123.0, 456.0)),
        ];
        for (natural, container) in cases {
            let placement = fit(natural, container);
            assert!(placement.display_size.width <= container.width + 1e-3);
            assert!(placement.display_size.height <= container.height + 1e-3);
        }
    }

    #[test]
    fn fit_preserves_aspect_ratio() {
        let placement = fit(Size::new(300.0, 150.0), Size::new(500.0, 500.0));
        let ratio = placement.display_size.width / placement.display_size.height;
        assert!((ratio - 2.0).abs() < 1e-5);
    }

    #[test]
    fn exact_fit_pins_both_axes_to_origin() {
        // Equal slack on both axes goes down the vertical-centering
        // branch with zero offset.
        let placement = fit(Size::new(200.0, 200.0), Size::new(400.0, 400.0));
        assert_eq!(placement.top_left, Point::ORIGIN);
        assert_eq!(placement.display_size, Size::new(400.0, 400.0));
        assert_eq!(placement.center_point, Point::new(200.0, 200.0));
    }

    #[test]
    fn small_image_is_upscaled_to_fill_dominant_axis() {
        let placement = fit(Size::new(40.0, 20.0), Size::new(400.0, 400.0));
        assert_eq!(placement.display_size, Size::new(400.0, 200.0));
    }

    #[test]
    fn center_point_is_top_left_plus_half_display() {
        let placement = fit(Size::new(640.0, 480.0), Size::new(400.0, 400.0));
        assert_eq!(
            placement.center_point,
            Point::new(
                placement.top_left.x + placement.display_size.width / 2.0,
                placement.top_left.y + placement.display_size.height / 2.0,
            )
        );
    }
}
