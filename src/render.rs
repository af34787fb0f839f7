// SPDX-License-Identifier: MPL-2.0
//! Style builders for the rendering collaborator.
//!
//! The core does not touch display elements; after every committed
//! transform change the embedding shell re-applies the style produced
//! here. The string format and property order match a CSS transform
//! list applied to an absolutely positioned wrapper.

use crate::config::Z_INDEX_BASE;
use crate::editor::entity::Transform2D;

/// The CSS-equivalent transform for an image wrapper: translate, then
/// scale, then rotate.
#[must_use]
pub fn transform_style(transform: &Transform2D) -> String {
    let scale = transform.scale.value();
    format!(
        "translate({}px, {}px)scale({}, {})rotate({}deg)",
        transform.translate.x, transform.translate.y, scale, scale, transform.rotation
    )
}

/// The counter-scale for the remove icon, so it keeps its on-screen
/// size while the image scales.
#[must_use]
pub fn remove_icon_style(transform: &Transform2D) -> String {
    let inverse = 1.0 / transform.scale.value();
    format!("scale({}, {})", inverse, inverse)
}

/// The stacking index for an image wrapper; higher order stacks on top.
#[must_use]
pub fn z_index(order: u32) -> u32 {
    Z_INDEX_BASE + order
}
