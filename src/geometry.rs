// SPDX-License-Identifier: MPL-2.0
//! Geometry primitives for the stage coordinate space.
//!
//! All values are in container pixels: the origin is the container's
//! top-left corner, `x` grows right and `y` grows down.

use crate::config::{DEFAULT_SCALE_FACTOR, MAX_SCALE_FACTOR, MIN_SCALE_FACTOR};
use std::ops::{Add, AddAssign, Sub};

/// A position in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, delta: Vec2) -> Point {
        Point::new(self.x + delta.x, self.y + delta.y)
    }
}

impl AddAssign<Vec2> for Point {
    fn add_assign(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, other: Point) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

/// A displacement between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the size multiplied by a uniform ratio.
    #[must_use]
    pub fn scaled(self, ratio: f32) -> Self {
        Self::new(self.width * ratio, self.height * ratio)
    }

    /// Returns whether either dimension is zero or negative.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Uniform scale factor, guaranteed to be within the valid range
/// (0.2–5.0).
///
/// This type ensures that scale values are always valid, eliminating
/// the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor(f32);

impl ScaleFactor {
    /// Creates a new scale factor, clamping the value to the valid range.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        Self(factor.clamp(MIN_SCALE_FACTOR, MAX_SCALE_FACTOR))
    }

    /// Returns the raw factor value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether the factor is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_SCALE_FACTOR
    }

    /// Returns whether the factor is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_SCALE_FACTOR
    }

    /// Multiplies by a cumulative pinch factor, clamping the result.
    #[must_use]
    pub fn pinched(self, factor: f32) -> Self {
        Self::new(self.0 * factor)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(DEFAULT_SCALE_FACTOR)
    }
}
