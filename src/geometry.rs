//! Points, sizes and the measured container/image geometry the viewport reads on every call.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D point or displacement in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A size is measurable once both sides are finite and strictly positive.
    pub fn is_measurable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned rectangle in container space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn from_center_size(center: Point, size: Size) -> Self {
        let half = Point::new(size.width / 2.0, size.height / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Container and image dimensions as reported by the host at the time of a gesture.
///
/// Both come from the rendering layer and may be zero until the image has
/// finished loading and the container has been laid out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    /// Size of the container the image is displayed in.
    pub container: Size,
    /// Natural (unscaled) size of the image.
    pub image: Size,
}

impl Geometry {
    pub const fn new(container: Size, image: Size) -> Self {
        Self { container, image }
    }

    pub fn is_available(&self) -> bool {
        self.container.is_measurable() && self.image.is_measurable()
    }

    /// Largest allowed `|offset|` on each axis at the given scale.
    ///
    /// Zero on any axis where the scaled image is no larger than the container.
    pub fn max_pan(&self, scale: f32) -> Point {
        Point::new(
            ((self.image.width * scale - self.container.width) / 2.0).max(0.0),
            ((self.image.height * scale - self.container.height) / 2.0).max(0.0),
        )
    }

    /// Clamps an offset into the pan bound for `scale`.
    pub fn clamp_offset(&self, offset: Point, scale: f32) -> Point {
        let max = self.max_pan(scale);
        Point::new(
            offset.x.clamp(-max.x, max.x),
            offset.y.clamp(-max.y, max.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_or_non_finite_sizes_are_not_measurable() {
        assert!(!Size::new(0.0, 100.0).is_measurable());
        assert!(!Size::new(100.0, -1.0).is_measurable());
        assert!(!Size::new(f32::NAN, 100.0).is_measurable());
        assert!(!Size::new(f32::INFINITY, 100.0).is_measurable());
        assert!(Size::new(1.0, 1.0).is_measurable());
    }

    #[test]
    fn max_pan_is_zero_when_image_fits() {
        let geometry = Geometry::new(Size::new(400.0, 300.0), Size::new(200.0, 600.0));
        let max = geometry.max_pan(1.0);
        assert_eq!(max.x, 0.0);
        assert_eq!(max.y, 150.0);
    }

    #[test]
    fn clamp_offset_pins_small_axis_to_center() {
        let geometry = Geometry::new(Size::new(400.0, 300.0), Size::new(200.0, 600.0));
        let clamped = geometry.clamp_offset(Point::new(80.0, -500.0), 1.0);
        assert_eq!(clamped, Point::new(0.0, -150.0));
    }

    #[test]
    fn rect_from_center_size() {
        let rect = Rect::from_center_size(Point::new(100.0, 50.0), Size::new(40.0, 20.0));
        assert_eq!(rect.min, Point::new(80.0, 40.0));
        assert_eq!(rect.max, Point::new(120.0, 60.0));
        assert_eq!(rect.width(), 40.0);
        assert_eq!(rect.height(), 20.0);
    }
}
