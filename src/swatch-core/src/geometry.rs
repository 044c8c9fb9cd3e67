//! Geometry primitives in device-independent pixels.
//!
//! - [`Point`]: a position, usually relative to a surface's top-left corner
//! - [`Size`]: the extent of a surface, dialog or viewport
//! - [`Rect`]: a positioned box, e.g. the swatch's bounding rectangle
//!
//! Coordinates are `f64` because hosts report fractional pixel offsets.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point.
///
/// # Examples
///
/// ```
/// use swatch_core::geometry::Point;
///
/// let p = Point::new(10.0, 20.0) + Point::new(5.0, 5.0);
/// assert_eq!(p, Point::new(15.0, 25.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamps the point into `[0, size.width] x [0, size.height]`.
    #[inline]
    pub fn clamp_to(self, size: Size) -> Self {
        Self {
            x: self.x.clamp(0.0, size.width.max(0.0)),
            y: self.y.clamp(0.0, size.height.max(0.0)),
        }
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    #[serde(default)]
    pub height: f64,
}

impl Size {
    /// A zero-sized area.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns whether either dimension is zero or negative.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<(f64, f64)> for Size {
    #[inline]
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

/// A rectangle defined by its top-left corner and size.
///
/// # Examples
///
/// ```
/// use swatch_core::geometry::{Point, Rect};
///
/// let rect = Rect::new(10.0, 480.0, 24.0, 20.0);
/// assert_eq!(rect.bottom(), 500.0);
/// assert!(rect.contains_point(Point::new(12.0, 490.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from position and dimensions.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Dimensions.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns whether the point lies inside (right and bottom edges exclusive).
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p + Point::new(1.0, 1.0), Point::new(4.0, 5.0));
        assert_eq!(p - Point::new(1.0, 1.0), Point::new(2.0, 3.0));
    }

    #[test]
    fn test_point_clamp_to() {
        let size = Size::new(200.0, 150.0);
        assert_eq!(Point::new(-10.0, 400.0).clamp_to(size), Point::new(0.0, 150.0));
        assert_eq!(Point::new(50.0, 60.0).clamp_to(size), Point::new(50.0, 60.0));
        assert_eq!(Point::new(5.0, 5.0).clamp_to(Size::ZERO), Point::ZERO);
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
        assert_eq!(rect.size(), Size::new(30.0, 40.0));
        assert_eq!(rect.origin(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_rect_contains_point() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains_point(Point::new(0.0, 0.0)));
        assert!(rect.contains_point(Point::new(9.5, 9.5)));
        assert!(!rect.contains_point(Point::new(10.0, 5.0)));
        assert!(!rect.contains_point(Point::new(-0.1, 5.0)));
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(!Size::new(10.0, 1.0).is_empty());
    }
}
