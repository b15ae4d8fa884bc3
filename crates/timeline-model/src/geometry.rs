//! Points, sizes, and rectangles in overlay space.
//!
//! Overlay space has its origin at the top-left of the captured source and
//! one unit equals one source pixel.

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation between two points.
    pub fn lerp(a: &Point2D, b: &Point2D, t: f64) -> Point2D {
        let t = t.clamp(0.0, 1.0);
        Point2D {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A 2D extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size2D {
    pub width: f64,
    pub height: f64,
}

impl Size2D {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True unless both dimensions are positive and finite.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite())
    }

    /// Size of the visible crop when magnifying by `zoom_level`.
    pub fn scaled_down(&self, zoom_level: f64) -> Size2D {
        let zoom = zoom_level.max(1.0);
        Size2D::new(self.width / zoom, self.height / zoom)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle at the origin covering `size`.
    pub fn from_size(size: Size2D) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// A rectangle of `size` centered at `center`.
    pub fn centered(center: Point2D, size: Size2D) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn origin(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn size(&self) -> Size2D {
        Size2D::new(self.width, self.height)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shift this rectangle so it lies inside `bounds`.
    ///
    /// Only the origin moves. A rectangle larger than `bounds` on an axis is
    /// shrunk to the bounds on that axis. Empty or non-finite bounds leave
    /// the rectangle unchanged.
    pub fn shifted_inside(&self, bounds: &Rect) -> Rect {
        if bounds.size().is_empty() || !bounds.origin().is_finite() {
            return *self;
        }
        let width = self.width.min(bounds.width);
        let height = self.height.min(bounds.height);
        let x = self.x.clamp(bounds.x, bounds.max_x() - width);
        let y = self.y.clamp(bounds.y, bounds.max_y() - height);
        Rect::new(x, y, width, height)
    }

    /// Whether `other` lies entirely inside this rectangle (with `epsilon` slack).
    pub fn contains_rect(&self, other: &Rect, epsilon: f64) -> bool {
        other.x >= self.x - epsilon
            && other.y >= self.y - epsilon
            && other.max_x() <= self.max_x() + epsilon
            && other.max_y() <= self.max_y() + epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let rect = Rect::centered(Point2D::new(50.0, 40.0), Size2D::new(20.0, 10.0));
        assert_eq!(rect, Rect::new(40.0, 35.0, 20.0, 10.0));
        assert_eq!(rect.center(), Point2D::new(50.0, 40.0));
    }

    #[test]
    fn test_shifted_inside_moves_without_resizing() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rect = Rect::new(-10.0, 80.0, 50.0, 50.0).shifted_inside(&bounds);
        assert_eq!(rect, Rect::new(0.0, 50.0, 50.0, 50.0));
        assert!(bounds.contains_rect(&rect, 0.0));
    }

    #[test]
    fn test_shifted_inside_respects_offset_bounds() {
        let bounds = Rect::new(100.0, 200.0, 400.0, 300.0);
        let rect = Rect::new(0.0, 0.0, 200.0, 150.0).shifted_inside(&bounds);
        assert_eq!(rect.origin(), Point2D::new(100.0, 200.0));
    }

    #[test]
    fn test_non_finite_sizes_are_empty() {
        assert!(Size2D::new(f64::INFINITY, 100.0).is_empty());
        assert!(Size2D::new(100.0, f64::NAN).is_empty());
        assert!(Size2D::new(0.0, 100.0).is_empty());
        assert!(!Size2D::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_shifted_inside_ignores_unusable_bounds() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        let infinite = Rect::new(0.0, 0.0, f64::INFINITY, 100.0);
        assert_eq!(rect.shifted_inside(&infinite), rect);
        let nan_origin = Rect::new(f64::NAN, 0.0, 100.0, 100.0);
        assert_eq!(rect.shifted_inside(&nan_origin), rect);
    }

    #[test]
    fn test_scaled_down_never_grows() {
        let size = Size2D::new(1920.0, 1080.0);
        assert_eq!(size.scaled_down(2.0), Size2D::new(960.0, 540.0));
        assert_eq!(size.scaled_down(0.5), size);
    }

    #[test]
    fn test_point_lerp_clamps() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_eq!(Point2D::lerp(&a, &b, 0.5), Point2D::new(1.5, 2.0));
        assert_eq!(Point2D::lerp(&a, &b, 2.0), b);
    }
}
