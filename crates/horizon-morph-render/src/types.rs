//! Basic geometry types for layout and painting.

use std::ops::{Add, Sub};

use bytemuck::{Pod, Zeroable};

/// A point (or offset) in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Convert to a glam Vec2.
    #[inline]
    pub fn to_vec2(self) -> glam::Vec2 {
        glam::Vec2::new(self.x, self.y)
    }

    /// Create from a glam Vec2.
    #[inline]
    pub fn from_vec2(v: glam::Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::from_vec2(self.to_vec2() + rhs.to_vec2())
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::from_vec2(self.to_vec2() - rhs.to_vec2())
    }
}

impl From<glam::Vec2> for Point {
    fn from(v: glam::Vec2) -> Self {
        Self::from_vec2(v)
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Linearly interpolate each dimension: `self + (other - self) * t`.
    #[inline]
    pub fn lerp(self, other: Size, t: f32) -> Size {
        let from = glam::Vec2::new(self.width, self.height);
        let to = glam::Vec2::new(other.width, other.height);
        let v = from + (to - from) * t;
        Size::new(v.x, v.y)
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Create a rectangle at `origin` with `size`.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Offset the rectangle by the given amount.
    #[inline]
    pub fn translate(&self, offset: Point) -> Rect {
        Rect {
            origin: self.origin + offset,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_lerp() {
        let from = Size::new(100.0, 50.0);
        let to = Size::new(200.0, 100.0);

        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
        assert_eq!(from.lerp(to, 0.5), Size::new(150.0, 75.0));
        // Shrinking works the same way.
        assert_eq!(to.lerp(from, 0.25), Size::new(175.0, 87.5));
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(1.5, -2.0);
        assert_eq!(a + b, Point::new(11.5, 18.0));
        assert_eq!(a - b, Point::new(8.5, 22.0));
    }

    #[test]
    fn test_rect_translate() {
        let rect = Rect::from_origin_size(Point::ZERO, Size::new(100.0, 50.0));
        let moved = rect.translate(Point::new(50.0, 25.0));
        assert_eq!(moved, Rect::new(50.0, 25.0, 100.0, 50.0));
        assert_eq!(moved.size, rect.size);
    }
}
