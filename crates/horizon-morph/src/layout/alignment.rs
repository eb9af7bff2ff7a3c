//! Alignment of a child inside its parent.

use horizon_morph_render::{Point, Size};
use serde::{Deserialize, Serialize};

/// Reading direction used to resolve start/end alignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// A point within a rectangle: `(-1, -1)` is the top-left corner, `(1, 1)`
/// the bottom-right, `(0, 0)` the center.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Alignment {
    pub x: f32,
    pub y: f32,
}

impl Alignment {
    pub const TOP_LEFT: Self = Self::new(-1.0, -1.0);
    pub const TOP_CENTER: Self = Self::new(0.0, -1.0);
    pub const TOP_RIGHT: Self = Self::new(1.0, -1.0);
    pub const CENTER_LEFT: Self = Self::new(-1.0, 0.0);
    pub const CENTER: Self = Self::new(0.0, 0.0);
    pub const CENTER_RIGHT: Self = Self::new(1.0, 0.0);
    pub const BOTTOM_LEFT: Self = Self::new(-1.0, 1.0);
    pub const BOTTOM_CENTER: Self = Self::new(0.0, 1.0);
    pub const BOTTOM_RIGHT: Self = Self::new(1.0, 1.0);

    /// Create an alignment.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset that places a `child` box at this alignment inside `container`.
    ///
    /// Children larger than the container get a negative offset and overflow
    /// on both sides according to the alignment.
    #[inline]
    pub fn along_offset(&self, container: Size, child: Size) -> Point {
        let half_dx = (container.width - child.width) / 2.0;
        let half_dy = (container.height - child.height) / 2.0;
        Point::new(half_dx + self.x * half_dx, half_dy + self.y * half_dy)
    }
}

/// An alignment whose horizontal component follows the reading direction:
/// `start = -1` is the leading edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignmentDirectional {
    pub start: f32,
    pub y: f32,
}

impl AlignmentDirectional {
    pub const TOP_START: Self = Self::new(-1.0, -1.0);
    pub const TOP_END: Self = Self::new(1.0, -1.0);
    pub const CENTER_START: Self = Self::new(-1.0, 0.0);
    pub const CENTER_END: Self = Self::new(1.0, 0.0);
    pub const BOTTOM_START: Self = Self::new(-1.0, 1.0);
    pub const BOTTOM_END: Self = Self::new(1.0, 1.0);

    /// Create a directional alignment.
    #[inline]
    pub const fn new(start: f32, y: f32) -> Self {
        Self { start, y }
    }

    /// Resolve against a reading direction.
    #[inline]
    pub fn resolve(&self, direction: TextDirection) -> Alignment {
        match direction {
            TextDirection::Ltr => Alignment::new(self.start, self.y),
            TextDirection::Rtl => Alignment::new(-self.start, self.y),
        }
    }
}

/// Either kind of alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentGeometry {
    /// Fixed left/right alignment.
    Absolute(Alignment),
    /// Start/end alignment resolved with a [`TextDirection`].
    Directional(AlignmentDirectional),
}

impl AlignmentGeometry {
    /// Resolve to an absolute alignment.
    #[inline]
    pub fn resolve(&self, direction: TextDirection) -> Alignment {
        match self {
            Self::Absolute(alignment) => *alignment,
            Self::Directional(directional) => directional.resolve(direction),
        }
    }
}

impl Default for AlignmentGeometry {
    fn default() -> Self {
        Self::Directional(AlignmentDirectional::TOP_START)
    }
}

impl From<Alignment> for AlignmentGeometry {
    fn from(alignment: Alignment) -> Self {
        Self::Absolute(alignment)
    }
}

impl From<AlignmentDirectional> for AlignmentGeometry {
    fn from(alignment: AlignmentDirectional) -> Self {
        Self::Directional(alignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_along_offset() {
        let container = Size::new(150.0, 75.0);
        let child = Size::new(100.0, 50.0);

        assert_eq!(Alignment::TOP_LEFT.along_offset(container, child), Point::ZERO);
        assert_eq!(
            Alignment::CENTER.along_offset(container, child),
            Point::new(25.0, 12.5)
        );
        assert_eq!(
            Alignment::BOTTOM_RIGHT.along_offset(container, child),
            Point::new(50.0, 25.0)
        );
    }

    #[test]
    fn test_oversized_child_overflows() {
        let container = Size::new(150.0, 75.0);
        let child = Size::new(200.0, 100.0);
        assert_eq!(
            Alignment::CENTER.along_offset(container, child),
            Point::new(-25.0, -12.5)
        );
    }

    #[test]
    fn test_directional_resolution() {
        let geometry = AlignmentGeometry::from(AlignmentDirectional::TOP_START);
        assert_eq!(geometry.resolve(TextDirection::Ltr), Alignment::TOP_LEFT);
        assert_eq!(geometry.resolve(TextDirection::Rtl), Alignment::TOP_RIGHT);

        let fixed = AlignmentGeometry::from(Alignment::BOTTOM_CENTER);
        assert_eq!(fixed.resolve(TextDirection::Rtl), Alignment::BOTTOM_CENTER);
    }
}
