//! Box constraints passed down the render tree during layout.

use horizon_morph_render::Size;

use crate::error::{MorphError, MorphResult};

/// Minimum and maximum width and height a box may choose.
///
/// A box laid out under these constraints must report a size with
/// `min_width <= width <= max_width` and `min_height <= height <= max_height`.
/// Maximums may be `f32::INFINITY` (unbounded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConstraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl BoxConstraints {
    /// Create constraints without validation.
    #[inline]
    pub const fn new(min_width: f32, max_width: f32, min_height: f32, max_height: f32) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// Create constraints, rejecting anything that is not normalized.
    pub fn try_new(
        min_width: f32,
        max_width: f32,
        min_height: f32,
        max_height: f32,
    ) -> MorphResult<Self> {
        let constraints = Self::new(min_width, max_width, min_height, max_height);
        if constraints.is_normalized() {
            Ok(constraints)
        } else {
            Err(MorphError::InvalidConstraints {
                min_width,
                max_width,
                min_height,
                max_height,
            })
        }
    }

    /// Constraints that only allow exactly `size`.
    #[inline]
    pub const fn tight(size: Size) -> Self {
        Self::new(size.width, size.width, size.height, size.height)
    }

    /// Constraints that allow anything from zero up to `size`.
    #[inline]
    pub const fn loose(size: Size) -> Self {
        Self::new(0.0, size.width, 0.0, size.height)
    }

    /// Constraints with no upper bound.
    #[inline]
    pub const fn unbounded() -> Self {
        Self::new(0.0, f32::INFINITY, 0.0, f32::INFINITY)
    }

    /// The same maximums with the minimums removed.
    #[inline]
    pub fn loosen(&self) -> Self {
        Self::new(0.0, self.max_width, 0.0, self.max_height)
    }

    /// Clamp a width into these constraints.
    #[inline]
    pub fn constrain_width(&self, width: f32) -> f32 {
        width.max(self.min_width).min(self.max_width)
    }

    /// Clamp a height into these constraints.
    #[inline]
    pub fn constrain_height(&self, height: f32) -> f32 {
        height.max(self.min_height).min(self.max_height)
    }

    /// Clamp a size into these constraints.
    #[inline]
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(self.constrain_width(size.width), self.constrain_height(size.height))
    }

    /// The largest size that satisfies the constraints.
    ///
    /// Unbounded dimensions report their minimum.
    #[inline]
    pub fn biggest(&self) -> Size {
        let width = if self.has_bounded_width() {
            self.max_width
        } else {
            self.min_width
        };
        let height = if self.has_bounded_height() {
            self.max_height
        } else {
            self.min_height
        };
        Size::new(width, height)
    }

    /// The smallest size that satisfies the constraints.
    #[inline]
    pub fn smallest(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    /// Whether the maximum width is finite.
    #[inline]
    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    /// Whether the maximum height is finite.
    #[inline]
    pub fn has_bounded_height(&self) -> bool {
        self.max_height.is_finite()
    }

    /// Whether exactly one size satisfies the constraints.
    #[inline]
    pub fn is_tight(&self) -> bool {
        self.min_width >= self.max_width && self.min_height >= self.max_height
    }

    /// Whether the bounds are non-negative, ordered and not NaN.
    pub fn is_normalized(&self) -> bool {
        self.min_width >= 0.0
            && self.min_width <= self.max_width
            && self.min_height >= 0.0
            && self.min_height <= self.max_height
            && self.min_width.is_finite()
            && self.min_height.is_finite()
    }
}

impl Default for BoxConstraints {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrain_clamps_both_ways() {
        let constraints = BoxConstraints::new(50.0, 120.0, 10.0, 60.0);
        assert_eq!(
            constraints.constrain(Size::new(150.0, 75.0)),
            Size::new(120.0, 60.0)
        );
        assert_eq!(
            constraints.constrain(Size::new(20.0, 5.0)),
            Size::new(50.0, 10.0)
        );
        assert_eq!(
            constraints.constrain(Size::new(80.0, 30.0)),
            Size::new(80.0, 30.0)
        );
    }

    #[test]
    fn test_tight_and_loose() {
        let size = Size::new(150.0, 75.0);
        let tight = BoxConstraints::tight(size);
        assert!(tight.is_tight());
        assert_eq!(tight.constrain(Size::new(1.0, 1000.0)), size);

        let loose = BoxConstraints::loose(size);
        assert!(!loose.is_tight());
        assert_eq!(loose.smallest(), Size::ZERO);
        assert_eq!(loose.biggest(), size);
        assert_eq!(tight.loosen(), loose);
    }

    #[test]
    fn test_unbounded_biggest_falls_back_to_minimum() {
        let constraints = BoxConstraints::new(10.0, f32::INFINITY, 20.0, 40.0);
        assert!(!constraints.has_bounded_width());
        assert_eq!(constraints.biggest(), Size::new(10.0, 40.0));
        assert_eq!(
            BoxConstraints::unbounded().constrain(Size::new(1e6, 3.0)),
            Size::new(1e6, 3.0)
        );
    }

    #[test]
    fn test_try_new_rejects_inverted_bounds() {
        assert!(BoxConstraints::try_new(0.0, 10.0, 0.0, 10.0).is_ok());
        assert!(matches!(
            BoxConstraints::try_new(20.0, 10.0, 0.0, 10.0),
            Err(MorphError::InvalidConstraints { .. })
        ));
        assert!(BoxConstraints::try_new(-1.0, 10.0, 0.0, 10.0).is_err());
        assert!(BoxConstraints::try_new(0.0, 10.0, f32::NAN, 10.0).is_err());
    }
}
