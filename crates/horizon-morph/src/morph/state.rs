//! Progress-derived state of a morph node and the invalidations it implies.

use std::ops::{BitOr, BitOrAssign};

use crate::render_box::{ChildSlot, RenderHost};

/// Alpha at or below which the first child owns semantics.
pub const SEMANTICS_ALPHA_THRESHOLD: u8 = 128;

/// Convert an opacity in `0.0..=1.0` to an 8-bit alpha.
///
/// Out-of-range opacities are clamped; NaN maps to 0.
#[inline]
pub fn opacity_to_alpha(opacity: f32) -> u8 {
    if opacity.is_nan() {
        return 0;
    }
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Which host phases need to rerun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Invalidation {
    pub layout: bool,
    pub paint: bool,
    pub semantics: bool,
    pub compositing_bits: bool,
}

impl Invalidation {
    /// Nothing to rerun.
    pub const NONE: Self = Self {
        layout: false,
        paint: false,
        semantics: false,
        compositing_bits: false,
    };

    /// Only layout.
    pub const LAYOUT: Self = Self {
        layout: true,
        ..Self::NONE
    };

    /// Only paint.
    pub const PAINT: Self = Self {
        paint: true,
        ..Self::NONE
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// Send each marked phase to `host`.
    pub fn apply(&self, host: &dyn RenderHost) {
        if self.layout {
            host.mark_needs_layout();
        }
        if self.paint {
            host.mark_needs_paint();
        }
        if self.semantics {
            host.mark_needs_semantics_update();
        }
        if self.compositing_bits {
            host.mark_needs_compositing_bits_update();
        }
    }
}

impl BitOr for Invalidation {
    type Output = Invalidation;

    fn bitor(self, rhs: Invalidation) -> Invalidation {
        Invalidation {
            layout: self.layout || rhs.layout,
            paint: self.paint || rhs.paint,
            semantics: self.semantics || rhs.semantics,
            compositing_bits: self.compositing_bits || rhs.compositing_bits,
        }
    }
}

impl BitOrAssign for Invalidation {
    fn bitor_assign(&mut self, rhs: Invalidation) {
        *self = *self | rhs;
    }
}

/// Cached progress, alpha and compositing need.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MorphState {
    last_value: Option<f32>,
    alpha: Option<u8>,
    compositing_enabled: bool,
}

impl MorphState {
    /// Unset state: no progress seen yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last observed progress value.
    #[inline]
    pub fn last_value(&self) -> Option<f32> {
        self.last_value
    }

    /// The alpha derived from the last observed progress.
    #[inline]
    pub fn alpha(&self) -> Option<u8> {
        self.alpha
    }

    /// Whether the node is mid-morph and paints through opacity layers.
    #[inline]
    pub fn compositing_enabled(&self) -> bool {
        self.compositing_enabled
    }

    /// The child exposed to semantics.
    #[inline]
    pub fn semantics_child(&self) -> ChildSlot {
        if self.alpha.unwrap_or(0) > SEMANTICS_ALPHA_THRESHOLD {
            ChildSlot::Second
        } else {
            ChildSlot::First
        }
    }

    /// Observe a new progress value and report what it invalidates.
    ///
    /// Semantics and compositing checks only run when the alpha changed.
    /// Non-finite values are observed as 0.
    pub fn update(&mut self, value: f32) -> Invalidation {
        let value = if value.is_finite() { value } else { 0.0 };
        let mut invalidation = Invalidation::NONE;

        if self.last_value != Some(value) {
            invalidation.layout = true;
            self.last_value = Some(value);
        }

        let new_alpha = opacity_to_alpha(value);
        let old_alpha = self.alpha.unwrap_or(0);
        if self.alpha != Some(new_alpha) {
            self.alpha = Some(new_alpha);
            if old_alpha != new_alpha {
                invalidation.paint = true;
                invalidation.semantics = old_alpha == 0
                    || new_alpha == 0
                    || (old_alpha <= SEMANTICS_ALPHA_THRESHOLD)
                        != (new_alpha <= SEMANTICS_ALPHA_THRESHOLD);
            }
        }

        let compositing_enabled = new_alpha > 0 && new_alpha < u8::MAX;
        if compositing_enabled != self.compositing_enabled {
            self.compositing_enabled = compositing_enabled;
            invalidation.compositing_bits = true;
        }

        invalidation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_endpoints_and_rounding() {
        assert_eq!(opacity_to_alpha(0.0), 0);
        assert_eq!(opacity_to_alpha(1.0), 255);
        assert_eq!(opacity_to_alpha(0.5), 128);
        assert_eq!(opacity_to_alpha(0.25), 64);
        assert_eq!(opacity_to_alpha(-3.0), 0);
        assert_eq!(opacity_to_alpha(7.0), 255);
        assert_eq!(opacity_to_alpha(f32::NAN), 0);
    }

    #[test]
    fn test_alpha_is_monotonic() {
        let mut previous = 0;
        for step in 0..=1000 {
            let alpha = opacity_to_alpha(step as f32 / 1000.0);
            assert!(alpha >= previous);
            previous = alpha;
        }
        assert_eq!(previous, 255);
    }

    #[test]
    fn test_first_update_from_unset() {
        let mut state = MorphState::new();
        assert_eq!(state.semantics_child(), ChildSlot::First);

        let invalidation = state.update(0.5);
        assert_eq!(
            invalidation,
            Invalidation {
                layout: true,
                paint: true,
                semantics: true,
                compositing_bits: true,
            }
        );
        assert_eq!(state.alpha(), Some(128));
        assert!(state.compositing_enabled());
        assert_eq!(state.semantics_child(), ChildSlot::First);
    }

    #[test]
    fn test_unset_zero_marks_only_layout() {
        let mut state = MorphState::new();
        assert_eq!(state.update(0.0), Invalidation::LAYOUT);
        assert_eq!(state.alpha(), Some(0));
        assert!(!state.compositing_enabled());
    }

    #[test]
    fn test_same_value_invalidates_nothing() {
        let mut state = MorphState::new();
        state.update(0.3);
        assert!(state.update(0.3).is_empty());
    }

    #[test]
    fn test_value_change_within_same_alpha_is_layout_only() {
        let mut state = MorphState::new();
        state.update(0.5);
        // 0.5 and 0.501 both round to 128.
        assert_eq!(state.update(0.501), Invalidation::LAYOUT);
    }

    #[test]
    fn test_non_finite_values_read_as_zero() {
        let mut state = MorphState::new();
        assert_eq!(state.update(f32::NAN), Invalidation::LAYOUT);
        assert!(state.update(f32::NAN).is_empty());
        assert_eq!(state.last_value(), Some(0.0));
        assert_eq!(state.alpha(), Some(0));

        state.update(0.5);
        let invalidation = state.update(f32::INFINITY);
        assert!(invalidation.layout && invalidation.semantics);
        assert_eq!(state.last_value(), Some(0.0));
        assert!(!state.compositing_enabled());
    }

    #[test]
    fn test_semantics_crossing_128() {
        let mut state = MorphState::new();
        state.update(0.3);

        // 128 -> 129 crosses upward.
        state.update(128.0 / 255.0);
        let up = state.update(129.0 / 255.0);
        assert!(up.semantics);
        assert_eq!(state.semantics_child(), ChildSlot::Second);

        // 129 -> 200 stays on the same side.
        assert!(!state.update(200.0 / 255.0).semantics);

        // 200 -> 128 crosses downward.
        let down = state.update(128.0 / 255.0);
        assert!(down.semantics);
        assert_eq!(state.semantics_child(), ChildSlot::First);
    }

    #[test]
    fn test_semantics_on_zero_transitions() {
        let mut state = MorphState::new();
        state.update(0.2);
        assert!(state.update(0.0).semantics);
        assert!(state.update(0.1).semantics);
        assert!(!state.update(0.2).semantics);
    }

    #[test]
    fn test_compositing_bits_once_per_crossing() {
        let mut state = MorphState::new();
        state.update(0.0);

        let mut flips = 0;
        for step in 1..=10 {
            if state.update(step as f32 / 10.0).compositing_bits {
                flips += 1;
            }
        }
        // 0 -> mid (enable) and mid -> 255 (disable).
        assert_eq!(flips, 2);
        assert!(!state.compositing_enabled());
        assert_eq!(state.alpha(), Some(255));
    }

    #[test]
    fn test_invalidation_merge_and_apply() {
        use crate::invalidation::FrameInvalidation;

        let mut merged = Invalidation::LAYOUT;
        merged |= Invalidation::PAINT;
        assert!(merged.layout && merged.paint && !merged.semantics);

        let host = FrameInvalidation::new();
        merged.apply(&host);
        let counts = host.take();
        assert_eq!((counts.layout, counts.paint, counts.semantics), (1, 1, 0));
    }
}
