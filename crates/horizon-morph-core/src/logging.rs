//! Logging and tracing facilities for Horizon Morph.
//!
//! Horizon Morph uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_morph=trace,horizon_morph_core=debug")
//!     .init();
//! ```
//!
//! The constants below name the targets and spans emitted by the workspace so
//! filters can be written without guessing module paths.

/// Span names used throughout Horizon Morph for tracing.
pub mod span_names {
    /// Progress recompute span.
    pub const RECOMPUTE: &str = "horizon_morph::recompute";
    /// Layout pass span.
    pub const LAYOUT: &str = "horizon_morph::layout";
    /// Paint pass span.
    pub const PAINT: &str = "horizon_morph::paint";
}

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_morph_core::signal";
    /// Progress source target.
    pub const PROGRESS: &str = "horizon_morph_core::progress";
    /// Morph render node target.
    pub const MORPH: &str = "horizon_morph::morph";
    /// Layout helpers target.
    pub const LAYOUT: &str = "horizon_morph::layout";
    /// Performance spans target.
    pub const PERF: &str = "horizon_morph::perf";
}

/// A guard that keeps a performance span entered until dropped.
///
/// This is useful for tracking the duration of frame phases.
///
/// ```
/// use horizon_morph_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("layout");
///     // ... work measured by the span ...
/// }
/// ```
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
