//! Core systems for Horizon Morph.
//!
//! This crate provides the reactive primitives the morph render node is built
//! on:
//!
//! - **Signal/Slot System**: Synchronous, type-safe change notification
//! - **Progress Sources**: Observable `0.0..=1.0` values driven by an external
//!   animation clock, with owned [`Subscription`] handles
//! - **Logging**: `tracing` targets, span names and [`PerfSpan`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_morph_core::{AnimationProgress, ProgressSource};
//!
//! let progress = Arc::new(AnimationProgress::new(0.0));
//! let id = progress.subscribe(Box::new(|value| println!("progress: {value}")));
//! progress.set_value(0.5).unwrap();
//! progress.unsubscribe(id);
//! ```

mod error;
pub mod logging;
pub mod progress;
pub mod signal;

pub use error::{CoreError, CoreResult};
pub use logging::PerfSpan;
pub use progress::{
    AnimationProgress, ConstantProgress, ProgressListener, ProgressSource, ReverseProgress,
    Subscription,
};
pub use signal::{ConnectionId, Signal};
