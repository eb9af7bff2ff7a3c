//! The morph render node.
//!
//! [`MorphNode`] cross-fades between two children as a progress source moves
//! from 0 to 1:
//!
//! | alpha          | paint                                         | semantics    |
//! |----------------|-----------------------------------------------|--------------|
//! | `0`            | first child, no layers                        | first child  |
//! | `1..=128`      | both children through opacity layers          | first child  |
//! | `129..=254`    | both children through opacity layers          | second child |
//! | `255`          | second child, no layers                       | second child |
//!
//! The reported size interpolates linearly between the two children's sizes.

mod config;
mod node;
mod state;

pub use config::{MorphConfig, MorphNodeBuilder};
pub use node::{CachedLayers, MorphNode};
pub use state::{Invalidation, MorphState, SEMANTICS_ALPHA_THRESHOLD, opacity_to_alpha};
