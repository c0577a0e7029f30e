//! Shared data structures for symgraph.

pub mod collections;
pub mod location;

pub use collections::{FxHashMap, FxHashSet};
pub use location::{Location, Position};
