//! Core types, errors, configuration, and tracing for symgraph.
//!
//! Everything the analysis engine shares lives here so that the engine
//! crate only carries graph and resolution logic.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;
