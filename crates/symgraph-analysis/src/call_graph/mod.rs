//! Call Graph Builder: symbol nodes keyed by symbol key, edges as key sets.
//!
//! Callee resolution is textual: bare calls and hooks by name, `this.m()` as
//! `Class.m`, any other member call by its literal `obj.m` text. Markup tags
//! starting with an uppercase letter become render edges.

pub mod builder;
pub mod types;

pub use builder::CallGraphBuilder;
pub use types::{CallEdge, CallGraph, EdgeKind, SymbolNode};
