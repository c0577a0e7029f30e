//! symgraph-analysis: symbol graph and reference analysis engine
//!
//! - Source Model: the parsed-program abstraction the engine consumes
//! - Classifier: declaration shape to semantic kind
//! - References: definitions and valid referencing occurrences
//! - Call Graph: symbol nodes and call/render/hook edges
//! - Paths: forward traces, reverse caller chains, diagram export
//! - Dead Code: declarations unreferenced outside their file

pub mod source_model;
pub mod classifier;
pub mod references;
pub mod call_graph;
pub mod paths;
pub mod dead_code;

// Re-exports for convenience
pub use call_graph::{CallGraph, CallGraphBuilder};
pub use classifier::{SymbolClassifier, SymbolKind};
pub use dead_code::{DeadSymbolDetector, SymbolInfo};
pub use paths::{CallGraphResult, CallPath, PathSearch, TraceQuery};
pub use references::{ReferenceResolver, ReferenceResult};
pub use source_model::{InMemoryModel, SourceModel};
