//! Path Search: forward traces and reverse caller chains over a [`CallGraph`].
//!
//! [`CallGraph`]: crate::call_graph::CallGraph

pub mod diagram;
pub mod query;
pub mod search;

pub use diagram::render_diagram;
pub use query::TraceQuery;
pub use search::PathSearch;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::call_graph::CallEdge;

/// One path through the graph. `edges[i]` connects `nodes[i]` to `nodes[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallPath {
    pub nodes: Vec<String>,
    pub edges: Vec<CallEdge>,
    pub start_symbol: String,
    pub end_symbol: String,
}

impl CallPath {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.nodes.iter().any(|n| n == key)
    }
}

/// Result of a path search, ready for the reporting layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallGraphResult {
    pub paths: Vec<CallPath>,
    pub total_paths: usize,
    /// Mermaid class diagram of the nodes and edges on `paths`.
    pub rendered_diagram: String,
    /// Where the reporting layer may write `rendered_diagram`. Never written here.
    pub suggested_output_path: PathBuf,
}
