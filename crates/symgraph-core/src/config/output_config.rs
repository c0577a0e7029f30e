//! Output configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for where reports and diagrams are suggested to go.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for exported diagrams. Default: `.symgraph`.
    pub dir: Option<String>,
}

impl OutputConfig {
    /// Returns the effective output directory, defaulting to `.symgraph`.
    pub fn effective_dir(&self) -> PathBuf {
        PathBuf::from(self.dir.as_deref().unwrap_or(".symgraph"))
    }
}
