//! Dead symbol detection configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeadCodeConfig {
    /// Check class members in addition to top-level declarations. Default: true.
    pub check_members: Option<bool>,
}

impl DeadCodeConfig {
    pub fn effective_check_members(&self) -> bool {
        self.check_members.unwrap_or(true)
    }
}
