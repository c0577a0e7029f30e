//! Configuration system for symgraph.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod analysis_config;
pub mod dead_code_config;
pub mod output_config;
pub mod symgraph_config;

pub use analysis_config::{AnalysisConfig, SkipMatcher};
pub use dead_code_config::DeadCodeConfig;
pub use output_config::OutputConfig;
pub use symgraph_config::{ConfigOverrides, SymgraphConfig};
