//! Top-level symgraph configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, DeadCodeConfig, OutputConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the analysis root.
pub const PROJECT_CONFIG_FILE: &str = "symgraph.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`SYMGRAPH_*`)
/// 3. Project config (`symgraph.toml` in project root)
/// 4. User config (`~/.symgraph/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SymgraphConfig {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub dead_code: DeadCodeConfig,
}

/// Override values supplied by the embedding tool (e.g. its CLI).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_dir: Option<String>,
    pub skip_patterns: Option<Vec<String>>,
    pub check_members: Option<bool>,
}

impl SymgraphConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &SymgraphConfig) -> Result<(), ConfigError> {
        if let Some(ref dir) = config.output.dir {
            if dir.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "output.dir".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        for pattern in &config.analysis.skip_patterns {
            if let Err(e) = glob::Pattern::new(pattern) {
                return Err(ConfigError::InvalidSkipPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns true when `path` matches one of the effective skip patterns.
    pub fn is_skipped_path(&self, path: &str) -> bool {
        self.analysis.skip_matcher().is_match(path)
    }

    /// Returns the user config path: `~/.symgraph/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".symgraph").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut SymgraphConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SymgraphConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it is set.
    fn merge(base: &mut SymgraphConfig, other: &SymgraphConfig) {
        if !other.analysis.skip_patterns.is_empty() {
            base.analysis.skip_patterns = other.analysis.skip_patterns.clone();
        }
        if !other.analysis.ui_base_classes.is_empty() {
            base.analysis.ui_base_classes = other.analysis.ui_base_classes.clone();
        }
        if !other.analysis.ui_namespaces.is_empty() {
            base.analysis.ui_namespaces = other.analysis.ui_namespaces.clone();
        }
        if !other.analysis.lifecycle_methods.is_empty() {
            base.analysis.lifecycle_methods = other.analysis.lifecycle_methods.clone();
        }

        if other.output.dir.is_some() {
            base.output.dir = other.output.dir.clone();
        }

        if other.dead_code.check_members.is_some() {
            base.dead_code.check_members = other.dead_code.check_members;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SYMGRAPH_OUTPUT_DIR`, `SYMGRAPH_SKIP_PATTERNS` (comma-separated), etc.
    fn apply_env_overrides(config: &mut SymgraphConfig) {
        if let Ok(val) = std::env::var("SYMGRAPH_OUTPUT_DIR") {
            config.output.dir = Some(val);
        }
        if let Ok(val) = std::env::var("SYMGRAPH_SKIP_PATTERNS") {
            let patterns: Vec<String> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if !patterns.is_empty() {
                config.analysis.skip_patterns = patterns;
            }
        }
        if let Ok(val) = std::env::var("SYMGRAPH_DEAD_CODE_CHECK_MEMBERS") {
            if let Ok(v) = val.parse::<bool>() {
                config.dead_code.check_members = Some(v);
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut SymgraphConfig, overrides: &ConfigOverrides) {
        if let Some(ref v) = overrides.output_dir {
            config.output.dir = Some(v.clone());
        }
        if let Some(ref v) = overrides.skip_patterns {
            config.analysis.skip_patterns = v.clone();
        }
        if let Some(v) = overrides.check_members {
            config.dead_code.check_members = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
