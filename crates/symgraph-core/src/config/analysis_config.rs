//! Analysis configuration: file skipping and classification heuristics.

use serde::{Deserialize, Serialize};

/// Default glob patterns for generated or declaration-only files.
pub const DEFAULT_SKIP_PATTERNS: &[&str] = &["*.d.ts", "*.generated.*"];

/// Default UI framework base classes a class component may extend.
pub const DEFAULT_UI_BASE_CLASSES: &[&str] = &[
    "Component",
    "PureComponent",
    "React.Component",
    "React.PureComponent",
];

/// Default UI framework namespace tokens recognized in parameter types.
pub const DEFAULT_UI_NAMESPACES: &[&str] = &["React.", "JSX."];

/// Lifecycle method names that mark a class as a class component.
pub const DEFAULT_LIFECYCLE_METHODS: &[&str] = &[
    "render",
    "componentDidMount",
    "componentDidUpdate",
    "componentWillUnmount",
    "shouldComponentUpdate",
    "getSnapshotBeforeUpdate",
    "componentDidCatch",
    "getDerivedStateFromProps",
];

/// Configuration for the analysis subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Glob patterns (matched against the file name and full path) for
    /// files the resolver and graph builder skip. Default: `*.d.ts`, `*.generated.*`.
    pub skip_patterns: Vec<String>,
    /// Base class names that make a class a UI component.
    pub ui_base_classes: Vec<String>,
    /// Namespace tokens that mark a parameter type as UI-framework props.
    pub ui_namespaces: Vec<String>,
    /// Lifecycle method names recognized on class components.
    pub lifecycle_methods: Vec<String>,
}

fn or_defaults(values: &[String], defaults: &[&str]) -> Vec<String> {
    if values.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        values.to_vec()
    }
}

impl AnalysisConfig {
    pub fn effective_skip_patterns(&self) -> Vec<String> {
        or_defaults(&self.skip_patterns, DEFAULT_SKIP_PATTERNS)
    }

    pub fn effective_ui_base_classes(&self) -> Vec<String> {
        or_defaults(&self.ui_base_classes, DEFAULT_UI_BASE_CLASSES)
    }

    pub fn effective_ui_namespaces(&self) -> Vec<String> {
        or_defaults(&self.ui_namespaces, DEFAULT_UI_NAMESPACES)
    }

    pub fn effective_lifecycle_methods(&self) -> Vec<String> {
        or_defaults(&self.lifecycle_methods, DEFAULT_LIFECYCLE_METHODS)
    }
}

/// Compiled skip patterns. Invalid patterns are dropped; `validate()`
/// reports them before a matcher is ever built from a loaded config.
#[derive(Debug, Clone, Default)]
pub struct SkipMatcher {
    patterns: Vec<glob::Pattern>,
}

impl SkipMatcher {
    pub fn new(patterns: &[String]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .filter_map(|p| glob::Pattern::new(p).ok())
                .collect(),
        }
    }

    /// Matches against the file name and against the full path.
    pub fn is_match(&self, path: &str) -> bool {
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path);
        self.patterns
            .iter()
            .any(|p| p.matches(file_name) || p.matches(path))
    }
}

impl AnalysisConfig {
    pub fn skip_matcher(&self) -> SkipMatcher {
        SkipMatcher::new(&self.effective_skip_patterns())
    }
}
