//! Classification rule sets and naming heuristics.

use std::sync::LazyLock;

use regex::Regex;
use symgraph_core::config::AnalysisConfig;

/// `use` followed by a capitalized suffix (`useState`, `useUserData`).
static HOOK_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^use[A-Z]").ok());

/// A single capitalized word run (`UserCard`, `App2`).
static PASCAL_CASE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").ok());

/// Returns true for hook-style names.
pub fn is_hook_name(name: &str) -> bool {
    HOOK_NAME.as_ref().is_some_and(|r| r.is_match(name))
}

/// Returns true for PascalCase names.
pub fn is_pascal_case(name: &str) -> bool {
    PASCAL_CASE.as_ref().is_some_and(|r| r.is_match(name))
}

/// Name lists the classifier matches declaration shapes against.
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    pub ui_base_classes: Vec<String>,
    pub ui_namespaces: Vec<String>,
    pub lifecycle_methods: Vec<String>,
    /// Call names whose result initializes a ref member.
    pub ref_creation_calls: Vec<String>,
}

impl ClassifierRules {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            ui_base_classes: config.effective_ui_base_classes(),
            ui_namespaces: config.effective_ui_namespaces(),
            lifecycle_methods: config.effective_lifecycle_methods(),
            ref_creation_calls: vec!["createRef".to_string(), "React.createRef".to_string()],
        }
    }

    /// Known UI base class, or a base whose last segment ends in `Component`.
    pub fn is_ui_base(&self, base: &str) -> bool {
        if self.ui_base_classes.iter().any(|b| b == base) {
            return true;
        }
        let last = base.rsplit('.').next().unwrap_or(base);
        last.ends_with("Component")
    }

    pub fn is_lifecycle_method(&self, name: &str) -> bool {
        self.lifecycle_methods.iter().any(|m| m == name)
    }

    pub fn is_ref_creation(&self, call: &str) -> bool {
        self.ref_creation_calls.iter().any(|c| c == call)
    }

    /// Parameter type text that marks a props parameter.
    pub fn is_props_type(&self, type_text: &str) -> bool {
        type_text.contains("Props") || self.ui_namespaces.iter().any(|ns| type_text.contains(ns.as_str()))
    }
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}
