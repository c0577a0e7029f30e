//! Semantic symbol kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic kind of a declaration.
///
/// The component and hook variants are heuristic classifications layered
/// on top of the base syntactic kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolKind {
    Function,
    Interface,
    Class,
    Variable,
    Method,
    Property,
    Enum,
    FunctionComponent,
    ClassComponent,
    PotentialComponent,
    ReactHook,
}

impl SymbolKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Interface => "interface",
            Self::Class => "class",
            Self::Variable => "variable",
            Self::Method => "method",
            Self::Property => "property",
            Self::Enum => "enum",
            Self::FunctionComponent => "function-component",
            Self::ClassComponent => "class-component",
            Self::PotentialComponent => "potential-component",
            Self::ReactHook => "react-hook",
        }
    }

    pub fn is_component(&self) -> bool {
        matches!(
            self,
            Self::FunctionComponent | Self::ClassComponent | Self::PotentialComponent
        )
    }

    pub fn is_hook(&self) -> bool {
        matches!(self, Self::ReactHook)
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
