//! Reference resolution types.

use serde::{Deserialize, Serialize};
use symgraph_core::types::Location;

use crate::classifier::{SymbolClassifier, SymbolKind};
use crate::source_model::{ClassMember, Declaration, SourceModel, SyntaxHandle};

/// How an occurrence refers to the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    Definition,
    Import,
    ReExport,
    DefaultExport,
    Heritage,
    Markup,
    Call,
    Construct,
    TypeReference,
    Property,
    Decorator,
    Other,
}

/// A located use of a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub location: Location,
    /// Containment trail, e.g. `class UserService > method updateUser`.
    pub context: String,
    pub kind: ReferenceKind,
    pub valid: bool,
}

/// Definition plus every valid reference to a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceResult {
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    pub definition: Occurrence,
    pub references: Vec<Occurrence>,
    #[serde(rename = "isReferenced")]
    pub is_referenced: bool,
}

/// The authoritative definition site of a name.
#[derive(Debug, Clone, Copy)]
pub enum Definition<'m> {
    Declaration(&'m Declaration),
    Member {
        class: &'m Declaration,
        member: &'m ClassMember,
    },
}

impl<'m> Definition<'m> {
    pub fn name(&self) -> &'m str {
        match self {
            Self::Declaration(d) => &d.name,
            Self::Member { member, .. } => &member.name,
        }
    }

    pub fn file(&self) -> &'m str {
        match self {
            Self::Declaration(d) => &d.file,
            Self::Member { class, .. } => &class.file,
        }
    }

    pub fn handle(&self) -> SyntaxHandle {
        match self {
            Self::Declaration(d) => d.handle,
            Self::Member { member, .. } => member.handle,
        }
    }

    /// Definition location, degraded to zero when the model has no position.
    pub fn location(&self) -> Location {
        match self {
            Self::Declaration(d) => d.location_or_zero(),
            Self::Member { class, member } => member
                .position
                .map(|p| Location::at(class.file.clone(), p))
                .unwrap_or_else(|| Location::zero(class.file.clone())),
        }
    }

    /// Owning class name for members.
    pub fn owner(&self) -> Option<&'m str> {
        match self {
            Self::Declaration(_) => None,
            Self::Member { class, .. } => Some(&class.name),
        }
    }

    pub fn kind<M: SourceModel + ?Sized>(&self, classifier: &SymbolClassifier, model: &M) -> SymbolKind {
        match self {
            Self::Declaration(d) => classifier.classify_in(model, d),
            Self::Member { member, .. } => classifier.classify_member(member),
        }
    }
}
