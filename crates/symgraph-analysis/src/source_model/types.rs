//! Source model types: declarations, shapes and name occurrences.
//!
//! These describe an already-parsed program. The engine never looks at
//! source text; everything it needs is expressed as a tagged shape.

use std::fmt;

use serde::{Deserialize, Serialize};
use symgraph_core::types::{Location, Position};

/// Opaque handle to a syntax node owned by the source model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SyntaxHandle(pub u32);

/// A file known to the source model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    /// Generated or declaration-only file (e.g. `.d.ts`).
    pub generated: bool,
}

/// What owns a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Container {
    /// Top level of a module.
    Module,
    /// A class body.
    Class(String),
    /// Nested inside a function or block.
    None,
}

/// A named definition site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub shape: DeclShape,
    pub container: Container,
    pub file: String,
    /// `None` when the model could not compute a position.
    pub position: Option<Position>,
    pub exported: bool,
    pub handle: SyntaxHandle,
}

/// Name recorded for default exports that introduce no identifier.
pub const DEFAULT_EXPORT_NAME: &str = "default";

impl Declaration {
    pub fn location(&self) -> Option<Location> {
        self.position.map(|p| Location::at(self.file.clone(), p))
    }

    /// Location, degraded to line/column zero when unknown.
    pub fn location_or_zero(&self) -> Location {
        self.location()
            .unwrap_or_else(|| Location::zero(self.file.clone()))
    }

    pub fn is_module_scope(&self) -> bool {
        self.container == Container::Module
    }

    /// `export default X`, or an anonymous `export default function`.
    /// Neither declares a symbol other code can name.
    pub fn is_nameless(&self) -> bool {
        match &self.shape {
            DeclShape::DefaultExport(ExportTarget::Identifier { .. }) => true,
            DeclShape::DefaultExport(ExportTarget::Function(_)) => self.name == DEFAULT_EXPORT_NAME,
            _ => false,
        }
    }

    pub fn class_shape(&self) -> Option<&ClassShape> {
        match &self.shape {
            DeclShape::Class(c) => Some(c),
            _ => None,
        }
    }
}

/// Syntactic shape of a declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DeclShape {
    Class(ClassShape),
    /// Named function declaration.
    Function(FunctionShape),
    /// Variable declaration; `initializer` is set for arrow/function-expression values.
    Variable { initializer: Option<FunctionShape> },
    /// Default-export assignment.
    DefaultExport(ExportTarget),
    Interface,
    Enum,
}

/// The payload of a default-export assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExportTarget {
    /// `export default function X() {}` or `export default () => ...`.
    Function(FunctionShape),
    /// `export default X` or, with a wrapper, `export default memo(X)`.
    Identifier {
        name: String,
        wrapper: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassShape {
    /// Base names from `extends` clauses, as written (`React.Component`).
    pub heritage: Vec<String>,
    pub members: Vec<ClassMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Method,
    Property,
    Constructor,
    Getter,
    Setter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMember {
    pub name: String,
    pub kind: MemberKind,
    /// Carried for providers and reporting. Dead symbol checks cover
    /// instance members whatever their visibility.
    pub visibility: Visibility,
    pub is_static: bool,
    /// Callee text of a call initializer (`ref = React.createRef()` → `React.createRef`).
    pub initializer_call: Option<String>,
    /// Parameters and body for methods and accessors.
    pub function: Option<FunctionShape>,
    pub position: Option<Position>,
    pub handle: SyntaxHandle,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionShape {
    pub params: Vec<Param>,
    pub body: Body,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub type_annotation: Option<String>,
    pub handle: SyntaxHandle,
}

/// Call expressions and markup elements of a callable body, in source order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Body {
    pub calls: Vec<CallExpr>,
    pub markup: Vec<MarkupElement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallExpr {
    pub target: CallTarget,
    pub position: Position,
    /// `new X()` rather than `X()`.
    pub is_new: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallTarget {
    /// `foo()`
    Name(String),
    /// `obj.method()`; `object` is the full receiver text.
    Member { object: String, property: String },
}

impl CallTarget {
    /// The name actually being invoked (`foo`, or `method` for `obj.method`).
    pub fn callee_name(&self) -> &str {
        match self {
            Self::Name(n) => n,
            Self::Member { property, .. } => property,
        }
    }

    /// Literal call target text.
    pub fn text(&self) -> String {
        match self {
            Self::Name(n) => n.clone(),
            Self::Member { object, property } => format!("{object}.{property}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupElement {
    pub tag: String,
    pub position: Position,
}

/// A located occurrence of an identifier, with its syntactic role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameOccurrence {
    pub position: Position,
    pub role: OccurrenceRole,
    pub handle: SyntaxHandle,
}

/// Syntactic slot an identifier occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccurrenceRole {
    /// Name slot of a class, function, interface, enum, or member declaration.
    DeclarationName,
    /// Name slot of a variable declaration.
    VariableName { exported: bool },
    ImportSpecifier { default: bool },
    /// `export { X }` without a module specifier.
    ExportSpecifier,
    /// `export { X as Y } from './x'`.
    ReExportSpecifier { slot: ExportSlot },
    /// `export default X`, optionally wrapped once (`memo(X)`).
    DefaultExport { wrapper: Option<String> },
    /// `extends X` / `implements X`.
    Heritage,
    TypeReference,
    /// Name position of a property access (`obj.X`).
    PropertyName,
    CallTarget,
    NewTarget,
    DecoratorArgument,
    /// Tag name of a markup element (`<X />`).
    MarkupTag,
    Identifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportSlot {
    /// The name the module exports.
    Exported,
    /// The original name when aliased.
    Original,
}

/// One step of the containment trail around a syntax node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerFrame {
    Class(String),
    Function(String),
    Method(String),
    Markup(String),
}

impl fmt::Display for ContainerFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(n) => write!(f, "class {n}"),
            Self::Function(n) => write!(f, "function {n}"),
            Self::Method(n) => write!(f, "method {n}"),
            Self::Markup(tag) => write!(f, "<{tag}>"),
        }
    }
}
