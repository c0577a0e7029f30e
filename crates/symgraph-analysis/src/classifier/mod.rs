//! Symbol Classifier. Maps a declaration's syntactic shape to a [`SymbolKind`].
//!
//! Classification is a pure function of the shape. Precedence, first match wins:
//! 1. Classes: UI base class, lifecycle member, `state` member, or ref-initialized
//!    member → class component; otherwise class.
//! 2. Function-shaped declarations: hook-named → hook; markup, hook calls, or a
//!    props parameter → function component; otherwise function or variable.
//! 3. Interfaces and enums map directly.
//! 4. Class members map to method or property.
//! 5. Anything else is a variable.

pub mod kind;
pub mod rules;

pub use kind::SymbolKind;
pub use rules::{is_hook_name, is_pascal_case, ClassifierRules};

use crate::source_model::{
    ClassMember, ClassShape, DeclShape, Declaration, ExportTarget, FunctionShape, MemberKind,
    Param, SourceModel,
};

#[derive(Debug, Clone, Default)]
pub struct SymbolClassifier {
    rules: ClassifierRules,
}

impl SymbolClassifier {
    pub fn new(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    /// Classify from the declaration shape alone. Parameter types come from
    /// explicit annotations only.
    pub fn classify(&self, decl: &Declaration) -> SymbolKind {
        self.classify_with(decl, &|p: &Param| p.type_annotation.clone())
    }

    /// Classify an optional declaration; absence is a variable.
    pub fn classify_or_default(&self, decl: Option<&Declaration>) -> SymbolKind {
        decl.map(|d| self.classify(d)).unwrap_or(SymbolKind::Variable)
    }

    /// Classify with the source model at hand: unannotated parameters use the
    /// model's type text, and `export default X` classifies as its target.
    pub fn classify_in<M: SourceModel + ?Sized>(&self, model: &M, decl: &Declaration) -> SymbolKind {
        if let DeclShape::DefaultExport(ExportTarget::Identifier { .. }) = &decl.shape {
            return match model.resolve_export_target(decl) {
                Some(target) => self.classify_with(target, &|p: &Param| param_type(model, p)),
                None => SymbolKind::Variable,
            };
        }
        self.classify_with(decl, &|p: &Param| param_type(model, p))
    }

    fn classify_with(&self, decl: &Declaration, type_of: &dyn Fn(&Param) -> Option<String>) -> SymbolKind {
        match &decl.shape {
            DeclShape::Class(class) => {
                if self.is_class_component(class) {
                    SymbolKind::ClassComponent
                } else {
                    SymbolKind::Class
                }
            }
            DeclShape::Function(f) | DeclShape::DefaultExport(ExportTarget::Function(f)) => {
                self.classify_callable(&decl.name, f, type_of, SymbolKind::Function)
            }
            DeclShape::Variable {
                initializer: Some(f),
            } => self.classify_callable(&decl.name, f, type_of, SymbolKind::Variable),
            DeclShape::Interface => SymbolKind::Interface,
            DeclShape::Enum => SymbolKind::Enum,
            DeclShape::Variable { initializer: None }
            | DeclShape::DefaultExport(ExportTarget::Identifier { .. }) => SymbolKind::Variable,
        }
    }

    fn classify_callable(
        &self,
        name: &str,
        f: &FunctionShape,
        type_of: &dyn Fn(&Param) -> Option<String>,
        plain: SymbolKind,
    ) -> SymbolKind {
        if is_hook_name(name) {
            SymbolKind::ReactHook
        } else if self.has_component_signal(f, type_of) {
            SymbolKind::FunctionComponent
        } else {
            plain
        }
    }

    /// Method or property, from member syntax.
    pub fn classify_member(&self, member: &ClassMember) -> SymbolKind {
        match member.kind {
            MemberKind::Property => SymbolKind::Property,
            MemberKind::Method | MemberKind::Constructor | MemberKind::Getter | MemberKind::Setter => {
                SymbolKind::Method
            }
        }
    }

    pub fn is_class_component(&self, class: &ClassShape) -> bool {
        if class.heritage.iter().any(|b| self.rules.is_ui_base(b)) {
            return true;
        }
        class.members.iter().any(|m| {
            (m.kind == MemberKind::Method && self.rules.is_lifecycle_method(&m.name))
                || m.name == "state"
                || m
                    .initializer_call
                    .as_deref()
                    .is_some_and(|c| self.rules.is_ref_creation(c))
        })
    }

    fn has_component_signal(&self, f: &FunctionShape, type_of: &dyn Fn(&Param) -> Option<String>) -> bool {
        if !f.body.markup.is_empty() {
            return true;
        }
        if f.body.calls.iter().any(|c| is_hook_name(c.target.callee_name())) {
            return true;
        }
        f.params.iter().any(|p| {
            p.name == "props" || type_of(p).is_some_and(|t| self.rules.is_props_type(&t))
        })
    }
}

fn param_type<M: SourceModel + ?Sized>(model: &M, param: &Param) -> Option<String> {
    param
        .type_annotation
        .clone()
        .or_else(|| model.type_text_of(param.handle))
}
