//! Dead Symbol Detector. Finds declarations nothing outside their file refers to.
//!
//! Checks every module-scope declaration of a file plus its instance members
//! (constructors excluded). A name is checked once per file: when two
//! declarations share a name only the first is examined.

use serde::{Deserialize, Serialize};
use symgraph_core::config::SymgraphConfig;
use symgraph_core::errors::DeadCodeError;
use symgraph_core::types::FxHashSet;

use crate::classifier::SymbolKind;
use crate::references::{Definition, ReferenceResolver, MODULE_SCOPE};
use crate::source_model::{MemberKind, SourceModel};

/// An unreferenced symbol, as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInfo {
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    pub name: String,
    /// `module scope` or `within class C`.
    pub context: String,
}

pub struct DeadSymbolDetector<'m, M: SourceModel + ?Sized> {
    resolver: ReferenceResolver<'m, M>,
    check_members: bool,
}

impl<'m, M: SourceModel + ?Sized> DeadSymbolDetector<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self {
            resolver: ReferenceResolver::new(model),
            check_members: true,
        }
    }

    pub fn with_config(model: &'m M, config: &SymgraphConfig) -> Self {
        Self {
            resolver: ReferenceResolver::with_config(model, &config.analysis),
            check_members: config.dead_code.effective_check_members(),
        }
    }

    /// Unreferenced symbols declared in `path`, in declaration order.
    pub fn check_file(&self, path: &str) -> Result<Vec<SymbolInfo>, DeadCodeError> {
        let model = self.resolver.model();
        if !model.has_file(path) {
            return Err(DeadCodeError::FileNotFound {
                path: path.to_string(),
            });
        }

        let mut checked: FxHashSet<&str> = FxHashSet::default();
        let mut dead = Vec::new();
        for decl in model.declarations_in(path).iter().filter(|d| d.is_module_scope()) {
            if !decl.is_nameless() && checked.insert(decl.name.as_str())
            {
                let def = Definition::Declaration(decl);
                if self.is_unreferenced(&decl.name, &def) {
                    dead.push(SymbolInfo {
                        kind: self.resolver.kind_of(&def),
                        name: decl.name.clone(),
                        context: MODULE_SCOPE.to_string(),
                    });
                }
            }

            if !self.check_members {
                continue;
            }
            let Some(class) = decl.class_shape() else {
                continue;
            };
            for member in &class.members {
                if member.is_static
                    || member.kind == MemberKind::Constructor
                    || !checked.insert(member.name.as_str())
                {
                    continue;
                }
                let def = Definition::Member { class: decl, member };
                if self.is_unreferenced(&member.name, &def) {
                    dead.push(SymbolInfo {
                        kind: self.resolver.kind_of(&def),
                        name: member.name.clone(),
                        context: format!("within class {}", decl.name),
                    });
                }
            }
        }

        tracing::debug!(file = path, unreferenced = dead.len(), "dead symbol check complete");
        Ok(dead)
    }

    /// Whether the definition `name` resolves to has no references outside its file.
    pub fn is_dead(&self, name: &str) -> Result<bool, DeadCodeError> {
        let def = self.resolver.find_definition(name)?;
        Ok(self.is_unreferenced(name, &def))
    }

    fn is_unreferenced(&self, name: &str, def: &Definition<'m>) -> bool {
        self.resolver.collect_references(name, def, false).is_empty()
    }
}
