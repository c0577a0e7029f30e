//! Reference Resolver: name → definition, and definition → valid references.
//!
//! Definitions are searched file by file in model order, module scope first,
//! by declaration kind: class, interface, function, enum, variable, then
//! default-export targets. Class members are searched last.
//!
//! A raw occurrence is valid unless it is a declaration site: the definition
//! itself, a local export specifier, or an exported variable's name slot.
//! Markup tags, heritage clauses, re-exports and default exports always count.

pub mod types;

pub use types::{Definition, Occurrence, ReferenceKind, ReferenceResult};

use symgraph_core::config::{AnalysisConfig, SkipMatcher};
use symgraph_core::errors::ResolveError;
use symgraph_core::types::{FxHashSet, Location};

use crate::classifier::{ClassifierRules, SymbolClassifier, SymbolKind};
use crate::source_model::{
    analyzable_files, DeclShape, Declaration, ExportTarget, NameOccurrence,
    OccurrenceRole, SourceModel, SyntaxHandle,
};

/// Context string for occurrences outside any class, function or markup element.
pub const MODULE_SCOPE: &str = "module scope";

/// Resolves names against one source model.
pub struct ReferenceResolver<'m, M: SourceModel + ?Sized> {
    model: &'m M,
    classifier: SymbolClassifier,
    skip: SkipMatcher,
}

impl<'m, M: SourceModel + ?Sized> ReferenceResolver<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self::with_config(model, &AnalysisConfig::default())
    }

    pub fn with_config(model: &'m M, config: &AnalysisConfig) -> Self {
        Self {
            model,
            classifier: SymbolClassifier::new(ClassifierRules::from_config(config)),
            skip: config.skip_matcher(),
        }
    }

    pub fn model(&self) -> &'m M {
        self.model
    }

    pub fn classifier(&self) -> &SymbolClassifier {
        &self.classifier
    }

    /// Find the authoritative definition of `name`.
    ///
    /// `Class.member` names only match class members.
    pub fn find_definition(&self, name: &str) -> Result<Definition<'m>, ResolveError> {
        let found = match name.split_once('.') {
            Some((class, member)) => self.find_member(Some(class), member),
            None => self
                .find_module_definition(name)
                .or_else(|| self.find_member(None, name)),
        };
        match found {
            Some(def) => {
                tracing::debug!(symbol = name, file = def.file(), "definition found");
                Ok(def)
            }
            None => {
                tracing::debug!(symbol = name, "no definition");
                Err(ResolveError::not_found(name))
            }
        }
    }

    fn find_module_definition(&self, name: &str) -> Option<Definition<'m>> {
        let model = self.model;
        for file in analyzable_files(model, &self.skip) {
            let decls: Vec<&'m Declaration> = model
                .declarations_in(&file.path)
                .iter()
                .filter(|d| d.is_module_scope())
                .collect();

            let by_shape = |want: fn(&DeclShape) -> bool| {
                decls
                    .iter()
                    .copied()
                    .find(|d| d.name == name && !d.is_nameless() && want(&d.shape))
            };
            let found = by_shape(|s| matches!(s, DeclShape::Class(_)))
                .or_else(|| by_shape(|s| matches!(s, DeclShape::Interface)))
                .or_else(|| {
                    by_shape(|s| {
                        matches!(
                            s,
                            DeclShape::Function(_) | DeclShape::DefaultExport(ExportTarget::Function(_))
                        )
                    })
                })
                .or_else(|| by_shape(|s| matches!(s, DeclShape::Enum)))
                .or_else(|| by_shape(|s| matches!(s, DeclShape::Variable { .. })));
            if let Some(decl) = found {
                return Some(Definition::Declaration(decl));
            }

            // `export default X` where X lives somewhere the scan has not reached.
            let exported = decls.iter().find_map(|d| match &d.shape {
                DeclShape::DefaultExport(ExportTarget::Identifier { name: target, .. })
                    if target == name =>
                {
                    model.resolve_export_target(d)
                }
                _ => None,
            });
            if let Some(decl) = exported {
                return Some(Definition::Declaration(decl));
            }
        }
        None
    }

    fn find_member(&self, class_name: Option<&str>, member: &str) -> Option<Definition<'m>> {
        let model = self.model;
        analyzable_files(model, &self.skip)
            .flat_map(|f| model.declarations_in(&f.path))
            .filter(|d| class_name.map_or(true, |c| d.name == c))
            .find_map(|class| {
                let shape = class.class_shape()?;
                shape
                    .members
                    .iter()
                    .find(|m| m.name == member)
                    .map(|member| Definition::Member { class, member })
            })
    }

    /// Every occurrence of the definition's name, tagged with its validity.
    ///
    /// Generated and skipped files are never scanned. With
    /// `include_internal == false` the defining file is skipped as well.
    pub fn all_occurrences(
        &self,
        name: &str,
        definition: &Definition<'m>,
        include_internal: bool,
    ) -> Vec<Occurrence> {
        let lookup = lookup_name(name, definition);
        let imports_count = self.imports_count(definition);
        let def_handle = definition.handle();
        let def_file = definition.file();

        let mut out = Vec::new();
        for file in analyzable_files(self.model, &self.skip) {
            if !include_internal && file.path == def_file {
                continue;
            }
            for occ in self.model.occurrences_of_name(&file.path, lookup) {
                let (kind, valid) = judge(&occ, def_handle, imports_count);
                out.push(Occurrence {
                    location: Location::at(file.path.clone(), occ.position),
                    context: self.context_of(occ.handle),
                    kind,
                    valid,
                });
            }
        }
        out
    }

    /// Valid references to `definition`, deduplicated on `(file, line, column)`
    /// with the first occurrence kept.
    pub fn collect_references(
        &self,
        name: &str,
        definition: &Definition<'m>,
        include_internal: bool,
    ) -> Vec<Occurrence> {
        let mut seen: FxHashSet<Location> = FxHashSet::default();
        let refs: Vec<Occurrence> = self
            .all_occurrences(name, definition, include_internal)
            .into_iter()
            .filter(|o| o.valid)
            .filter(|o| seen.insert(o.location.clone()))
            .collect();
        tracing::debug!(symbol = name, count = refs.len(), include_internal, "references collected");
        refs
    }

    /// Definition plus references, as handed to the reporting layer.
    pub fn find_references(
        &self,
        name: &str,
        include_internal: bool,
    ) -> Result<ReferenceResult, ResolveError> {
        let definition = self.find_definition(name)?;
        let references = self.collect_references(name, &definition, include_internal);
        Ok(ReferenceResult {
            symbol: name.to_string(),
            kind: self.kind_of(&definition),
            definition: Occurrence {
                location: definition.location(),
                context: self.context_of(definition.handle()),
                kind: ReferenceKind::Definition,
                valid: true,
            },
            is_referenced: !references.is_empty(),
            references,
        })
    }

    pub fn kind_of(&self, definition: &Definition<'m>) -> SymbolKind {
        definition.kind(&self.classifier, self.model)
    }

    /// Containment trail of `handle`, e.g. `class UserService > method save`.
    pub fn context_of(&self, handle: SyntaxHandle) -> String {
        let chain = self.model.container_chain_of(handle);
        if chain.is_empty() {
            return MODULE_SCOPE.to_string();
        }
        chain
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" > ")
    }

    fn imports_count(&self, definition: &Definition<'m>) -> bool {
        let kind = self.kind_of(definition);
        matches!(kind, SymbolKind::Class | SymbolKind::Interface) || kind.is_component()
    }
}

/// The identifier to look up: the member name for `Class.member` definitions.
fn lookup_name<'a>(name: &'a str, definition: &Definition<'_>) -> &'a str {
    match definition {
        Definition::Member { .. } => name.rsplit_once('.').map_or(name, |(_, m)| m),
        Definition::Declaration(_) => name,
    }
}

fn judge(occ: &NameOccurrence, def_handle: SyntaxHandle, imports_count: bool) -> (ReferenceKind, bool) {
    if occ.handle == def_handle {
        return (ReferenceKind::Definition, false);
    }
    match &occ.role {
        OccurrenceRole::ImportSpecifier { .. } => (ReferenceKind::Import, imports_count),
        OccurrenceRole::ExportSpecifier => (ReferenceKind::Other, false),
        OccurrenceRole::VariableName { exported } => (ReferenceKind::Other, !exported),
        OccurrenceRole::ReExportSpecifier { .. } => (ReferenceKind::ReExport, true),
        OccurrenceRole::DefaultExport { .. } => (ReferenceKind::DefaultExport, true),
        OccurrenceRole::Heritage => (ReferenceKind::Heritage, true),
        OccurrenceRole::MarkupTag => (ReferenceKind::Markup, true),
        OccurrenceRole::CallTarget => (ReferenceKind::Call, true),
        OccurrenceRole::NewTarget => (ReferenceKind::Construct, true),
        OccurrenceRole::TypeReference => (ReferenceKind::TypeReference, true),
        OccurrenceRole::PropertyName => (ReferenceKind::Property, true),
        OccurrenceRole::DecoratorArgument => (ReferenceKind::Decorator, true),
        OccurrenceRole::DeclarationName | OccurrenceRole::Identifier => (ReferenceKind::Other, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symgraph_core::types::Position;

    fn occ(role: OccurrenceRole, handle: u32) -> NameOccurrence {
        NameOccurrence {
            position: Position::new(1, 1),
            role,
            handle: SyntaxHandle(handle),
        }
    }

    #[test]
    fn test_definition_occurrence_is_invalid() {
        let (kind, valid) = judge(&occ(OccurrenceRole::DeclarationName, 7), SyntaxHandle(7), true);
        assert_eq!(kind, ReferenceKind::Definition);
        assert!(!valid);
    }

    #[test]
    fn test_declaration_sites_are_invalid() {
        let def = SyntaxHandle(0);
        assert!(!judge(&occ(OccurrenceRole::ExportSpecifier, 1), def, true).1);
        assert!(!judge(&occ(OccurrenceRole::VariableName { exported: true }, 1), def, true).1);
        assert!(judge(&occ(OccurrenceRole::VariableName { exported: false }, 1), def, true).1);
    }

    #[test]
    fn test_uses_are_valid() {
        let def = SyntaxHandle(0);
        for role in [
            OccurrenceRole::TypeReference,
            OccurrenceRole::PropertyName,
            OccurrenceRole::CallTarget,
            OccurrenceRole::NewTarget,
            OccurrenceRole::DecoratorArgument,
            OccurrenceRole::Heritage,
            OccurrenceRole::MarkupTag,
            OccurrenceRole::Identifier,
        ] {
            assert!(judge(&occ(role.clone(), 1), def, false).1, "{role:?}");
        }
    }

    #[test]
    fn test_imports_depend_on_definition_kind() {
        let def = SyntaxHandle(0);
        let import = occ(OccurrenceRole::ImportSpecifier { default: false }, 1);
        assert_eq!(judge(&import, def, true), (ReferenceKind::Import, true));
        assert_eq!(judge(&import, def, false), (ReferenceKind::Import, false));
    }
}
