//! Source Model: the parsed-program abstraction the engine consumes.
//!
//! The engine does not parse source text. A provider materializes files,
//! declarations, and name occurrences up front and answers the queries of
//! [`SourceModel`] over that immutable snapshot.

pub mod memory;
pub mod types;

pub use memory::{BodyBuilder, ClassBuilder, FileBuilder, InMemoryModel, InMemoryModelBuilder};
pub use types::*;

use symgraph_core::config::SkipMatcher;
use symgraph_core::types::collections::SmallVec4;

/// Read-only queries over a fully materialized source snapshot.
///
/// All queries are synchronous, total, and side-effect free. Files are
/// enumerated in a fixed order; the engine's output ordering follows it.
pub trait SourceModel {
    /// All files in enumeration order.
    fn list_files(&self) -> &[SourceFile];

    /// Declarations in `file`, in source order. Empty for unknown files.
    fn declarations_in(&self, file: &str) -> &[Declaration];

    /// Every occurrence of the identifier `name` in `file`, in source order.
    fn occurrences_of_name(&self, file: &str, name: &str) -> Vec<NameOccurrence>;

    /// Containment trail of a syntax node, outermost first.
    fn container_chain_of(&self, node: SyntaxHandle) -> SmallVec4<ContainerFrame>;

    /// Type text of a syntax node (inferred when not annotated).
    fn type_text_of(&self, node: SyntaxHandle) -> Option<String>;

    /// Follow a default-export assignment back to the declaration it names.
    fn resolve_export_target(&self, export: &Declaration) -> Option<&Declaration>;

    /// Whether `path` is one of the enumerated files.
    fn has_file(&self, path: &str) -> bool {
        self.list_files().iter().any(|f| f.path == path)
    }
}

/// Files the engine analyzes: not generated and not matched by `skip`.
pub fn analyzable_files<'a, M: SourceModel + ?Sized>(
    model: &'a M,
    skip: &'a SkipMatcher,
) -> impl Iterator<Item = &'a SourceFile> + 'a {
    model.list_files().iter().filter(move |f| {
        let skipped = f.generated || skip.is_match(&f.path);
        if skipped {
            tracing::debug!(file = %f.path, "skipping generated file");
        }
        !skipped
    })
}
