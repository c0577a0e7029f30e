//! In-memory source model and a builder for assembling one.
//!
//! The builder derives name occurrences from the declarations and body
//! items it is given, the same way a parser-backed provider would index
//! identifiers: declaring a class records its name slot, a call records
//! its target, a markup element records its tag, and so on.

use symgraph_core::types::collections::SmallVec4;
use symgraph_core::types::{FxHashMap, Position};

use super::types::*;
use super::SourceModel;

/// A fully materialized source snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryModel {
    files: Vec<SourceFile>,
    declarations: FxHashMap<String, Vec<Declaration>>,
    occurrences: FxHashMap<String, Vec<(String, NameOccurrence)>>,
    containers: FxHashMap<SyntaxHandle, SmallVec4<ContainerFrame>>,
    type_texts: FxHashMap<SyntaxHandle, String>,
}

impl InMemoryModel {
    pub fn builder() -> InMemoryModelBuilder {
        InMemoryModelBuilder::new()
    }

    fn find_module_declaration(&self, file: &str, name: &str) -> Option<&Declaration> {
        self.declarations_in(file).iter().find(|d| {
            d.name == name && d.is_module_scope() && !matches!(d.shape, DeclShape::DefaultExport(_))
        })
    }
}

impl SourceModel for InMemoryModel {
    fn list_files(&self) -> &[SourceFile] {
        &self.files
    }

    fn declarations_in(&self, file: &str) -> &[Declaration] {
        self.declarations
            .get(file)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn occurrences_of_name(&self, file: &str, name: &str) -> Vec<NameOccurrence> {
        self.occurrences
            .get(file)
            .map(|occs| {
                occs.iter()
                    .filter(|(n, _)| n == name)
                    .map(|(_, occ)| occ.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn container_chain_of(&self, node: SyntaxHandle) -> SmallVec4<ContainerFrame> {
        self.containers.get(&node).cloned().unwrap_or_default()
    }

    fn type_text_of(&self, node: SyntaxHandle) -> Option<String> {
        self.type_texts.get(&node).cloned()
    }

    fn resolve_export_target(&self, export: &Declaration) -> Option<&Declaration> {
        let DeclShape::DefaultExport(ExportTarget::Identifier { name, .. }) = &export.shape else {
            return None;
        };
        // Same file first, then an exported declaration anywhere (imported binding).
        self.find_module_declaration(&export.file, name).or_else(|| {
            self.files
                .iter()
                .filter_map(|f| self.find_module_declaration(&f.path, name))
                .find(|d| d.exported)
        })
    }
}

/// Builder for [`InMemoryModel`]. Files are enumerated in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryModelBuilder {
    model: InMemoryModel,
    next_handle: u32,
}

impl InMemoryModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or extend) a source file.
    pub fn file(self, path: &str, build: impl FnOnce(&mut FileBuilder<'_>)) -> Self {
        self.add_file(path, false, build)
    }

    /// Add a generated or declaration-only file.
    pub fn generated_file(self, path: &str, build: impl FnOnce(&mut FileBuilder<'_>)) -> Self {
        self.add_file(path, true, build)
    }

    fn add_file(
        mut self,
        path: &str,
        generated: bool,
        build: impl FnOnce(&mut FileBuilder<'_>),
    ) -> Self {
        if !self.model.files.iter().any(|f| f.path == path) {
            self.model.files.push(SourceFile {
                path: path.to_string(),
                generated,
            });
        }
        let line = self
            .model
            .occurrences
            .get(path)
            .and_then(|occs| occs.iter().map(|(_, o)| o.position.line).max())
            .unwrap_or(0);
        let mut file = FileBuilder {
            path: path.to_string(),
            model: &mut self.model,
            next_handle: &mut self.next_handle,
            line,
            pending_export: false,
            pending_unknown_position: false,
        };
        build(&mut file);
        self
    }

    pub fn build(self) -> InMemoryModel {
        self.model
    }
}

/// Adds declarations and occurrences to one file.
///
/// Every added item takes the next line, so positions follow call order.
pub struct FileBuilder<'a> {
    path: String,
    model: &'a mut InMemoryModel,
    next_handle: &'a mut u32,
    line: u32,
    pending_export: bool,
    pending_unknown_position: bool,
}

impl<'a> FileBuilder<'a> {
    fn handle(&mut self) -> SyntaxHandle {
        let handle = SyntaxHandle(*self.next_handle);
        *self.next_handle += 1;
        handle
    }

    fn next_position(&mut self) -> Position {
        self.line += 1;
        Position::new(self.line, 1)
    }

    fn record(
        &mut self,
        name: &str,
        role: OccurrenceRole,
        position: Position,
        frames: &[ContainerFrame],
    ) -> SyntaxHandle {
        let handle = self.handle();
        self.model
            .occurrences
            .entry(self.path.clone())
            .or_default()
            .push((name.to_string(), NameOccurrence { position, role, handle }));
        if !frames.is_empty() {
            self.model.containers.insert(handle, frames.iter().cloned().collect());
        }
        handle
    }

    fn push_declaration(
        &mut self,
        name: &str,
        shape: DeclShape,
        position: Position,
        exported: bool,
        handle: SyntaxHandle,
    ) {
        let position = if std::mem::take(&mut self.pending_unknown_position) {
            None
        } else {
            Some(position)
        };
        let declaration = Declaration {
            name: name.to_string(),
            shape,
            container: Container::Module,
            file: self.path.clone(),
            position,
            exported,
            handle,
        };
        self.model
            .declarations
            .entry(self.path.clone())
            .or_default()
            .push(declaration);
    }

    /// Mark the next declaration as exported.
    pub fn export(&mut self) -> &mut Self {
        self.pending_export = true;
        self
    }

    /// Give the next declaration no computable position.
    pub fn without_position(&mut self) -> &mut Self {
        self.pending_unknown_position = true;
        self
    }

    /// `import { name } from '...'`
    pub fn import(&mut self, name: &str) -> &mut Self {
        let pos = self.next_position();
        self.record(name, OccurrenceRole::ImportSpecifier { default: false }, pos, &[]);
        self
    }

    /// `import name from '...'`
    pub fn default_import(&mut self, name: &str) -> &mut Self {
        let pos = self.next_position();
        self.record(name, OccurrenceRole::ImportSpecifier { default: true }, pos, &[]);
        self
    }

    /// `export { name }`
    pub fn export_specifier(&mut self, name: &str) -> &mut Self {
        let pos = self.next_position();
        self.record(name, OccurrenceRole::ExportSpecifier, pos, &[]);
        self
    }

    /// `export { name }` or `export { name as alias }` from another module.
    pub fn re_export(&mut self, name: &str, alias: Option<&str>) -> &mut Self {
        let pos = self.next_position();
        match alias {
            Some(alias) => {
                self.record(
                    name,
                    OccurrenceRole::ReExportSpecifier { slot: ExportSlot::Original },
                    pos,
                    &[],
                );
                let alias_col = pos.column + name.len() as u32 + 4;
                self.record(
                    alias,
                    OccurrenceRole::ReExportSpecifier { slot: ExportSlot::Exported },
                    Position::new(pos.line, alias_col),
                    &[],
                );
            }
            None => {
                self.record(
                    name,
                    OccurrenceRole::ReExportSpecifier { slot: ExportSlot::Exported },
                    pos,
                    &[],
                );
            }
        }
        self
    }

    pub fn interface(&mut self, name: &str) -> &mut Self {
        self.simple_declaration(name, DeclShape::Interface)
    }

    pub fn enumeration(&mut self, name: &str) -> &mut Self {
        self.simple_declaration(name, DeclShape::Enum)
    }

    fn simple_declaration(&mut self, name: &str, shape: DeclShape) -> &mut Self {
        let exported = std::mem::take(&mut self.pending_export);
        let pos = self.next_position();
        let handle = self.record(name, OccurrenceRole::DeclarationName, pos, &[]);
        self.push_declaration(name, shape, pos, exported, handle);
        self
    }

    /// Variable without a function initializer (`const x = 1`).
    pub fn variable(&mut self, name: &str) -> &mut Self {
        let exported = std::mem::take(&mut self.pending_export);
        let pos = self.next_position();
        let handle = self.record(name, OccurrenceRole::VariableName { exported }, pos, &[]);
        self.push_declaration(name, DeclShape::Variable { initializer: None }, pos, exported, handle);
        self
    }

    /// `function name(...) { ... }`
    pub fn function(&mut self, name: &str, build: impl FnOnce(&mut BodyBuilder<'_, 'a>)) -> &mut Self {
        let exported = std::mem::take(&mut self.pending_export);
        let pos = self.next_position();
        let handle = self.record(name, OccurrenceRole::DeclarationName, pos, &[]);
        let shape = self.build_body(vec![ContainerFrame::Function(name.to_string())], build);
        self.push_declaration(name, DeclShape::Function(shape), pos, exported, handle);
        self
    }

    /// `const name = (...) => { ... }`
    pub fn arrow(&mut self, name: &str, build: impl FnOnce(&mut BodyBuilder<'_, 'a>)) -> &mut Self {
        let exported = std::mem::take(&mut self.pending_export);
        let pos = self.next_position();
        let handle = self.record(name, OccurrenceRole::VariableName { exported }, pos, &[]);
        let shape = self.build_body(vec![ContainerFrame::Function(name.to_string())], build);
        self.push_declaration(
            name,
            DeclShape::Variable {
                initializer: Some(shape),
            },
            pos,
            exported,
            handle,
        );
        self
    }

    /// `class name { ... }`
    pub fn class(&mut self, name: &str, build: impl FnOnce(&mut ClassBuilder<'_, 'a>)) -> &mut Self {
        let exported = std::mem::take(&mut self.pending_export);
        let pos = self.next_position();
        let handle = self.record(name, OccurrenceRole::DeclarationName, pos, &[]);
        let mut class = ClassBuilder {
            file: self,
            name: name.to_string(),
            shape: ClassShape::default(),
        };
        build(&mut class);
        let shape = class.shape;
        self.push_declaration(name, DeclShape::Class(shape), pos, exported, handle);
        self
    }

    /// `export default name` or `export default wrapper(name)`.
    pub fn default_export(&mut self, name: &str, wrapper: Option<&str>) -> &mut Self {
        let pos = self.next_position();
        if let Some(w) = wrapper {
            self.record(w, OccurrenceRole::CallTarget, pos, &[]);
        }
        let occ_pos = match wrapper {
            Some(w) => Position::new(pos.line, pos.column + w.len() as u32 + 1),
            None => pos,
        };
        let handle = self.record(
            name,
            OccurrenceRole::DefaultExport {
                wrapper: wrapper.map(String::from),
            },
            occ_pos,
            &[],
        );
        let target = ExportTarget::Identifier {
            name: name.to_string(),
            wrapper: wrapper.map(String::from),
        };
        self.push_declaration(DEFAULT_EXPORT_NAME, DeclShape::DefaultExport(target), pos, true, handle);
        self
    }

    /// `export default function name() { ... }`; anonymous when `name` is `None`.
    pub fn default_export_function(
        &mut self,
        name: Option<&str>,
        build: impl FnOnce(&mut BodyBuilder<'_, 'a>),
    ) -> &mut Self {
        let pos = self.next_position();
        let decl_name = name.unwrap_or(DEFAULT_EXPORT_NAME);
        let handle = match name {
            Some(n) => self.record(n, OccurrenceRole::DeclarationName, pos, &[]),
            None => self.handle(),
        };
        let shape = self.build_body(vec![ContainerFrame::Function(decl_name.to_string())], build);
        self.push_declaration(
            decl_name,
            DeclShape::DefaultExport(ExportTarget::Function(shape)),
            pos,
            true,
            handle,
        );
        self
    }

    /// A raw module-scope occurrence.
    pub fn reference(&mut self, name: &str, role: OccurrenceRole) -> &mut Self {
        let pos = self.next_position();
        self.record(name, role, pos, &[]);
        self
    }

    /// A raw occurrence at an explicit position.
    pub fn occurrence_at(&mut self, name: &str, role: OccurrenceRole, line: u32, column: u32) -> &mut Self {
        self.line = self.line.max(line);
        self.record(name, role, Position::new(line, column), &[]);
        self
    }

    fn build_body(
        &mut self,
        frames: Vec<ContainerFrame>,
        build: impl FnOnce(&mut BodyBuilder<'_, 'a>),
    ) -> FunctionShape {
        let mut body = BodyBuilder {
            file: self,
            frames,
            shape: FunctionShape::default(),
        };
        build(&mut body);
        body.shape
    }
}

/// Adds members to a class declaration.
pub struct ClassBuilder<'f, 'a> {
    file: &'f mut FileBuilder<'a>,
    name: String,
    shape: ClassShape,
}

impl<'f, 'a> ClassBuilder<'f, 'a> {
    fn class_frame(&self) -> ContainerFrame {
        ContainerFrame::Class(self.name.clone())
    }

    /// `extends base`; dotted bases record their last segment as the heritage name.
    pub fn extends(&mut self, base: &str) -> &mut Self {
        let pos = self.file.next_position();
        self.shape.heritage.push(base.to_string());
        let frames = [self.class_frame()];
        match base.rsplit_once('.') {
            Some((namespace, last)) => {
                self.file.record(namespace, OccurrenceRole::Identifier, pos, &frames);
                let col = pos.column + namespace.len() as u32 + 1;
                self.file
                    .record(last, OccurrenceRole::Heritage, Position::new(pos.line, col), &frames);
            }
            None => {
                self.file.record(base, OccurrenceRole::Heritage, pos, &frames);
            }
        }
        self
    }

    /// Public instance method.
    pub fn method(&mut self, name: &str, build: impl FnOnce(&mut BodyBuilder<'_, 'a>)) -> &mut Self {
        self.member(name, MemberKind::Method, Visibility::Public, false, build)
    }

    pub fn private_method(&mut self, name: &str, build: impl FnOnce(&mut BodyBuilder<'_, 'a>)) -> &mut Self {
        self.member(name, MemberKind::Method, Visibility::Private, false, build)
    }

    pub fn static_method(&mut self, name: &str, build: impl FnOnce(&mut BodyBuilder<'_, 'a>)) -> &mut Self {
        self.member(name, MemberKind::Method, Visibility::Public, true, build)
    }

    pub fn constructor(&mut self, build: impl FnOnce(&mut BodyBuilder<'_, 'a>)) -> &mut Self {
        self.member("constructor", MemberKind::Constructor, Visibility::Public, false, build)
    }

    /// General member with a callable body.
    pub fn member(
        &mut self,
        name: &str,
        kind: MemberKind,
        visibility: Visibility,
        is_static: bool,
        build: impl FnOnce(&mut BodyBuilder<'_, 'a>),
    ) -> &mut Self {
        let pos = self.file.next_position();
        let class_frame = self.class_frame();
        let handle = self
            .file
            .record(name, OccurrenceRole::DeclarationName, pos, &[class_frame.clone()]);
        let mut body = BodyBuilder {
            file: &mut *self.file,
            frames: vec![class_frame, ContainerFrame::Method(name.to_string())],
            shape: FunctionShape::default(),
        };
        build(&mut body);
        let function = body.shape;
        self.shape.members.push(ClassMember {
            name: name.to_string(),
            kind,
            visibility,
            is_static,
            initializer_call: None,
            function: Some(function),
            position: Some(pos),
            handle,
        });
        self
    }

    /// Public instance property without an initializer call.
    pub fn property(&mut self, name: &str) -> &mut Self {
        self.property_with(name, Visibility::Public, false, None)
    }

    /// Property initialized by a call (`inputRef = React.createRef()`).
    pub fn property_init(&mut self, name: &str, call: &str) -> &mut Self {
        self.property_with(name, Visibility::Public, false, Some(call))
    }

    pub fn property_with(
        &mut self,
        name: &str,
        visibility: Visibility,
        is_static: bool,
        initializer_call: Option<&str>,
    ) -> &mut Self {
        let pos = self.file.next_position();
        let frames = [self.class_frame()];
        let handle = self.file.record(name, OccurrenceRole::DeclarationName, pos, &frames);
        self.shape.members.push(ClassMember {
            name: name.to_string(),
            kind: MemberKind::Property,
            visibility,
            is_static,
            initializer_call: initializer_call.map(String::from),
            function: None,
            position: Some(pos),
            handle,
        });
        self
    }
}

/// Adds parameters and body items to a callable.
pub struct BodyBuilder<'f, 'a> {
    file: &'f mut FileBuilder<'a>,
    frames: Vec<ContainerFrame>,
    shape: FunctionShape,
}

impl<'f, 'a> BodyBuilder<'f, 'a> {
    /// Parameter with an optional explicit type annotation.
    pub fn param(&mut self, name: &str, annotation: Option<&str>) -> &mut Self {
        let handle = self.file.handle();
        if let Some(type_name) = annotation {
            let pos = self.file.next_position();
            self.file
                .record(type_name, OccurrenceRole::TypeReference, pos, &self.frames);
        }
        self.shape.params.push(Param {
            name: name.to_string(),
            type_annotation: annotation.map(String::from),
            handle,
        });
        self
    }

    /// Unannotated parameter whose type the model infers as `type_text`.
    pub fn param_inferred(&mut self, name: &str, type_text: &str) -> &mut Self {
        let handle = self.file.handle();
        self.file.model.type_texts.insert(handle, type_text.to_string());
        self.shape.params.push(Param {
            name: name.to_string(),
            type_annotation: None,
            handle,
        });
        self
    }

    /// `name()`
    pub fn call(&mut self, name: &str) -> &mut Self {
        let pos = self.file.next_position();
        self.file.record(name, OccurrenceRole::CallTarget, pos, &self.frames);
        self.shape.body.calls.push(CallExpr {
            target: CallTarget::Name(name.to_string()),
            position: pos,
            is_new: false,
        });
        self
    }

    /// `object.property()`; `object` may be dotted (`this.repo`).
    pub fn call_member(&mut self, object: &str, property: &str) -> &mut Self {
        let pos = self.file.next_position();
        let root = object.split('.').next().unwrap_or(object);
        if root != "this" {
            self.file.record(root, OccurrenceRole::Identifier, pos, &self.frames);
        }
        let col = pos.column + object.len() as u32 + 1;
        self.file.record(
            property,
            OccurrenceRole::PropertyName,
            Position::new(pos.line, col),
            &self.frames,
        );
        self.shape.body.calls.push(CallExpr {
            target: CallTarget::Member {
                object: object.to_string(),
                property: property.to_string(),
            },
            position: pos,
            is_new: false,
        });
        self
    }

    /// `this.method()`
    pub fn call_this(&mut self, method: &str) -> &mut Self {
        self.call_member("this", method)
    }

    /// `new name()`
    pub fn construct(&mut self, name: &str) -> &mut Self {
        let pos = self.file.next_position();
        self.file.record(name, OccurrenceRole::NewTarget, pos, &self.frames);
        self.shape.body.calls.push(CallExpr {
            target: CallTarget::Name(name.to_string()),
            position: pos,
            is_new: true,
        });
        self
    }

    /// `<tag />`
    pub fn render(&mut self, tag: &str) -> &mut Self {
        let pos = self.file.next_position();
        self.file.record(tag, OccurrenceRole::MarkupTag, pos, &self.frames);
        self.shape.body.markup.push(MarkupElement {
            tag: tag.to_string(),
            position: pos,
        });
        self
    }

    /// `<tag>...children...</tag>`
    pub fn render_with(&mut self, tag: &str, children: impl FnOnce(&mut Self)) -> &mut Self {
        self.render(tag);
        self.frames.push(ContainerFrame::Markup(tag.to_string()));
        children(self);
        self.frames.pop();
        self
    }

    /// A type position (`x: Name`).
    pub fn type_ref(&mut self, name: &str) -> &mut Self {
        self.occurrence(name, OccurrenceRole::TypeReference)
    }

    /// A plain identifier read.
    pub fn reference(&mut self, name: &str) -> &mut Self {
        self.occurrence(name, OccurrenceRole::Identifier)
    }

    pub fn occurrence(&mut self, name: &str, role: OccurrenceRole) -> &mut Self {
        let pos = self.file.next_position();
        self.file.record(name, role, pos, &self.frames);
        self
    }
}
