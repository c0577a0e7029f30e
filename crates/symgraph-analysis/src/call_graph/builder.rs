//! CallGraphBuilder: registers callable declarations, then scans their bodies.

use std::time::Instant;

use symgraph_core::config::{AnalysisConfig, SkipMatcher};
use symgraph_core::types::Location;

use crate::classifier::{is_hook_name, is_pascal_case, ClassifierRules, SymbolClassifier, SymbolKind};
use crate::source_model::{
    analyzable_files, Body, CallTarget, DeclShape, Declaration, ExportTarget, SourceModel,
};

use super::types::{CallGraph, EdgeKind};

/// One callable body waiting to be scanned.
struct ScanUnit<'m> {
    caller: String,
    file: &'m str,
    body: &'m Body,
    /// Class that owns the body, for `this.method()` resolution.
    owner: Option<&'m str>,
    /// Class component that also receives the body's render edges.
    render_owner: Option<&'m str>,
}

/// Builds a [`CallGraph`] from one source model.
///
/// Each `build` starts from an empty graph.
pub struct CallGraphBuilder<'m, M: SourceModel + ?Sized> {
    model: &'m M,
    classifier: SymbolClassifier,
    skip: SkipMatcher,
    graph: CallGraph,
}

impl<'m, M: SourceModel + ?Sized> CallGraphBuilder<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self::with_config(model, &AnalysisConfig::default())
    }

    pub fn with_config(model: &'m M, config: &AnalysisConfig) -> Self {
        Self {
            model,
            classifier: SymbolClassifier::new(ClassifierRules::from_config(config)),
            skip: config.skip_matcher(),
            graph: CallGraph::new(),
        }
    }

    pub fn graph(&self) -> &CallGraph {
        &self.graph
    }

    pub fn into_graph(self) -> CallGraph {
        self.graph
    }

    /// Rebuild the graph and return its node count.
    pub fn build(&mut self) -> usize {
        let span = tracing::info_span!("call_graph_build");
        let _guard = span.enter();
        let start = Instant::now();

        self.graph.clear();

        let model = self.model;
        let declarations: Vec<&'m Declaration> = analyzable_files(model, &self.skip)
            .flat_map(|f| model.declarations_in(&f.path))
            .filter(|d| d.is_module_scope())
            .collect();

        let mut units = Vec::new();
        for decl in declarations.iter().copied() {
            self.register(decl, &mut units);
        }
        for unit in &units {
            self.scan(unit);
        }
        self.upgrade_unknown_components();

        tracing::info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            bodies = units.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "call graph built"
        );
        self.graph.node_count()
    }

    fn register(&mut self, decl: &'m Declaration, units: &mut Vec<ScanUnit<'m>>) {
        if decl.is_nameless() {
            return;
        }
        let kind = self.classifier.classify_in(self.model, decl);
        match &decl.shape {
            DeclShape::Class(class) => {
                self.add_node(&decl.name, kind, decl.location(), &decl.file);
                let render_owner = (kind == SymbolKind::ClassComponent).then_some(decl.name.as_str());
                for member in &class.members {
                    let Some(function) = &member.function else {
                        continue;
                    };
                    let key = format!("{}.{}", decl.name, member.name);
                    let location = member.position.map(|p| Location::at(decl.file.clone(), p));
                    let member_kind = self.classifier.classify_member(member);
                    self.add_node(&key, member_kind, location, &decl.file);
                    units.push(ScanUnit {
                        caller: key,
                        file: &decl.file,
                        body: &function.body,
                        owner: Some(decl.name.as_str()),
                        render_owner,
                    });
                }
            }
            DeclShape::Function(f) | DeclShape::DefaultExport(ExportTarget::Function(f)) => {
                self.add_node(&decl.name, kind, decl.location(), &decl.file);
                units.push(ScanUnit {
                    caller: decl.name.clone(),
                    file: &decl.file,
                    body: &f.body,
                    owner: None,
                    render_owner: None,
                });
            }
            DeclShape::Variable { initializer: Some(f) } if kind.is_component() || kind.is_hook() => {
                self.add_node(&decl.name, kind, decl.location(), &decl.file);
                units.push(ScanUnit {
                    caller: decl.name.clone(),
                    file: &decl.file,
                    body: &f.body,
                    owner: None,
                    render_owner: None,
                });
            }
            _ => {}
        }
    }

    fn add_node(&mut self, key: &str, kind: SymbolKind, location: Option<Location>, file: &str) {
        if location.is_none() {
            tracing::warn!(symbol = key, file, "could not compute location; node left without one");
        }
        self.graph.ensure_node(key, Some(kind), location);
    }

    fn scan(&mut self, unit: &ScanUnit<'m>) {
        for call in &unit.body.calls {
            if call.is_new {
                continue;
            }
            let site = Location::at(unit.file, call.position);
            match &call.target {
                CallTarget::Name(name) if is_hook_name(name) => self.add_hook_edge(&unit.caller, name, site),
                CallTarget::Name(name) => self.graph.add_edge(&unit.caller, name, site, EdgeKind::Call),
                CallTarget::Member { object, property } => match unit.owner {
                    Some(owner) if object == "this" => {
                        let callee = format!("{owner}.{property}");
                        self.graph.add_edge(&unit.caller, &callee, site, EdgeKind::MethodCall);
                    }
                    _ if is_hook_name(property) => self.add_hook_edge(&unit.caller, property, site),
                    _ => {
                        self.graph
                            .add_edge(&unit.caller, &call.target.text(), site, EdgeKind::MethodCall)
                    }
                },
            }
        }

        for element in &unit.body.markup {
            if !element.tag.starts_with(|c: char| c.is_ascii_uppercase()) {
                continue;
            }
            let site = Location::at(unit.file, element.position);
            let (kind, location) = self.resolve_tag(&element.tag);
            self.graph.ensure_node(&element.tag, kind, location);
            self.graph
                .add_edge(&unit.caller, &element.tag, site.clone(), EdgeKind::Render);
            if let Some(owner) = unit.render_owner {
                if owner != unit.caller {
                    self.graph.add_edge(owner, &element.tag, site, EdgeKind::Render);
                }
            }
        }
    }

    fn add_hook_edge(&mut self, caller: &str, hook: &str, site: Location) {
        self.graph.ensure_node(hook, Some(SymbolKind::ReactHook), None);
        self.graph.add_edge(caller, hook, site, EdgeKind::Hook);
    }

    /// Kind and location for a markup tag, from any declaration of that name.
    fn resolve_tag(&self, tag: &str) -> (Option<SymbolKind>, Option<Location>) {
        if let Some(node) = self.graph.node(tag) {
            if node.kind.is_some() {
                return (node.kind, node.location.clone());
            }
        }
        let model = self.model;
        let declared = analyzable_files(model, &self.skip)
            .flat_map(|f| model.declarations_in(&f.path))
            .find(|d| {
                d.name == tag
                    && matches!(
                        d.shape,
                        DeclShape::Function(_) | DeclShape::Class(_) | DeclShape::Variable { .. }
                    )
            });
        match declared {
            Some(decl) => (Some(self.classifier.classify_in(model, decl)), decl.location()),
            None if is_pascal_case(tag) => (Some(SymbolKind::PotentialComponent), None),
            None => (None, None),
        }
    }

    /// Unknown PascalCase callees of components become potential components,
    /// and so does any other node still unknown.
    fn upgrade_unknown_components(&mut self) {
        let mut upgrade: Vec<String> = Vec::new();
        for node in self.graph.nodes().filter(|n| n.is_component()) {
            for callee in &node.callees {
                if self.is_unknown_pascal(callee) {
                    upgrade.push(callee.clone());
                }
            }
        }
        for node in self.graph.nodes().filter(|n| !n.is_component()) {
            if self.is_unknown_pascal(&node.key) {
                upgrade.push(node.key.clone());
            }
        }
        for key in upgrade {
            if let Some(node) = self.graph.node_mut(&key) {
                node.kind = Some(SymbolKind::PotentialComponent);
            }
        }
    }

    fn is_unknown_pascal(&self, key: &str) -> bool {
        self.graph
            .node(key)
            .is_some_and(|n| n.kind.is_none() && is_pascal_case(key))
    }
}
