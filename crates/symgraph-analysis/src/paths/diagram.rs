//! Mermaid class diagram export for search results.
//!
//! Layout, in order: component blocks, hook blocks, plain class blocks,
//! style lines, then relations grouped as component → component,
//! component → hook, and every other call. Methods seen on the paths are
//! listed inside their owning class's block.

use std::fmt::Write as _;

use indexmap::{IndexMap, IndexSet};

use crate::call_graph::{CallGraph, SymbolNode};
use crate::classifier::SymbolKind;

use super::CallPath;

const COMPONENT_STYLE: &str = "fill:#e1f5fe,stroke:#0288d1";
const HOOK_STYLE: &str = "fill:#fff3e0,stroke:#f57c00";

/// Render the nodes and edges on `paths` as a fenced Mermaid `classDiagram`.
pub fn render_diagram(graph: &CallGraph, paths: &[CallPath]) -> String {
    let mut keys: IndexSet<&str> = IndexSet::new();
    let mut edges: IndexSet<(&str, &str)> = IndexSet::new();
    for path in paths {
        keys.extend(path.nodes.iter().map(String::as_str));
        edges.extend(path.nodes.windows(2).map(|w| (w[0].as_str(), w[1].as_str())));
    }

    let mut components: IndexSet<String> = IndexSet::new();
    let mut hooks: IndexSet<String> = IndexSet::new();
    let mut classes: IndexSet<String> = IndexSet::new();
    let mut methods: IndexMap<String, Vec<String>> = IndexMap::new();
    for key in &keys {
        let node = graph.node(key);
        match role(key, node) {
            Role::Component => {
                components.insert(node_id(key, node));
            }
            Role::Hook => {
                hooks.insert(node_id(key, node));
            }
            Role::Class => {
                classes.insert(node_id(key, node));
            }
            Role::Method { owner, method } => {
                let id = sanitize(owner);
                let listed = methods.entry(id.clone()).or_default();
                if !listed.iter().any(|m| m == method) {
                    listed.push(method.to_string());
                }
                classes.insert(id);
            }
            Role::Other => {}
        }
    }
    let no_methods = Vec::new();

    let mut out = String::from("```mermaid\nclassDiagram\n");
    for id in &components {
        write_block(&mut out, id, Some("component"), methods.get(id).unwrap_or(&no_methods));
    }
    for id in &hooks {
        write_block(&mut out, id, Some("hook"), &no_methods);
    }
    for id in classes.iter().filter(|id| !components.contains(*id) && !hooks.contains(*id)) {
        write_block(&mut out, id, None, methods.get(id).unwrap_or(&no_methods));
    }
    for id in &components {
        let _ = writeln!(out, "    style {id} {COMPONENT_STYLE}");
    }
    for id in &hooks {
        let _ = writeln!(out, "    style {id} {HOOK_STYLE}");
    }

    let mut renders: IndexSet<String> = IndexSet::new();
    let mut uses: IndexSet<String> = IndexSet::new();
    let mut calls: IndexSet<String> = IndexSet::new();
    for (from, to) in edges {
        let from_node = graph.node(from);
        let to_node = graph.node(to);
        let from_id = node_id(from, from_node);
        let to_id = node_id(to, to_node);
        match (role(from, from_node), role(to, to_node)) {
            (Role::Component, Role::Component) => {
                renders.insert(format!("    {from_id} --> {to_id}"));
            }
            (Role::Component, Role::Hook) => {
                uses.insert(format!("    {from_id} ..> {to_id} : uses"));
            }
            (_, Role::Method { method, .. }) => {
                calls.insert(format!("    {from_id} --> {to_id} : {method}"));
            }
            _ => {
                calls.insert(format!("    {from_id} --> {to_id}"));
            }
        }
    }
    let mut emitted: IndexSet<&str> = IndexSet::new();
    for line in renders.iter().chain(&uses).chain(&calls) {
        if emitted.insert(line.as_str()) {
            out.push_str(line);
            out.push('\n');
        }
    }

    out.push_str("```\n");
    out
}

fn write_block(out: &mut String, id: &str, stereotype: Option<&str>, methods: &[String]) {
    if stereotype.is_none() && methods.is_empty() {
        let _ = writeln!(out, "    class {id}");
        return;
    }
    let _ = writeln!(out, "    class {id} {{");
    if let Some(tag) = stereotype {
        let _ = writeln!(out, "        <<{tag}>>");
    }
    for method in methods {
        let _ = writeln!(out, "        +{method}()");
    }
    let _ = writeln!(out, "    }}");
}

enum Role<'k> {
    Component,
    Hook,
    Class,
    Method { owner: &'k str, method: &'k str },
    Other,
}

fn role<'k>(key: &'k str, node: Option<&SymbolNode>) -> Role<'k> {
    let kind = node.and_then(|n| n.kind);
    match kind {
        Some(k) if k.is_component() => Role::Component,
        Some(k) if k.is_hook() => Role::Hook,
        Some(SymbolKind::Class) => Role::Class,
        Some(SymbolKind::Method) => match key.split_once('.') {
            Some((owner, method)) => Role::Method { owner, method },
            None => Role::Other,
        },
        _ => Role::Other,
    }
}

/// Mermaid identifier for a node; methods collapse onto their class.
fn node_id(key: &str, node: Option<&SymbolNode>) -> String {
    match role(key, node) {
        Role::Method { owner, .. } => sanitize(owner),
        _ => sanitize(key),
    }
}

fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
