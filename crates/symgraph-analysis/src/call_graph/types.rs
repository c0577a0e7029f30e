//! Call graph types: an arena of symbol nodes keyed by symbol key.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use symgraph_core::types::Location;

use crate::classifier::SymbolKind;

/// How the caller reaches the callee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// `foo()`
    Call,
    /// `obj.method()` or `this.method()`
    MethodCall,
    /// `useX()` or `Namespace.useX()`
    Hook,
    /// `<Component />`
    Render,
}

/// A graph node. Callers and callees are symbol keys, in discovery order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolNode {
    /// `Class.method` for members, otherwise the global name.
    pub key: String,
    /// `None` while the kind is unknown.
    pub kind: Option<SymbolKind>,
    pub location: Option<Location>,
    pub callers: IndexSet<String>,
    pub callees: IndexSet<String>,
}

impl SymbolNode {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            kind: None,
            location: None,
            callers: IndexSet::new(),
            callees: IndexSet::new(),
        }
    }

    /// No recorded callers.
    pub fn is_root(&self) -> bool {
        self.callers.is_empty()
    }

    pub fn is_component(&self) -> bool {
        self.kind.is_some_and(|k| k.is_component())
    }

    pub fn is_hook(&self) -> bool {
        self.kind.is_some_and(|k| k.is_hook())
    }
}

/// A directed edge, located at its first recorded call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEdge {
    pub caller: String,
    pub callee: String,
    pub location: Location,
    pub kind: EdgeKind,
}

/// Symbol nodes in discovery order plus one edge per (caller, callee) pair.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    nodes: IndexMap<String, SymbolNode>,
    edges: IndexMap<(String, String), CallEdge>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Create the node on first touch. Later touches only fill in a missing
    /// location or an unknown kind.
    pub fn ensure_node(
        &mut self,
        key: &str,
        kind: Option<SymbolKind>,
        location: Option<Location>,
    ) -> &mut SymbolNode {
        let node = self
            .nodes
            .entry(key.to_string())
            .or_insert_with(|| SymbolNode::new(key));
        if node.kind.is_none() {
            node.kind = kind;
        }
        if node.location.is_none() {
            node.location = location;
        }
        node
    }

    /// Record `caller → callee` in both adjacency sets.
    pub fn add_edge(&mut self, caller: &str, callee: &str, location: Location, kind: EdgeKind) {
        self.ensure_node(caller, None, None)
            .callees
            .insert(callee.to_string());
        self.ensure_node(callee, None, None)
            .callers
            .insert(caller.to_string());
        self.edges
            .entry((caller.to_string(), callee.to_string()))
            .or_insert_with(|| CallEdge {
                caller: caller.to_string(),
                callee: callee.to_string(),
                location,
                kind,
            });
    }

    pub fn node(&self, key: &str) -> Option<&SymbolNode> {
        self.nodes.get(key)
    }

    pub(crate) fn node_mut(&mut self, key: &str) -> Option<&mut SymbolNode> {
        self.nodes.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// Nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &SymbolNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &CallEdge> {
        self.edges.values()
    }

    pub fn edge(&self, caller: &str, callee: &str) -> Option<&CallEdge> {
        self.edges.get(&(caller.to_string(), callee.to_string()))
    }

    /// Nodes nothing calls, typically entry points.
    pub fn roots(&self) -> impl Iterator<Item = &SymbolNode> {
        self.nodes.values().filter(|n| n.is_root())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_updates_both_directions() {
        let mut g = CallGraph::new();
        g.add_edge("main", "run", Location::new("a.ts", 2, 1), EdgeKind::Call);
        assert_eq!(g.node_count(), 2);
        assert!(g.node("main").unwrap().callees.contains("run"));
        assert!(g.node("run").unwrap().callers.contains("main"));
        assert_eq!(g.roots().map(|n| n.key.as_str()).collect::<Vec<_>>(), vec!["main"]);
    }

    #[test]
    fn test_repeated_call_sites_keep_first_location() {
        let mut g = CallGraph::new();
        g.add_edge("a", "b", Location::new("x.ts", 2, 1), EdgeKind::Call);
        g.add_edge("a", "b", Location::new("x.ts", 9, 1), EdgeKind::Call);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge("a", "b").unwrap().location.line, 2);
        assert_eq!(g.node("a").unwrap().callees.len(), 1);
    }

    #[test]
    fn test_ensure_node_only_fills_missing_fields() {
        let mut g = CallGraph::new();
        g.ensure_node("Card", None, None);
        g.ensure_node("Card", Some(SymbolKind::FunctionComponent), Some(Location::new("c.tsx", 1, 1)));
        g.ensure_node("Card", Some(SymbolKind::Class), Some(Location::new("d.tsx", 5, 1)));
        let node = g.node("Card").unwrap();
        assert_eq!(node.kind, Some(SymbolKind::FunctionComponent));
        assert_eq!(node.location.as_ref().unwrap().file, "c.tsx");
    }
}
