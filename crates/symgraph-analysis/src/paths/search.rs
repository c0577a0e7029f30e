//! Depth-first path enumeration.
//!
//! The two searches avoid cycles differently. The forward trace marks a
//! node visited while it is on the current branch and unmarks it on
//! backtrack. The reverse search hands each descent its own copy of the
//! visited set and skips any caller already in it; a branch whose callers
//! are all visited ends without producing a path.

use std::path::PathBuf;

use symgraph_core::config::OutputConfig;
use symgraph_core::errors::CallGraphError;
use symgraph_core::types::FxHashSet;

use crate::call_graph::{CallGraph, SymbolNode};

use super::diagram::render_diagram;
use super::query::TraceQuery;
use super::{CallGraphResult, CallPath};

/// Path queries over a built graph.
pub struct PathSearch<'g> {
    graph: &'g CallGraph,
    output_dir: PathBuf,
}

impl<'g> PathSearch<'g> {
    pub fn new(graph: &'g CallGraph) -> Self {
        Self::with_output(graph, &OutputConfig::default())
    }

    pub fn with_output(graph: &'g CallGraph, output: &OutputConfig) -> Self {
        Self {
            graph,
            output_dir: output.effective_dir(),
        }
    }

    /// All simple paths from `from` to `to`, in depth-first discovery order.
    pub fn find_paths(&self, from: &str, to: &str) -> Result<CallGraphResult, CallGraphError> {
        let start = self.require(from)?;
        let end = self.require(to)?;
        let target = end.key.as_str();

        let mut found: Vec<Vec<&'g str>> = Vec::new();
        if start.key == end.key {
            found.push(vec![target]);
        } else {
            let mut path: Vec<&'g str> = vec![start.key.as_str()];
            let mut visited: FxHashSet<&'g str> = FxHashSet::default();
            visited.insert(start.key.as_str());
            // (node, index of the next callee to try)
            let mut stack: Vec<(&'g SymbolNode, usize)> = vec![(start, 0)];

            while let Some(frame) = stack.last_mut() {
                let (node, index) = *frame;
                frame.1 += 1;

                let Some(callee) = node.callees.get_index(index) else {
                    stack.pop();
                    if let Some(done) = path.pop() {
                        visited.remove(done);
                    }
                    continue;
                };
                let callee = callee.as_str();
                if visited.contains(callee) {
                    continue;
                }
                if callee == target {
                    let mut complete = path.clone();
                    complete.push(callee);
                    found.push(complete);
                    continue;
                }
                let Some(child) = self.graph.node(callee) else {
                    continue;
                };
                visited.insert(callee);
                path.push(callee);
                stack.push((child, 0));
            }
        }

        tracing::debug!(from, to, paths = found.len(), "forward trace complete");
        let file_name = format!("trace_{}_to_{}.md", file_stem(from), file_stem(to));
        Ok(self.result(found, from, Some(to), file_name))
    }

    /// Every caller chain that ends at `target` and starts at a root.
    /// Each chain is listed root first.
    pub fn find_all_callers(&self, target: &str) -> Result<CallGraphResult, CallGraphError> {
        let end = self.require(target)?;
        let target = end.key.as_str();

        // (path with the newest caller first, nodes already on this branch)
        let mut stack: Vec<(Vec<&'g str>, FxHashSet<&'g str>)> = Vec::new();
        for caller in end.callers.iter().rev() {
            let caller = caller.as_str();
            if caller == target {
                continue;
            }
            let visited: FxHashSet<&'g str> = [target, caller].into_iter().collect();
            stack.push((vec![caller, target], visited));
        }

        let mut found: Vec<Vec<&'g str>> = Vec::new();
        while let Some((path, visited)) = stack.pop() {
            let Some(node) = path.first().and_then(|head| self.graph.node(head)) else {
                continue;
            };
            if node.is_root() {
                found.push(path);
                continue;
            }
            for caller in node.callers.iter().rev() {
                let caller = caller.as_str();
                if visited.contains(caller) {
                    continue;
                }
                let mut next_visited = visited.clone();
                next_visited.insert(caller);
                let mut next_path = Vec::with_capacity(path.len() + 1);
                next_path.push(caller);
                next_path.extend_from_slice(&path);
                stack.push((next_path, next_visited));
            }
        }

        tracing::debug!(symbol = target, paths = found.len(), "caller search complete");
        let file_name = format!("callers_{}.md", file_stem(target));
        Ok(self.result(found, target, None, file_name))
    }

    /// Forward trace for a parsed `from -> to` query.
    pub fn trace(&self, query: &TraceQuery) -> Result<CallGraphResult, CallGraphError> {
        self.find_paths(&query.from, &query.to)
    }

    fn require(&self, key: &str) -> Result<&'g SymbolNode, CallGraphError> {
        self.graph
            .node(key)
            .ok_or_else(|| CallGraphError::SymbolNotInGraph {
                symbol: key.to_string(),
            })
    }

    /// `start` is fixed for forward traces; reverse chains start at their root.
    fn result(
        &self,
        found: Vec<Vec<&'g str>>,
        anchor: &str,
        forward_end: Option<&str>,
        file_name: String,
    ) -> CallGraphResult {
        let paths: Vec<CallPath> = found
            .into_iter()
            .map(|nodes| {
                let (start, end) = match forward_end {
                    Some(end) => (anchor.to_string(), end.to_string()),
                    None => (
                        nodes.first().map_or_else(|| anchor.to_string(), |n| n.to_string()),
                        anchor.to_string(),
                    ),
                };
                self.to_call_path(&nodes, start, end)
            })
            .collect();

        CallGraphResult {
            total_paths: paths.len(),
            rendered_diagram: render_diagram(self.graph, &paths),
            suggested_output_path: self.output_dir.join(file_name),
            paths,
        }
    }

    fn to_call_path(&self, nodes: &[&str], start_symbol: String, end_symbol: String) -> CallPath {
        let edges = nodes
            .windows(2)
            .filter_map(|pair| self.graph.edge(pair[0], pair[1]).cloned())
            .collect();
        CallPath {
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            edges,
            start_symbol,
            end_symbol,
        }
    }
}

/// Symbol key reduced to characters safe in a file name.
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
