use proptest::prelude::*;
use symgraph_analysis::call_graph::{CallGraph, CallGraphBuilder, EdgeKind};
use symgraph_analysis::paths::PathSearch;
use symgraph_analysis::references::ReferenceResolver;
use symgraph_analysis::source_model::{InMemoryModel, OccurrenceRole};
use symgraph_core::types::{FxHashSet, Location};

/// Edges `n{i} → n{j}` with `i < j`, so the graph is acyclic.
fn dag(pairs: &[(usize, usize)]) -> CallGraph {
    let mut g = CallGraph::new();
    for (line, &(lo, hi)) in pairs.iter().enumerate() {
        g.add_edge(
            &format!("n{lo}"),
            &format!("n{hi}"),
            Location::new("dag.ts", line as u32 + 1, 1),
            EdgeKind::Call,
        );
    }
    g
}

fn forward_pair() -> impl Strategy<Value = (usize, usize)> {
    (0usize..6).prop_flat_map(|lo| (Just(lo), lo + 1..7))
}

fn pick(g: &CallGraph, index: &prop::sample::Index) -> String {
    let keys: Vec<&String> = g.nodes().map(|n| &n.key).collect();
    index.get(&keys).to_string()
}

/// Functions `f0..fN`, each calling the listed indices.
fn call_model(calls: &[Vec<usize>]) -> InMemoryModel {
    let n = calls.len();
    InMemoryModel::builder()
        .file("src/funcs.ts", |f| {
            for (i, targets) in calls.iter().enumerate() {
                f.function(&format!("f{i}"), |b| {
                    for t in targets {
                        b.call(&format!("f{}", t % n));
                    }
                });
            }
        })
        .build()
}

fn snapshot(graph: &CallGraph) -> (Vec<String>, Vec<(String, String)>) {
    (
        graph.nodes().map(|n| n.key.clone()).collect(),
        graph
            .edges()
            .map(|e| (e.caller.clone(), e.callee.clone()))
            .collect(),
    )
}

proptest! {
    #[test]
    fn forward_paths_are_simple_and_connected(
        pairs in prop::collection::vec(forward_pair(), 1..14),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let g = dag(&pairs);
        let (from, to) = (pick(&g, &a), pick(&g, &b));

        let result = PathSearch::new(&g).find_paths(&from, &to).unwrap();
        prop_assert_eq!(result.total_paths, result.paths.len());
        for path in &result.paths {
            prop_assert_eq!(path.nodes.first(), Some(&from));
            prop_assert_eq!(path.nodes.last(), Some(&to));
            let unique: FxHashSet<&String> = path.nodes.iter().collect();
            prop_assert_eq!(unique.len(), path.nodes.len());
            for pair in path.nodes.windows(2) {
                prop_assert!(g.edge(&pair[0], &pair[1]).is_some());
            }
        }
    }

    #[test]
    fn forward_and_reverse_agree_on_reachability(
        pairs in prop::collection::vec(forward_pair(), 1..14),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let g = dag(&pairs);
        let (from, to) = (pick(&g, &a), pick(&g, &b));
        prop_assume!(from != to);

        let search = PathSearch::new(&g);
        let forward = search.find_paths(&from, &to).unwrap();
        let reverse = search.find_all_callers(&to).unwrap();
        let through = reverse.paths.iter().any(|p| p.contains(&from));
        prop_assert_eq!(!forward.paths.is_empty(), through);

        for path in &reverse.paths {
            let head = g.node(&path.nodes[0]).unwrap();
            prop_assert!(head.is_root());
            prop_assert_eq!(path.nodes.last(), Some(&to));
        }
    }

    #[test]
    fn build_is_deterministic(
        calls in prop::collection::vec(prop::collection::vec(0usize..6, 0..4), 1..6),
    ) {
        let model = call_model(&calls);
        let mut first = CallGraphBuilder::new(&model);
        first.build();
        let mut second = CallGraphBuilder::new(&model);
        second.build();
        prop_assert_eq!(snapshot(first.graph()), snapshot(second.graph()));

        // Rebuilding in place gives the same graph again.
        first.build();
        prop_assert_eq!(snapshot(first.graph()), snapshot(second.graph()));
    }

    #[test]
    fn collected_references_are_unique_and_valid(
        spots in prop::collection::vec((1u32..6, 1u32..4, 0usize..3), 0..20),
    ) {
        let roles = [
            OccurrenceRole::Identifier,
            OccurrenceRole::TypeReference,
            OccurrenceRole::ExportSpecifier,
        ];
        let model = InMemoryModel::builder()
            .file("src/logger.ts", |f| {
                f.export().class("Logger", |_| {});
            })
            .file("src/app.ts", |f| {
                for (line, column, role) in &spots {
                    f.occurrence_at("Logger", roles[*role].clone(), *line, *column);
                }
            })
            .build();
        let resolver = ReferenceResolver::new(&model);
        let def = resolver.find_definition("Logger").unwrap();

        let refs = resolver.collect_references("Logger", &def, false);
        let again = resolver.collect_references("Logger", &def, false);
        prop_assert_eq!(&refs, &again);

        let unique: FxHashSet<&Location> = refs.iter().map(|r| &r.location).collect();
        prop_assert_eq!(unique.len(), refs.len());
        prop_assert!(refs.iter().all(|r| r.valid));

        let valid_spots: FxHashSet<(u32, u32)> = spots
            .iter()
            .filter(|(_, _, role)| *role != 2)
            .map(|(l, c, _)| (*l, *c))
            .collect();
        prop_assert_eq!(refs.len(), valid_spots.len());
    }
}
