//! Tests for forward traces, reverse caller search and diagram export.

mod common;

use std::path::PathBuf;

use symgraph_analysis::call_graph::{CallGraph, CallGraphBuilder, EdgeKind};
use symgraph_analysis::paths::{CallGraphResult, PathSearch, TraceQuery};
use symgraph_analysis::source_model::InMemoryModel;
use symgraph_core::config::OutputConfig;
use symgraph_core::errors::{CallGraphError, SymgraphErrorCode};
use symgraph_core::types::Location;

fn build(model: &InMemoryModel) -> CallGraph {
    let mut builder = CallGraphBuilder::new(model);
    builder.build();
    builder.into_graph()
}

fn node_lists(result: &CallGraphResult) -> Vec<Vec<&str>> {
    result
        .paths
        .iter()
        .map(|p| p.nodes.iter().map(String::as_str).collect())
        .collect()
}

/// Build a graph straight from edges.
fn graph(edges: &[(&str, &str)]) -> CallGraph {
    let mut g = CallGraph::new();
    for (i, (a, b)) in edges.iter().enumerate() {
        g.add_edge(a, b, Location::new("g.ts", i as u32 + 1, 1), EdgeKind::Call);
    }
    g
}

// ---- Forward trace ----

#[test]
fn test_trace_through_service_layers() {
    let model = common::service_layer_model();
    let graph = build(&model);
    let result = PathSearch::new(&graph)
        .find_paths("main", "UserService.updateUser")
        .unwrap();

    assert_eq!(result.total_paths, 1);
    assert_eq!(
        node_lists(&result),
        vec![vec![
            "main",
            "AppController.start",
            "UserController.processRequest",
            "UserService.updateUser",
        ]]
    );
    let path = &result.paths[0];
    assert_eq!(path.start_symbol, "main");
    assert_eq!(path.end_symbol, "UserService.updateUser");
    assert_eq!(path.edges.len(), 3);
    assert_eq!(path.edges[0].caller, "main");
    assert_eq!(path.edges[0].callee, "AppController.start");
    assert_eq!(path.edges[0].location, Location::new("src/main.ts", 3, 1));
}

#[test]
fn test_trace_diagram_for_method_chain() {
    let model = common::service_layer_model();
    let graph = build(&model);
    let result = PathSearch::new(&graph)
        .find_paths("main", "UserService.updateUser")
        .unwrap();

    let expected = "\
```mermaid
classDiagram
    class AppController {
        +start()
    }
    class UserController {
        +processRequest()
    }
    class UserService {
        +updateUser()
    }
    main --> AppController : start
    AppController --> UserController : processRequest
    UserController --> UserService : updateUser
```
";
    assert_eq!(result.rendered_diagram, expected);
}

#[test]
fn test_trace_through_components() {
    let model = common::component_model();
    let graph = build(&model);
    let result = PathSearch::new(&graph).find_paths("App", "UserCard").unwrap();

    assert_eq!(
        node_lists(&result),
        vec![vec!["App", "Dashboard", "UserList", "UserCard"]]
    );
    assert!(result.paths[0].edges.iter().all(|e| e.kind == EdgeKind::Render));

    let expected = "\
```mermaid
classDiagram
    class App {
        <<component>>
    }
    class Dashboard {
        <<component>>
    }
    class UserList {
        <<component>>
    }
    class UserCard {
        <<component>>
    }
    style App fill:#e1f5fe,stroke:#0288d1
    style Dashboard fill:#e1f5fe,stroke:#0288d1
    style UserList fill:#e1f5fe,stroke:#0288d1
    style UserCard fill:#e1f5fe,stroke:#0288d1
    App --> Dashboard
    Dashboard --> UserList
    UserList --> UserCard
```
";
    assert_eq!(result.rendered_diagram, expected);
}

#[test]
fn test_trace_to_self() {
    let g = graph(&[("a", "b")]);
    let result = PathSearch::new(&g).find_paths("a", "a").unwrap();
    assert_eq!(node_lists(&result), vec![vec!["a"]]);
    assert!(result.paths[0].edges.is_empty());
}

#[test]
fn test_trace_without_route_is_empty() {
    let g = graph(&[("a", "b"), ("c", "d")]);
    let result = PathSearch::new(&g).find_paths("a", "d").unwrap();
    assert!(result.paths.is_empty());
    assert_eq!(result.total_paths, 0);
    assert_eq!(result.rendered_diagram, "```mermaid\nclassDiagram\n```\n");
}

#[test]
fn test_trace_query() {
    let model = common::service_layer_model();
    let graph = build(&model);
    let search = PathSearch::new(&graph);

    let query = TraceQuery::parse("main -> DatabaseService.saveData").unwrap();
    let result = search.trace(&query).unwrap();
    assert_eq!(
        node_lists(&result),
        vec![vec![
            "main",
            "AppController.start",
            "UserController.processRequest",
            "UserService.updateUser",
            "UserService.saveUser",
            "DatabaseService.saveData",
        ]]
    );

    let err = TraceQuery::parse("main").unwrap_err();
    assert_eq!(err.error_code(), "MALFORMED_QUERY");
}

#[test]
fn test_unknown_endpoint() {
    let model = common::service_layer_model();
    let graph = build(&model);
    let err = PathSearch::new(&graph)
        .find_paths("main", "UserService.deleteUser")
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
    assert!(matches!(
        err,
        CallGraphError::SymbolNotInGraph { ref symbol } if symbol == "UserService.deleteUser"
    ));
}

// ---- Reverse caller search ----

#[test]
fn test_callers_of_database_write() {
    let model = common::service_layer_model();
    let graph = build(&model);
    let result = PathSearch::new(&graph)
        .find_all_callers("DatabaseService.saveData")
        .unwrap();

    assert_eq!(result.total_paths, 1);
    let path = &result.paths[0];
    let n = path.len();
    assert_eq!(path.nodes[n - 2], "UserService.saveUser");
    assert_eq!(path.nodes[n - 1], "DatabaseService.saveData");
    assert_eq!(path.start_symbol, "main");
    assert_eq!(path.end_symbol, "DatabaseService.saveData");
    assert_eq!(path.edges.len(), n - 1);
}

#[test]
fn test_callers_of_a_hook() {
    let model = common::component_model();
    let graph = build(&model);
    let result = PathSearch::new(&graph).find_all_callers("useState").unwrap();

    assert_eq!(
        node_lists(&result),
        vec![
            vec!["Dashboard.render", "UserList", "useUsers", "useState"],
            vec!["App", "Dashboard", "UserList", "useUsers", "useState"],
        ]
    );
    assert_eq!(result.paths[0].start_symbol, "Dashboard.render");
    assert_eq!(result.paths[1].start_symbol, "App");

    let expected = "\
```mermaid
classDiagram
    class UserList {
        <<component>>
    }
    class App {
        <<component>>
    }
    class Dashboard {
        <<component>>
        +render()
    }
    class useUsers {
        <<hook>>
    }
    class useState {
        <<hook>>
    }
    style UserList fill:#e1f5fe,stroke:#0288d1
    style App fill:#e1f5fe,stroke:#0288d1
    style Dashboard fill:#e1f5fe,stroke:#0288d1
    style useUsers fill:#fff3e0,stroke:#f57c00
    style useState fill:#fff3e0,stroke:#f57c00
    App --> Dashboard
    Dashboard --> UserList
    UserList ..> useUsers : uses
    useUsers --> useState
```
";
    assert_eq!(result.rendered_diagram, expected);
}

#[test]
fn test_callers_of_root_are_empty() {
    let model = common::component_model();
    let graph = build(&model);
    let result = PathSearch::new(&graph).find_all_callers("App").unwrap();
    assert!(result.paths.is_empty());
}

#[test]
fn test_self_call_is_not_a_caller() {
    let g = graph(&[("main", "walk"), ("walk", "walk")]);
    let result = PathSearch::new(&g).find_all_callers("walk").unwrap();
    assert_eq!(node_lists(&result), vec![vec!["main", "walk"]]);
}

/// Both searches on a cycle:
///
/// ```text
///   main → a → b → c
///          ↑   ↓
///          └── d
/// ```
#[test]
fn test_cycles_terminate() {
    let g = graph(&[("main", "a"), ("a", "b"), ("b", "c"), ("b", "d"), ("d", "a")]);
    let search = PathSearch::new(&g);

    let forward = search.find_paths("main", "c").unwrap();
    assert_eq!(node_lists(&forward), vec![vec!["main", "a", "b", "c"]]);

    let reverse = search.find_all_callers("c").unwrap();
    assert_eq!(node_lists(&reverse), vec![vec!["main", "a", "b", "c"]]);

    // A cycle with no root above it yields nothing.
    let closed = graph(&[("x", "y"), ("y", "x")]);
    let result = PathSearch::new(&closed).find_all_callers("y").unwrap();
    assert!(result.paths.is_empty());
}

/// The two searches disagree on a cycle with no root above it:
///
/// ```text
///   x ⇄ y → z ← w ← main
/// ```
///
/// The forward trace starts anywhere, so `x → y → z` is a path. The caller
/// search needs a root at the head of every chain. From `y` it reaches `x`,
/// whose only caller `y` is already on the branch, so that chain is dropped.
#[test]
fn test_caller_search_drops_cycles_without_root() {
    let g = graph(&[("x", "y"), ("y", "x"), ("y", "z"), ("main", "w"), ("w", "z")]);
    let search = PathSearch::new(&g);

    let forward = search.find_paths("x", "z").unwrap();
    assert_eq!(node_lists(&forward), vec![vec!["x", "y", "z"]]);

    let reverse = search.find_all_callers("z").unwrap();
    assert_eq!(node_lists(&reverse), vec![vec!["main", "w", "z"]]);
    assert!(reverse.paths.iter().all(|p| !p.nodes.iter().any(|n| n == "x")));
}

// ---- Output paths ----

#[test]
fn test_configured_output_dir() {
    let g = graph(&[("main", "Svc.save")]);
    let output = OutputConfig {
        dir: Some("reports/graphs".to_string()),
    };
    let search = PathSearch::with_output(&g, &output);

    let trace = search.find_paths("main", "Svc.save").unwrap();
    assert_eq!(
        trace.suggested_output_path,
        PathBuf::from("reports/graphs").join("trace_main_to_Svc_save.md")
    );
    let callers = search.find_all_callers("Svc.save").unwrap();
    assert_eq!(
        callers.suggested_output_path,
        PathBuf::from("reports/graphs").join("callers_Svc_save.md")
    );
}

#[test]
fn test_result_json_field_names() {
    let g = graph(&[("main", "run")]);
    let result = PathSearch::new(&g).find_paths("main", "run").unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["totalPaths"], 1);
    assert!(json["renderedDiagram"].is_string());
    assert!(json["suggestedOutputPath"].is_string());
    let path = &json["paths"][0];
    assert_eq!(path["startSymbol"], "main");
    assert_eq!(path["endSymbol"], "run");
    assert_eq!(path["edges"][0]["kind"], "call");
}
