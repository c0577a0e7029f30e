//! Tests for the symgraph tracing setup.

use std::sync::Mutex;

use symgraph_core::tracing::init_tracing;

/// Serializes tests that touch SYMGRAPH_LOG.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_symgraph_log_directives_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("SYMGRAPH_LOG", "symgraph_analysis::call_graph=debug,symgraph_core=warn");
    init_tracing();
    std::env::remove_var("SYMGRAPH_LOG");
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    tracing::info!("still alive");
}

#[test]
fn test_invalid_symgraph_log_fallback() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("SYMGRAPH_LOG", "this_is_garbage=not_a_level");
    init_tracing();
    std::env::remove_var("SYMGRAPH_LOG");
}
