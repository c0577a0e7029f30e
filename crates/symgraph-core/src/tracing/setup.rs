//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding per-module log directives.
pub const LOG_ENV_VAR: &str = "SYMGRAPH_LOG";

/// Initialize the symgraph tracing/logging system.
///
/// Reads `SYMGRAPH_LOG` for per-module log levels.
/// Format: `SYMGRAPH_LOG=symgraph_analysis::call_graph=debug,symgraph_analysis=info`
///
/// Falls back to `symgraph=info` if `SYMGRAPH_LOG` is not set or is invalid.
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("symgraph=info"));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init();
    });
}
