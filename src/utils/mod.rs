use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Directive applied when neither `RUST_LOG` nor a configured filter is set.
pub const DEFAULT_LOG_DIRECTIVE: &str =
    "zospend=info,zospend_core=info,zospend_storage_json=info";

static TRACING_INIT: Once = Once::new();

/// Installs the global `fmt` subscriber once.
///
/// Precedence: `RUST_LOG`, then `filter`, then [`DEFAULT_LOG_DIRECTIVE`].
pub fn init_tracing(filter: Option<&str>) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(filter.unwrap_or(DEFAULT_LOG_DIRECTIVE)))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

        // Another subscriber may already be installed by the host; keep it.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
