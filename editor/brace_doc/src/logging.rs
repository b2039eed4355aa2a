use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=brace_reduced=trace` or similar; set
/// `BRACE_LOG_TREE` for indented span output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let tree = std::env::var_os("BRACE_LOG_TREE").is_some();
        let tree_layer = tree.then(|| HierarchicalLayer::new(2).with_targets(true));
        let flat_layer = if tree {
            None
        } else {
            Some(fmt::layer().with_target(true).with_level(true))
        };
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(tree_layer)
            .with(flat_layer)
            .init();
    });
}
