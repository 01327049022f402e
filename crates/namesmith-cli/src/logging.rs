//! Tracing setup.

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber. `RUST_LOG` wins over the `--verbose` default.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "namesmith=debug,namesmith_application=debug,namesmith_interaction=debug,namesmith_infrastructure=debug"
    } else {
        "namesmith=info,namesmith_application=warn,namesmith_interaction=warn,namesmith_infrastructure=warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
