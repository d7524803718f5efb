//! Logging initialization.
//!
//! Structured logging via the `tracing` ecosystem. Logs go to stderr so
//! stdout stays clean for prediction JSON; `RUST_LOG` overrides whatever
//! level the config or flags select.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem from config plus CLI overrides.
///
/// `--verbose` wins over the configured level; `--json-logs` wins over the
/// configured format.
pub fn init(config: &prism_core::Config, verbose: bool, json_logs: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let json_format = json_logs || config.logging.format == "json";

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}
