use std::sync::Once;

use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

static LOG_INIT: Once = Once::new();

/// Filter applied by `log_init` when neither `RUST_LOG` nor a default is provided
const DEFAULT_TEST_FILTER: &str = "info,cosmian_envelope_crypto=debug,cosmian_envelope_server=debug";

/// Settings of the process-wide tracing subscriber
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Filter directives, same syntax as `RUST_LOG`.
    /// When set, overrides the `RUST_LOG` environment variable.
    pub rust_log: Option<String>,
    /// Do not log to stdout
    pub quiet: bool,
    /// Use ANSI colors in the output
    pub with_ansi_colors: bool,
}

/// Initialize logging for tests and tools.
///
/// The `RUST_LOG` environment variable wins over `default_value`.
/// Only the first call has an effect.
///
/// # Panics
///
/// Will panic if another global tracing subscriber was already installed
pub fn log_init(default_value: Option<&str>) {
    LOG_INIT.call_once(|| {
        if std::env::var("RUST_BACKTRACE").is_err() {
            unsafe {
                std::env::set_var("RUST_BACKTRACE", "1");
            }
        }

        let filter = std::env::var("RUST_LOG")
            .ok()
            .or_else(|| default_value.map(str::to_owned))
            .unwrap_or_else(|| DEFAULT_TEST_FILTER.to_owned());

        if let Err(e) = tracing_setup(&filter, true) {
            panic!("cannot set the global tracing subscriber: {e}");
        }
    });
}

/// Install the global tracing subscriber of a server process.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn tracing_init(config: &TracingConfig) -> Result<(), TryInitError> {
    if config.quiet {
        return Ok(());
    }
    let filter = config
        .rust_log
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_owned());
    tracing_setup(&filter, config.with_ansi_colors)
}

fn tracing_setup(filter: &str, with_ansi_colors: bool) -> Result<(), TryInitError> {
    let format = tracing_subscriber::fmt::layer()
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(with_ansi_colors)
        .compact();

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(format)
        .try_init()
}
