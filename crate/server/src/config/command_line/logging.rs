use clap::Args;
use cosmian_logger::TracingConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Args, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// The logging filter, with the syntax of `RUST_LOG`
    /// (for instance, `info,cosmian_envelope_server=debug`).
    /// Defaults to the `RUST_LOG` environment variable.
    #[clap(long, env = "ENVELOPE_RUST_LOG", verbatim_doc_comment)]
    pub rust_log: Option<String>,

    /// Do not log to stdout
    #[clap(long, env = "ENVELOPE_LOG_QUIET", default_value = "false")]
    pub quiet: bool,

    /// Use ANSI colors in the logs
    #[clap(long, env = "ENVELOPE_LOG_ANSI_COLORS", default_value = "false")]
    pub ansi_colors: bool,
}

impl LoggingConfig {
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig {
            rust_log: self.rust_log.clone(),
            quiet: self.quiet,
            with_ansi_colors: self.ansi_colors,
        }
    }
}
