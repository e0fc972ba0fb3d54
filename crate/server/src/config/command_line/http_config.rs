use std::fmt::Display;

use clap::Args;
use serde::{Deserialize, Serialize};

#[derive(Args, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    /// The server port
    #[clap(long, env = "ENVELOPE_PORT", default_value = "3000")]
    pub port: u16,

    /// The server hostname
    #[clap(long, env = "ENVELOPE_HOSTNAME", default_value = "0.0.0.0")]
    pub hostname: String,

    /// The origins allowed to call the service from a browser (CORS).
    /// Repeat the option or separate the origins with commas.
    /// Any origin is allowed when none is configured.
    #[clap(
        long = "allow-origin",
        env = "ENVELOPE_ALLOW_ORIGIN",
        value_delimiter = ',',
        verbatim_doc_comment
    )]
    pub allow_origin: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            hostname: "0.0.0.0".to_owned(),
            allow_origin: Vec::new(),
        }
    }
}

impl Display for HttpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "http://{}:{}", self.hostname, self.port)?;
        if !self.allow_origin.is_empty() {
            write!(f, ", allowed origins: {}", self.allow_origin.join(", "))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for HttpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", &self))
    }
}
