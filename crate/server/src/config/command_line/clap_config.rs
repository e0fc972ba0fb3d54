use std::{
    fmt::{self},
    path::{Path, PathBuf},
};

use clap::Parser;
use serde::{Deserialize, Serialize};

use super::{EnvelopeConfig, HttpConfig, KeysConfig, LoggingConfig};
use crate::{error::EnvelopeError, result::EResult};

/// The environment variable holding the path of the configuration file
pub const ENVELOPE_CONF_ENV: &str = "COSMIAN_ENVELOPE_CONF";
/// The configuration file used when it exists and the environment variable is not set
pub const DEFAULT_ENVELOPE_CONF_PATH: &str = "/etc/cosmian/envelope.toml";

#[derive(Parser, Default, Serialize, Deserialize, PartialEq, Eq)]
#[clap(version, about, long_about = None)]
#[serde(default)]
pub struct ClapConfig {
    /// Print the server configuration information and exit
    #[clap(long, default_value = "false")]
    pub info: bool,

    #[clap(flatten)]
    pub http: HttpConfig,

    #[clap(flatten)]
    pub keys: KeysConfig,

    #[clap(flatten)]
    pub envelope: EnvelopeConfig,

    #[clap(flatten)]
    pub logging: LoggingConfig,
}

impl ClapConfig {
    /// Load the configuration.
    ///
    /// The configuration is read from the TOML file pointed at by `COSMIAN_ENVELOPE_CONF`,
    /// else from `/etc/cosmian/envelope.toml` if that file exists.
    /// The command line arguments and the environment variables are used otherwise.
    ///
    /// # Errors
    ///
    /// Fails if the configuration file cannot be read or parsed.
    pub fn load_from_file() -> EResult<Self> {
        match Self::location() {
            Some(path) => Self::from_toml_file(&path),
            None => Ok(Self::parse()),
        }
    }

    /// The configuration file to use, if any
    #[must_use]
    pub fn location() -> Option<PathBuf> {
        std::env::var(ENVELOPE_CONF_ENV)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                let default_path = PathBuf::from(DEFAULT_ENVELOPE_CONF_PATH);
                default_path.exists().then_some(default_path)
            })
    }

    /// Parse a TOML configuration file.
    ///
    /// Missing sections and fields take their default values.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid configuration.
    pub fn from_toml_file(path: &Path) -> EResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EnvelopeError::Configuration(format!(
                "cannot read the configuration file {}: {e}",
                path.display()
            ))
        })?;
        Ok(toml::from_str(&content)?)
    }
}

impl fmt::Debug for ClapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut x = f.debug_struct("");
        let x = x
            .field("envelope http", &self.http)
            .field("keys", &self.keys)
            .field("envelope", &self.envelope)
            .field("logging", &self.logging);
        let x = if self.info { x.field("info", &self.info) } else { x };
        x.finish()
    }
}
