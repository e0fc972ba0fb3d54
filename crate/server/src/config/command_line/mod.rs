mod clap_config;
mod envelope_config;
mod http_config;
mod keys_config;
mod logging;

pub use clap_config::{ClapConfig, DEFAULT_ENVELOPE_CONF_PATH, ENVELOPE_CONF_ENV};
pub use envelope_config::EnvelopeConfig;
pub use http_config::HttpConfig;
pub use keys_config::KeysConfig;
pub use logging::LoggingConfig;
