mod command_line;
mod params;

pub use command_line::{
    ClapConfig, DEFAULT_ENVELOPE_CONF_PATH, ENVELOPE_CONF_ENV, EnvelopeConfig, HttpConfig,
    KeysConfig, LoggingConfig,
};
pub use params::{HttpParams, ServerParams};
