use std::fmt;

use crate::{config::HttpConfig, envelope_ensure, error::EnvelopeError, result::EResult};

/// The HTTP parameters of the API server
#[derive(Clone, PartialEq, Eq)]
pub struct HttpParams {
    pub hostname: String,
    pub port: u16,
    /// The origins allowed by the CORS policy.
    /// Empty means any origin, as does a `*` entry.
    pub allowed_origins: Vec<String>,
}

impl HttpParams {
    /// Validate the HTTP configuration.
    ///
    /// # Errors
    ///
    /// Fails if the hostname is empty or an allowed origin is not `*`
    /// nor an `http(s)://` URL.
    pub fn try_from(config: &HttpConfig) -> EResult<Self> {
        envelope_ensure!(
            !config.hostname.trim().is_empty(),
            EnvelopeError::Configuration("the hostname cannot be empty".to_owned())
        );

        let allowed_origins = config
            .allow_origin
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                if origin == "*" {
                    return Ok(origin.to_owned());
                }
                envelope_ensure!(
                    origin.starts_with("http://") || origin.starts_with("https://"),
                    EnvelopeError::Configuration(format!(
                        "invalid allowed origin {origin}: expected * or an http(s):// URL"
                    ))
                );
                Ok(origin.trim_end_matches('/').to_owned())
            })
            .collect::<EResult<Vec<_>>>()?;

        Ok(Self {
            hostname: config.hostname.trim().to_owned(),
            port: config.port,
            allowed_origins,
        })
    }

    /// Whether the CORS policy accepts requests from any origin
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl fmt::Debug for HttpParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origins = if self.allows_any_origin() {
            "any".to_owned()
        } else {
            self.allowed_origins.join(", ")
        };
        write!(
            f,
            "http://{}:{} (allowed origins: {origins})",
            self.hostname, self.port
        )
    }
}
