// Shared transport configuration for building reqwest::Client instances.
//
// The Olarm API is public cloud with a proper certificate chain, so there
// are no TLS knobs here -- just timeout, user agent, and the bearer header
// injected as a default header on every request.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap};

use crate::auth::Credential;
use crate::error::Error;

/// Transport settings shared by every client built from one [`Credential`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("olarm-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with the credential's bearer token as a
    /// default header.
    pub fn build_client(&self, credential: &Credential) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, credential.bearer_header()?);

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}
