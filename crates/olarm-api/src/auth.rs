use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// An Olarm API key.
///
/// One credential may cover several physical devices; every client built
/// from the same credential shares one rate limiter (the vendor throttles
/// per key, not per device).
#[derive(Debug, Clone)]
pub struct Credential {
    key: SecretString,
}

impl Credential {
    /// Wrap an API key. Generated in the Olarm app under API access.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into().into() }
    }

    /// Build the `Authorization: Bearer ...` header value, marked sensitive
    /// so it is redacted from debug output.
    pub fn bearer_header(&self) -> Result<HeaderValue, Error> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.key.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid API key header value: {e}"),
            })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Registry key for limiter sharing. Stays inside the crate -- never
    /// logged or serialized.
    pub(crate) fn fingerprint(&self) -> String {
        self.key.expose_secret().to_owned()
    }
}

impl From<SecretString> for Credential {
    fn from(key: SecretString) -> Self {
        Self { key }
    }
}
