use thiserror::Error;

/// Top-level error type for the `olarm-api` crate.
///
/// Every variant is an *expected* failure mode -- rate limiting, bad
/// credentials, vendor flakiness -- surfaced as data for the host to act
/// on. Nothing here should ever terminate a host process, and the decoders
/// never produce errors at all (they substitute defaults and log).
#[derive(Debug, Error)]
pub enum Error {
    // ── Rate limiting ───────────────────────────────────────────────
    /// The vendor throttled us: HTTP 429, or a "too many requests" body
    /// hiding behind another status code.
    #[error("Rate limited by the Olarm API: {body}")]
    RateLimited { body: String },

    /// The shared limiter refused the slot after too many consecutive
    /// rate-limit hits. No network request was made.
    #[error("Rate limited -- too many consecutive 429 responses, skipping until next cycle")]
    RateLimitExhausted,

    // ── Authentication ──────────────────────────────────────────────
    /// The vendor rejected the API key (a "Forbidden" text body).
    /// Not retryable; the host should flag the credential as invalid.
    #[error("Forbidden -- the Olarm API rejected the key: {body}")]
    Forbidden { body: String },

    /// Could not construct auth material (bad header value, etc.)
    #[error("Authentication setup failed: {message}")]
    Authentication { message: String },

    // ── Upstream ────────────────────────────────────────────────────
    /// HTTP 502 with a non-JSON body: the gateway is up but the API
    /// server behind it is not answering.
    #[error("Olarm API unavailable (502): {body}")]
    UpstreamUnavailable { body: String },

    /// The vendor returned text where JSON was expected, and the text
    /// matched none of the known failure phrases.
    #[error("Unexpected non-JSON response from the Olarm API: {body}")]
    UnexpectedBody { body: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// `true` when this failure came from vendor throttling (including the
    /// pre-emptive skip).
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::RateLimitExhausted)
    }

    /// `true` when the credential itself is the problem and retrying with
    /// the same key is pointless.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Forbidden { .. } | Self::Authentication { .. })
    }

    /// `true` for transient conditions worth re-attempting on the next
    /// poll cycle.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited { .. } | Self::RateLimitExhausted | Self::UpstreamUnavailable { .. } => {
                true
            }
            _ => false,
        }
    }
}
