// Classification of ambiguous vendor responses.
//
// The Olarm API does not reliably signal errors through status codes: a
// rate limit may arrive as HTTP 429 *or* as a plain-text "Too Many
// Requests" body under HTTP 200, and auth failures come back as the word
// "Forbidden" in a text body. This module is the single place where that
// sniffing happens, so it can be tested without a transport in the loop.

use reqwest::StatusCode;

/// What a non-JSON (or suspicious) response body actually means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Throttled -- via status 429 or the "too many requests" phrase.
    RateLimited,
    /// The API key was rejected.
    Forbidden,
    /// Gateway answered but the API server behind it did not (502).
    UpstreamUnavailable,
    /// None of the known failure shapes.
    Other,
}

/// Classify a response from status code plus body text.
///
/// Precedence: an explicit 429 wins; for text bodies, "forbidden" is
/// checked first, then a 502 status, then the rate-limit phrase (the
/// vendor sometimes sends it with HTTP 200). A body that merely mentions
/// rate limits must not open a backoff window when the real problem is a
/// rejected key or a dead upstream.
pub fn classify(status: StatusCode, body: &str) -> ResponseKind {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ResponseKind::RateLimited;
    }

    let lower = body.to_lowercase();
    if lower.contains("forbidden") {
        return ResponseKind::Forbidden;
    }
    if status == StatusCode::BAD_GATEWAY {
        return ResponseKind::UpstreamUnavailable;
    }
    if lower.contains("too many requests") {
        return ResponseKind::RateLimited;
    }

    ResponseKind::Other
}
