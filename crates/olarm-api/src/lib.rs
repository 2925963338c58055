// olarm-api: Async Rust client for the Olarm alarm-panel API
//
// The Olarm cloud rate-limits aggressively and signals errors loosely
// (429s as plain text, "Forbidden" bodies with HTTP 200). Everything in
// this crate is built around that reality: a shared per-credential rate
// limiter, a classification layer for ambiguous responses, and pure
// decoders that turn the vendor's compact state encodings into typed
// records.

pub mod action;
pub mod api;
pub mod auth;
pub mod classify;
pub mod client;
pub mod decode;
pub mod error;
pub mod limiter;
pub mod models;
pub mod transport;

pub use action::{Action, ActionCmd};
pub use api::DeviceApi;
pub use auth::Credential;
pub use client::{Connection, DeviceClient, Olarm};
pub use error::Error;
pub use limiter::{LimiterRegistry, RateLimiter};
pub use models::{
    AuthCheck, BypassRecord, ChangeRecord, DeviceSnapshot, DeviceSummary, PanelAreaRecord,
    PgmRecord, RawDevice, UtilityKeyRecord, ZoneRecord, ZoneState,
};
pub use transport::TransportConfig;

/// Production API root. Overridable for tests via [`Olarm::with_base_url`].
pub const DEFAULT_BASE_URL: &str = "https://apiv4.olarm.co/api/v4";

/// Documented floor for host poll cadence, in seconds. The limiter enforces
/// per-request spacing; cycle spacing is the host's job.
pub const MIN_POLL_INTERVAL_SECS: u64 = 60;
