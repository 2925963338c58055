// HTTP request layer, gated by the shared rate limiter.
//
// One logical call issues at most one HTTP request -- the only waiting
// that ever happens is the limiter's backoff/gap suspension, and there
// are no automatic retries. Response classification (429s disguised as
// text, "Forbidden" bodies, dead upstreams) lives in `classify`; this
// module wires its verdicts into the limiter and the error type.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use crate::action::{Action, ActionCmd};
use crate::auth::Credential;
use crate::classify::{ResponseKind, classify};
use crate::decode::{format_unix_seconds, value_as_i64};
use crate::error::Error;
use crate::limiter::{LimiterRegistry, RateLimiter};
use crate::models::{ChangeRecord, DeviceSummary, RawDevice};
use crate::transport::TransportConfig;
use crate::DEFAULT_BASE_URL;

// ── Factory ─────────────────────────────────────────────────────────

/// Entry point: owns the credential, transport settings, and the limiter
/// registry, so every [`Connection`] opened for the same key shares one
/// [`RateLimiter`].
#[derive(Debug)]
pub struct Olarm {
    credential: Credential,
    transport: TransportConfig,
    base_url: Url,
    limiters: Arc<LimiterRegistry>,
}

impl Olarm {
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            transport: TransportConfig::default(),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            limiters: Arc::new(LimiterRegistry::new()),
        }
    }

    /// Override transport settings (timeout, user agent).
    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Point at a different API root. Test servers, mostly.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, Error> {
        self.base_url = Url::parse(base_url)?;
        Ok(self)
    }

    /// Share a limiter registry across several factories. Only needed when
    /// a process builds factories for the same credential in more than one
    /// place; a single factory already shares internally.
    pub fn with_registry(mut self, limiters: Arc<LimiterRegistry>) -> Self {
        self.limiters = limiters;
        self
    }

    /// Build a connection: an HTTP client carrying the bearer header plus
    /// the shared limiter for this credential.
    pub fn connect(&self) -> Result<Connection, Error> {
        Ok(Connection {
            http: self.transport.build_client(&self.credential)?,
            base_url: self.base_url.clone(),
            limiter: self.limiters.limiter_for(&self.credential),
        })
    }
}

// ── Connection (credential scope) ───────────────────────────────────

/// Credential-scoped API access: everything that is not tied to a single
/// device. Cheap to clone; clones share the limiter.
#[derive(Debug, Clone)]
pub struct Connection {
    http: reqwest::Client,
    base_url: Url,
    limiter: Arc<RateLimiter>,
}

impl Connection {
    /// The shared rate limiter. Hosts call
    /// [`reset_cycle`](RateLimiter::reset_cycle) on it at each poll-cycle
    /// boundary.
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// A client scoped to one device.
    pub fn device(&self, device_id: impl Into<String>) -> DeviceClient {
        let device_id = device_id.into();
        DeviceClient {
            conn: self.clone(),
            device_name: device_id.clone(),
            device_id,
        }
    }

    /// A device client with a human-readable name for log lines.
    pub fn device_named(
        &self,
        device_id: impl Into<String>,
        device_name: impl Into<String>,
    ) -> DeviceClient {
        DeviceClient {
            conn: self.clone(),
            device_id: device_id.into(),
            device_name: device_name.into(),
        }
    }

    /// `GET /devices` -- every device visible to this credential.
    pub async fn list_devices(&self) -> Result<Vec<DeviceSummary>, Error> {
        let url = self.endpoint("devices")?;
        let json = self.get_json(url).await?;

        let data = json.get("data").cloned().unwrap_or(Value::Array(Vec::new()));
        serde_json::from_value(data).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: json.to_string(),
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let full = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&full).map_err(Error::InvalidUrl)
    }

    /// Limiter-gated GET expecting a JSON body. Records success on any
    /// parseable JSON, classifies everything else.
    pub(crate) async fn get_json(&self, url: Url) -> Result<Value, Error> {
        if !self.limiter.acquire().await {
            return Err(Error::RateLimitExhausted);
        }

        debug!(%url, "GET");
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let status = resp.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let body = resp.text().await.unwrap_or_default();
            self.limiter.record_rate_limited();
            error!(%status, "Olarm API rate limited the request");
            return Err(Error::RateLimited { body });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        match serde_json::from_str::<Value>(&body) {
            Ok(json) => {
                self.limiter.record_success();
                Ok(json)
            }
            Err(_) => Err(self.classify_text(status, body)),
        }
    }

    /// Turn a non-JSON body into the matching error, updating the limiter
    /// when the text is a disguised rate limit.
    pub(crate) fn classify_text(&self, status: StatusCode, body: String) -> Error {
        match classify(status, &body) {
            ResponseKind::RateLimited => {
                self.limiter.record_rate_limited();
                error!("refresh interval is too frequent for the Olarm API");
                Error::RateLimited { body }
            }
            ResponseKind::Forbidden => {
                error!("the Olarm API rejected the key -- update the API key");
                Error::Forbidden { body }
            }
            ResponseKind::UpstreamUnavailable => {
                error!("the Olarm API is unavailable: gateway up, no response behind it");
                Error::UpstreamUnavailable { body }
            }
            ResponseKind::Other => {
                error!(body, "the Olarm API returned text instead of JSON");
                Error::UnexpectedBody { body }
            }
        }
    }
}

// ── DeviceClient (device scope) ─────────────────────────────────────

/// API access for one physical panel.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    conn: Connection,
    device_id: String,
    device_name: String,
}

impl DeviceClient {
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// The credential-scoped connection this client was built from.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// `GET /devices/{id}` -- the full device payload
    /// (`deviceState` + `deviceProfile`), kept raw for the decoders.
    pub async fn device_state(&self) -> Result<RawDevice, Error> {
        let url = self.conn.endpoint(&format!("devices/{}", self.device_id))?;
        let json = self.conn.get_json(url).await.map_err(|e| {
            error!(device = %self.device_name, error = %e, "device state fetch failed");
            e
        })?;
        Ok(RawDevice(json))
    }

    /// `GET /devices/{id}/actions` -- who last changed `area`'s arm state.
    ///
    /// Best-effort by design: rate limiting, missing history (404), and
    /// malformed bodies all yield the running default (`"No User"`).
    /// Bypass/PGM/ukey actions are not arm-state changes and are skipped.
    pub async fn last_change(&self, area: u32) -> ChangeRecord {
        let mut record = ChangeRecord::no_user();

        if !self.conn.limiter.acquire().await {
            return record;
        }

        let url = match self.conn.endpoint(&format!("devices/{}/actions", self.device_id)) {
            Ok(url) => url,
            Err(e) => {
                error!(device = %self.device_name, error = %e, "bad actions URL");
                return record;
            }
        };

        debug!(%url, "GET action history");
        let resp = match self.conn.http.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!(device = %self.device_name, error = %e, "action history fetch failed");
                return record;
            }
        };

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            // Absence of history is not a failure.
            self.conn.limiter.record_success();
            warn!(device = %self.device_name, "Olarm has no saved history for this device");
            return record;
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            self.conn.limiter.record_rate_limited();
            error!(device = %self.device_name, "actions endpoint rate limited, backing off");
            return record;
        }

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                error!(device = %self.device_name, error = %e, "failed reading action history body");
                return record;
            }
        };

        match serde_json::from_str::<Vec<Value>>(&body) {
            Ok(actions) => {
                self.conn.limiter.record_success();
                for action in &actions {
                    if let Some(candidate) = arm_state_change(action, area) {
                        if candidate.action_created > record.action_created {
                            record = candidate;
                        }
                    }
                }
            }
            Err(_) => {
                error!(
                    device = %self.device_name,
                    %status,
                    body,
                    "the actions endpoint returned text instead of JSON"
                );
            }
        }

        if record.action_created > 0 {
            record.formatted = format_unix_seconds(record.action_created);
        }
        record
    }

    /// `POST /devices/{id}/actions` -- send one control action.
    ///
    /// `true` iff the response JSON's `actionStatus` equals `"ok"`
    /// case-insensitively. A parseable response counts as limiter success
    /// regardless of the business-level verdict; the limiter only cares
    /// about transport throttling.
    pub async fn send_action(&self, action: &Action) -> bool {
        if !self.conn.limiter.acquire().await {
            error!(
                device = %self.device_name,
                cmd = %action.action_cmd,
                "cannot send action, rate limited -- try again next cycle"
            );
            return false;
        }

        let url = match self.conn.endpoint(&format!("devices/{}/actions", self.device_id)) {
            Ok(url) => url,
            Err(e) => {
                error!(device = %self.device_name, error = %e, "bad actions URL");
                return false;
            }
        };

        debug!(cmd = %action.action_cmd, num = action.action_num, "POST action");
        let resp = match self.conn.http.post(url).json(action).send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!(
                    device = %self.device_name,
                    cmd = %action.action_cmd,
                    error = %e,
                    "could not send action"
                );
                return false;
            }
        };

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            self.conn.limiter.record_rate_limited();
            error!(device = %self.device_name, "action rate limited (429), backing off");
            return false;
        }

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                error!(device = %self.device_name, error = %e, "failed reading action response");
                return false;
            }
        };

        match serde_json::from_str::<Value>(&body) {
            Ok(json) => {
                self.conn.limiter.record_success();
                let ok = json
                    .get("actionStatus")
                    .and_then(Value::as_str)
                    .is_some_and(|s| s.eq_ignore_ascii_case("ok"));
                if !ok {
                    error!(
                        device = %self.device_name,
                        cmd = %action.action_cmd,
                        msg = %json.get("actionMsg").and_then(serde_json::Value::as_str).unwrap_or("unknown"),
                        "the Olarm API rejected the action"
                    );
                }
                ok
            }
            Err(_) => {
                if classify(status, &body) == ResponseKind::RateLimited {
                    self.conn.limiter.record_rate_limited();
                }
                error!(
                    device = %self.device_name,
                    cmd = %action.action_cmd,
                    body,
                    "non-JSON response to action"
                );
                false
            }
        }
    }
}

/// Interpret one action-history entry as an arm-state change for `area`.
///
/// Auxiliary commands (bypass, PGM, ukey) are filtered out; commands the
/// crate does not know are kept, matching the vendor's open-ended
/// vocabulary. Returns `None` when the entry is for another area or is
/// not an arm-state change.
fn arm_state_change(action: &Value, area: u32) -> Option<ChangeRecord> {
    let cmd = action.get("actionCmd").and_then(Value::as_str);
    if let Some(cmd) = cmd {
        if let Ok(known) = serde_json::from_value::<ActionCmd>(Value::String(cmd.to_owned())) {
            if known.is_auxiliary() {
                return None;
            }
        }
    }

    let num = action.get("actionNum").and_then(value_as_i64)?;
    if num != i64::from(area) {
        return None;
    }

    let created = action.get("actionCreated").and_then(value_as_i64)?;
    Some(ChangeRecord {
        user_fullname: action
            .get("userFullname")
            .and_then(Value::as_str)
            .unwrap_or("No User")
            .to_owned(),
        action_created: created,
        action_cmd: cmd.map(str::to_owned),
        formatted: None,
    })
}
