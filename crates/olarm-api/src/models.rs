// Wire shapes and decoded record types.
//
// The device payload itself is kept as loose JSON (`RawDevice`): the
// vendor omits, null-fills, and occasionally retypes fields, so the
// decoders in `decode` work over `serde_json::Value` with explicit
// defaults rather than a strict struct that would reject whole payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Zone type codes ─────────────────────────────────────────────────

/// Synthetic zone type for a mains-power record.
pub const ZONE_TYPE_AC_POWER: i64 = 1000;

/// Synthetic zone type for a battery record.
pub const ZONE_TYPE_BATTERY: i64 = 1001;

// ── Wire types ──────────────────────────────────────────────────────

/// One entry of `GET /devices`.
///
/// Only `deviceId` is required; everything else is best-effort because the
/// vendor trims fields depending on panel model and firmware.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSummary {
    pub device_id: String,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub device_serial: Option<String>,
    #[serde(default)]
    pub device_alarm_type: Option<String>,
    #[serde(default)]
    pub device_status: Option<String>,
}

impl DeviceSummary {
    /// Display name, falling back to the device id.
    pub fn display_name(&self) -> &str {
        self.device_name.as_deref().unwrap_or(&self.device_id)
    }
}

/// The full device payload from `GET /devices/{id}`, held as raw JSON.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawDevice(pub Value);

impl RawDevice {
    /// The `deviceState` object, or `Null` when absent.
    pub fn state(&self) -> &Value {
        self.0.get("deviceState").unwrap_or(&Value::Null)
    }

    /// The `deviceProfile` object, or `Null` when absent.
    pub fn profile(&self) -> &Value {
        self.0.get("deviceProfile").unwrap_or(&Value::Null)
    }

    /// The vendor-reported device name, if present.
    pub fn device_name(&self) -> Option<&str> {
        self.0.get("deviceName").and_then(Value::as_str)
    }
}

// ── Decoded records ─────────────────────────────────────────────────

/// Binary state shared by zones, PGMs, and utility keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneState {
    On,
    Off,
}

impl ZoneState {
    pub fn is_on(self) -> bool {
        self == Self::On
    }

    pub fn from_bool(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl std::fmt::Display for ZoneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// One monitored input point, or a synthetic power entry appended after
/// the configured zones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneRecord {
    pub name: String,
    pub state: ZoneState,
    pub last_changed: Option<String>,
    /// Vendor zone type code; 0 when unset, 1000/1001 for synthetic
    /// power/battery records.
    pub zone_type: i64,
    /// 0-based position, continuing through the power entries.
    pub zone_number: usize,
}

/// The bypass view of a zone: same underlying per-zone character, reading
/// the bypass bit instead of the active bit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BypassRecord {
    pub name: String,
    pub state: ZoneState,
    pub last_changed: Option<String>,
    pub zone_number: usize,
}

/// One independently armable partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelAreaRecord {
    pub name: String,
    /// Vendor area-state string (`disarm`, `arm`, `stay`, `sleep`,
    /// `alarm`, `countdown`, ...) passed through untransformed.
    pub state: String,
    /// 1-based area number, as the actions endpoint expects.
    pub area_number: usize,
}

/// One programmable output relay. Unconfigured PGMs (empty setup string)
/// are skipped during decoding, not emitted as disabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PgmRecord {
    pub name: String,
    pub enabled: bool,
    pub pulse_capable: bool,
    pub state: ZoneState,
    /// 1-based PGM number.
    pub pgm_number: usize,
}

/// One virtual utility key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilityKeyRecord {
    pub name: String,
    pub state: ZoneState,
    /// 1-based key number.
    pub key_number: usize,
}

/// Everything decoded from one device-state fetch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceSnapshot {
    pub zones: Vec<ZoneRecord>,
    pub bypass: Vec<BypassRecord>,
    pub panel_areas: Vec<PanelAreaRecord>,
    pub pgms: Vec<PgmRecord>,
    pub utility_keys: Vec<UtilityKeyRecord>,
    /// Raw `areasDetail` passthrough: per-area detail of the zones that
    /// triggered an alarm.
    pub triggers: Vec<Value>,
}

/// Who last changed an area's arm state, from the action history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRecord {
    pub user_fullname: String,
    /// Unix seconds of the action; 0 for the default record.
    pub action_created: i64,
    pub action_cmd: Option<String>,
    /// Local display form of `action_created`, when it parsed.
    pub formatted: Option<String>,
}

impl ChangeRecord {
    /// The default record returned when no history exists (or none could
    /// be fetched).
    pub fn no_user() -> Self {
        Self {
            user_fullname: "No User".to_owned(),
            action_created: 0,
            action_cmd: None,
            formatted: None,
        }
    }
}

impl Default for ChangeRecord {
    fn default() -> Self {
        Self::no_user()
    }
}

/// Result of a credential check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthCheck {
    pub success: bool,
    pub error: Option<String>,
}
