// Pure decoders: raw device JSON → typed record lists.
//
// The vendor encodes per-zone state as character arrays ("a" = active,
// "b" = bypassed), PGM configuration as bit-position strings, and power
// as either a structured map or legacy "ok"-string fields. Zone count is
// always driven by the profile's limit, never by the length of the raw
// arrays -- arrays may be shorter than the limit, and out-of-range
// indices default to inactive/unnamed.
//
// Failure policy: a missing or malformed *field* inside one record gets
// the documented default and a log line; an *entry of uninterpretable
// type* aborts that list's decode and returns the partial list
// accumulated so far. Nothing here performs I/O or returns an error to
// the caller.

use chrono::{Duration, Local, TimeZone};
use serde_json::Value;
use tracing::{error, warn};

use crate::models::{
    BypassRecord, PanelAreaRecord, PgmRecord, RawDevice, UtilityKeyRecord, ZoneRecord, ZoneState,
    ZONE_TYPE_AC_POWER, ZONE_TYPE_BATTERY,
};

/// Display format used for every decoded timestamp, e.g.
/// `Mon 01 Jan 2024 13:45:07`.
const STAMP_FORMAT: &str = "%a %d %b %Y %H:%M:%S";

/// The bypass endpoint's stamps lag two hours behind wall clock
/// (vendor quirk); the zone endpoint's do not.
const BYPASS_STAMP_OFFSET_HOURS: i64 = 2;

// ── Entry-level abort ───────────────────────────────────────────────

/// An array entry whose type cannot be interpreted at all. Fails that
/// list fast, keeping whatever decoded before it.
#[derive(Debug)]
struct BadEntry {
    field: &'static str,
    index: usize,
}

impl std::fmt::Display for BadEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}] has an uninterpretable type", self.field, self.index)
    }
}

// ── Zones ───────────────────────────────────────────────────────────

/// Decode the active state of every configured zone, appending synthetic
/// power records after the zone loop.
pub fn zone_records(raw: &RawDevice) -> Vec<ZoneRecord> {
    let state = raw.state();
    let profile = raw.profile();

    let zones_limit = limit_field(profile, "zonesLimit").unwrap_or(0);
    let status = array_field(state, "zones");
    let stamps = array_field(state, "zonesStamp");
    let labels = array_field(profile, "zonesLabels");
    let types = array_field(profile, "zonesTypes");

    let mut records = Vec::with_capacity(zones_limit);

    for i in 0..zones_limit {
        let state = match status_char_is(status, "zones", i, "a") {
            Ok(on) => ZoneState::from_bool(on),
            Err(bad) => {
                error!(%bad, "aborting zone decode, returning partial list");
                return records;
            }
        };

        records.push(ZoneRecord {
            name: label_or(labels, i, || format!("Zone {}", i + 1)),
            state,
            last_changed: stamps.get(i).and_then(|v| format_stamp_millis(v, 0)),
            zone_type: types.get(i).and_then(value_as_i64).unwrap_or(0),
            zone_number: i,
        });
    }

    // Power entries continue the zone numbering. The counter starts at the
    // limit explicitly, so a zero-zone panel still numbers them from 0.
    let mut number = zones_limit;
    for (key, on) in power_sources(state) {
        let (name, zone_type) = if key == "Batt" {
            ("Powered by Battery".to_owned(), ZONE_TYPE_BATTERY)
        } else {
            (format!("Powered by {key}"), ZONE_TYPE_AC_POWER)
        };

        records.push(ZoneRecord {
            name,
            state: ZoneState::from_bool(on),
            last_changed: None,
            zone_type,
            zone_number: number,
        });
        number += 1;
    }

    records
}

/// Power sources as `(key, is_on)` pairs.
///
/// Prefers the structured `power` map; falls back to synthesizing `AC` and
/// `Batt` entries from the legacy `powerAC`/`powerBattery` string fields
/// (`"ok"` means powered).
fn power_sources(state: &Value) -> Vec<(String, bool)> {
    if let Some(map) = state.get("power").and_then(Value::as_object) {
        if !map.is_empty() {
            return map
                .iter()
                .map(|(key, value)| {
                    let on = value_as_i64(value).unwrap_or_else(|| {
                        warn!(key, "malformed power value, treating as off");
                        0
                    }) == 1;
                    (key.clone(), on)
                })
                .collect();
        }
    }

    if state.get("powerAC").is_some() {
        let ok = |field: &str| state.get(field).and_then(Value::as_str) == Some("ok");
        return vec![("AC".to_owned(), ok("powerAC")), ("Batt".to_owned(), ok("powerBattery"))];
    }

    Vec::new()
}

// ── Bypass ──────────────────────────────────────────────────────────

/// Decode the bypass bit of every configured zone. Mirrors
/// [`zone_records`] but checks for `"b"` and applies the two-hour stamp
/// correction; no power entries, no type codes.
pub fn bypass_records(raw: &RawDevice) -> Vec<BypassRecord> {
    let state = raw.state();
    let profile = raw.profile();

    let zones_limit = limit_field(profile, "zonesLimit").unwrap_or(0);
    let status = array_field(state, "zones");
    let stamps = array_field(state, "zonesStamp");
    let labels = array_field(profile, "zonesLabels");

    let mut records = Vec::with_capacity(zones_limit);

    for i in 0..zones_limit {
        let state = match status_char_is(status, "zones", i, "b") {
            Ok(on) => ZoneState::from_bool(on),
            Err(bad) => {
                error!(%bad, "aborting bypass decode, returning partial list");
                return records;
            }
        };

        records.push(BypassRecord {
            name: label_or(labels, i, || format!("Zone {}", i + 1)),
            state,
            last_changed: stamps
                .get(i)
                .and_then(|v| format_stamp_millis(v, BYPASS_STAMP_OFFSET_HOURS)),
            zone_number: i,
        });
    }

    records
}

// ── Panel areas ─────────────────────────────────────────────────────

/// Decode the arm state of each panel area.
///
/// Count comes from `areasLimit`, or the label array when the limit is
/// absent. Areas beyond the raw status array are skipped entirely rather
/// than emitted with a placeholder state.
pub fn panel_area_records(raw: &RawDevice) -> Vec<PanelAreaRecord> {
    let state = raw.state();
    let profile = raw.profile();

    let labels = array_field(profile, "areasLabels");
    let count = limit_field(profile, "areasLimit").unwrap_or(labels.len());
    let statuses = array_field(state, "areas");

    let mut records = Vec::with_capacity(count.min(statuses.len()));

    for i in 0..count {
        let Some(status) = statuses.get(i) else {
            continue;
        };
        let Some(area_state) = status.as_str() else {
            warn!(index = i, "non-string area state, skipping area");
            continue;
        };

        // Unlike zones, an empty area label is replaced by the default.
        let name = match labels.get(i).and_then(Value::as_str) {
            Some(label) if !label.is_empty() => label.to_owned(),
            _ => format!("Area {}", i + 1),
        };

        records.push(PanelAreaRecord {
            name,
            state: area_state.to_owned(),
            area_number: i + 1,
        });
    }

    records
}

// ── PGMs ────────────────────────────────────────────────────────────

/// Decode the programmable outputs.
///
/// An empty setup-control string means the PGM is not configured in the
/// vendor app: it is skipped, not emitted as disabled. Setup string bits:
/// position 0 = enabled, position 2 = pulse-capable.
pub fn pgm_records(raw: &RawDevice) -> Vec<PgmRecord> {
    let profile = raw.profile();
    if !profile.is_object() {
        return Vec::new();
    }

    let labels = array_field(profile, "pgmLabels");
    let setup = array_field(profile, "pgmControl");
    let status = array_field(raw.state(), "pgm");

    let limit = match limit_field(profile, "pgmLimit") {
        Some(0) | None => labels.len(),
        Some(n) => n,
    };

    let mut records = Vec::with_capacity(limit);

    for i in 0..limit {
        let setup_str = match setup.get(i) {
            Some(Value::String(s)) => s.as_str(),
            Some(Value::Null) | None => "",
            Some(_) => {
                let bad = BadEntry { field: "pgmControl", index: i };
                error!(%bad, "aborting PGM decode, returning partial list");
                return records;
            }
        };
        if setup_str.is_empty() {
            continue;
        }

        let state = match status_char_is(status, "pgm", i, "a") {
            Ok(on) => ZoneState::from_bool(on),
            Err(bad) => {
                error!(%bad, "aborting PGM decode, returning partial list");
                return records;
            }
        };

        let name = match labels.get(i).and_then(Value::as_str) {
            Some(label) if !label.is_empty() => label.to_owned(),
            _ => format!("PGM {}", i + 1),
        };

        records.push(PgmRecord {
            name,
            enabled: setup_str.chars().next() == Some('1'),
            pulse_capable: setup_str.chars().nth(2) == Some('1'),
            state,
            pgm_number: i + 1,
        });
    }

    records
}

// ── Utility keys ────────────────────────────────────────────────────

/// Decode the virtual utility keys.
///
/// Requires all three of `ukeysLabels`, `ukeysLimit`, and `ukeysControl`
/// in the profile; if any is absent the whole list is empty -- no partial
/// decode from a half-configured profile.
pub fn utility_key_records(raw: &RawDevice) -> Vec<UtilityKeyRecord> {
    let profile = raw.profile();

    let (Some(labels), Some(limit), Some(control)) = (
        profile.get("ukeysLabels"),
        profile.get("ukeysLimit"),
        profile.get("ukeysControl"),
    ) else {
        return Vec::new();
    };

    let Some(limit) = limit.as_u64() else {
        warn!("malformed ukeysLimit, skipping utility keys");
        return Vec::new();
    };
    let labels = labels.as_array().map(Vec::as_slice).unwrap_or(&[]);
    let control = control.as_array().map(Vec::as_slice).unwrap_or(&[]);

    #[allow(clippy::cast_possible_truncation)]
    let limit = limit as usize;
    let mut records = Vec::with_capacity(limit);

    for i in 0..limit {
        let Some(value) = control.get(i).and_then(value_as_i64) else {
            let bad = BadEntry { field: "ukeysControl", index: i };
            error!(%bad, "aborting utility-key decode, returning partial list");
            return records;
        };

        let name = match labels.get(i).and_then(Value::as_str) {
            Some(label) if !label.is_empty() => label.to_owned(),
            _ => format!("Ukey {}", i + 1),
        };

        records.push(UtilityKeyRecord {
            name,
            state: ZoneState::from_bool(value == 1),
            key_number: i + 1,
        });
    }

    records
}

// ── Alarm triggers ──────────────────────────────────────────────────

/// Raw passthrough of `areasDetail`: per-area detail of the zones that
/// triggered an alarm. No transformation.
pub fn alarm_triggers(raw: &RawDevice) -> Vec<Value> {
    raw.state()
        .get("areasDetail")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

// ── Field helpers ───────────────────────────────────────────────────

/// An array field, or an empty slice when absent or not an array.
fn array_field<'a>(container: &'a Value, key: &str) -> &'a [Value] {
    container
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// A non-negative integer limit field. Malformed values log and count as
/// absent.
fn limit_field(container: &Value, key: &str) -> Option<usize> {
    let value = container.get(key)?;
    match value.as_u64() {
        #[allow(clippy::cast_possible_truncation)]
        Some(n) => Some(n as usize),
        None => {
            warn!(key, %value, "malformed limit field, treating as absent");
            None
        }
    }
}

/// Whether the status character at `index` equals `expected`
/// (case-insensitive). Out-of-range and null both mean "no".
fn status_char_is(
    status: &[Value],
    field: &'static str,
    index: usize,
    expected: &str,
) -> Result<bool, BadEntry> {
    match status.get(index) {
        Some(Value::String(s)) => Ok(s.eq_ignore_ascii_case(expected)),
        Some(Value::Null) | None => Ok(false),
        Some(_) => Err(BadEntry { field, index }),
    }
}

/// The label at `index`, or the fallback. An explicit empty-string label
/// is accepted as the name, not replaced.
fn label_or(labels: &[Value], index: usize, fallback: impl FnOnce() -> String) -> String {
    match labels.get(index) {
        Some(Value::String(s)) => s.clone(),
        _ => fallback(),
    }
}

/// Lenient integer extraction: JSON numbers (truncating floats) and
/// numeric strings both count.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ── Timestamp formatting ────────────────────────────────────────────

/// Format a milliseconds-since-epoch stamp as a local display string,
/// shifted by `offset_hours`. Any parse failure yields `None`.
fn format_stamp_millis(value: &Value, offset_hours: i64) -> Option<String> {
    let millis = value_as_i64(value)?;
    let stamp = Local.timestamp_millis_opt(millis).single()? + Duration::hours(offset_hours);
    Some(stamp.format(STAMP_FORMAT).to_string())
}

/// Format a seconds-since-epoch stamp as a local display string.
/// Used for the action-history `actionCreated` field.
pub(crate) fn format_unix_seconds(secs: i64) -> Option<String> {
    let stamp = Local.timestamp_opt(secs, 0).single()?;
    Some(stamp.format(STAMP_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn device(state: Value, profile: Value) -> RawDevice {
        RawDevice(json!({ "deviceState": state, "deviceProfile": profile }))
    }

    // ── Zones ───────────────────────────────────────────────────────

    #[test]
    fn zone_states_from_character_array() {
        let raw = device(
            json!({ "zones": ["A", "a", "b"] }),
            json!({ "zonesLimit": 3, "zonesLabels": ["Front Door", "Kitchen", "Garage"] }),
        );

        let zones = zone_records(&raw);
        assert_eq!(zones.len(), 3);
        assert_eq!(zones[0].state, ZoneState::On);
        assert_eq!(zones[1].state, ZoneState::On);
        assert_eq!(zones[2].state, ZoneState::Off);
        assert_eq!(zones[0].name, "Front Door");
        assert_eq!(zones[0].zone_number, 0);
    }

    #[test]
    fn bypass_reads_the_b_character() {
        let raw = device(
            json!({ "zones": ["A", "a", "b"] }),
            json!({ "zonesLimit": 3 }),
        );

        let bypass = bypass_records(&raw);
        assert_eq!(bypass[0].state, ZoneState::Off);
        assert_eq!(bypass[1].state, ZoneState::Off);
        assert_eq!(bypass[2].state, ZoneState::On);
    }

    #[test]
    fn zone_count_follows_limit_not_array_length() {
        let raw = device(
            json!({ "zones": ["a"] }),
            json!({ "zonesLimit": 4, "zonesLabels": ["Hall"] }),
        );

        let zones = zone_records(&raw);
        assert_eq!(zones.len(), 4);
        assert_eq!(zones[0].state, ZoneState::On);
        assert_eq!(zones[3].state, ZoneState::Off);
        assert_eq!(zones[1].name, "Zone 2");
        assert_eq!(zones[3].name, "Zone 4");
    }

    #[test]
    fn explicit_empty_label_is_kept() {
        let raw = device(
            json!({ "zones": [] }),
            json!({ "zonesLimit": 2, "zonesLabels": ["", "Patio"] }),
        );

        let zones = zone_records(&raw);
        assert_eq!(zones[0].name, "");
        assert_eq!(zones[1].name, "Patio");
    }

    #[test]
    fn zone_type_defaults_to_zero() {
        let raw = device(
            json!({}),
            json!({ "zonesLimit": 2, "zonesTypes": [21] }),
        );

        let zones = zone_records(&raw);
        assert_eq!(zones[0].zone_type, 21);
        assert_eq!(zones[1].zone_type, 0);
    }

    #[test]
    fn malformed_stamp_yields_none() {
        let raw = device(
            json!({ "zones": ["a"], "zonesStamp": ["not-a-number"] }),
            json!({ "zonesLimit": 1 }),
        );

        assert_eq!(zone_records(&raw)[0].last_changed, None);
    }

    #[test]
    fn valid_stamp_is_formatted() {
        let raw = device(
            json!({ "zones": ["a"], "zonesStamp": [1_700_000_000_000_i64] }),
            json!({ "zonesLimit": 1 }),
        );

        let changed = zone_records(&raw)[0].last_changed.clone();
        assert!(changed.is_some());
        // Weekday + zero-padded day + month + year + time.
        assert_eq!(changed.expect("stamp").len(), "Tue 14 Nov 2023 22:13:20".len());
    }

    #[test]
    fn uninterpretable_status_entry_aborts_with_partial_list() {
        let raw = device(
            json!({ "zones": ["a", { "weird": true }, "a"] }),
            json!({ "zonesLimit": 3 }),
        );

        let zones = zone_records(&raw);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].state, ZoneState::On);
    }

    // ── Power ───────────────────────────────────────────────────────

    #[test]
    fn structured_power_map_appends_after_zones() {
        let raw = device(
            json!({ "zones": ["a"], "power": { "AC": 1, "Batt": 0 } }),
            json!({ "zonesLimit": 1 }),
        );

        let zones = zone_records(&raw);
        assert_eq!(zones.len(), 3);

        let ac = &zones[1];
        assert_eq!(ac.name, "Powered by AC");
        assert_eq!(ac.state, ZoneState::On);
        assert_eq!(ac.zone_type, ZONE_TYPE_AC_POWER);
        assert_eq!(ac.zone_number, 1);

        let batt = &zones[2];
        assert_eq!(batt.name, "Powered by Battery");
        assert_eq!(batt.state, ZoneState::Off);
        assert_eq!(batt.zone_type, ZONE_TYPE_BATTERY);
        assert_eq!(batt.zone_number, 2);
    }

    #[test]
    fn legacy_power_fields_are_synthesized() {
        let raw = device(
            json!({ "powerAC": "ok", "powerBattery": "low" }),
            json!({ "zonesLimit": 0 }),
        );

        let zones = zone_records(&raw);
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].name, "Powered by AC");
        assert_eq!(zones[0].state, ZoneState::On);
        assert_eq!(zones[0].zone_type, ZONE_TYPE_AC_POWER);
        // Counter starts at the (zero) zone limit, not a leaked loop index.
        assert_eq!(zones[0].zone_number, 0);
        assert_eq!(zones[1].name, "Powered by Battery");
        assert_eq!(zones[1].state, ZoneState::Off);
        assert_eq!(zones[1].zone_type, ZONE_TYPE_BATTERY);
        assert_eq!(zones[1].zone_number, 1);
    }

    #[test]
    fn no_power_fields_means_no_power_records() {
        let raw = device(json!({ "zones": [] }), json!({ "zonesLimit": 1 }));
        assert_eq!(zone_records(&raw).len(), 1);
    }

    // ── Bypass stamps ───────────────────────────────────────────────

    #[test]
    fn bypass_stamp_is_shifted_two_hours() {
        let millis = 1_700_000_000_000_i64;
        let raw = device(
            json!({ "zones": ["b"], "zonesStamp": [millis] }),
            json!({ "zonesLimit": 1 }),
        );

        let zone_stamp = zone_records(&raw)[0].last_changed.clone().expect("stamp");
        let bypass_stamp = bypass_records(&raw)[0].last_changed.clone().expect("stamp");
        assert_ne!(zone_stamp, bypass_stamp);
        assert_eq!(
            bypass_stamp,
            (Local.timestamp_millis_opt(millis).single().expect("valid") + Duration::hours(2))
                .format(STAMP_FORMAT)
                .to_string()
        );
    }

    // ── Panel areas ─────────────────────────────────────────────────

    #[test]
    fn areas_beyond_status_array_are_skipped() {
        let raw = device(
            json!({ "areas": ["arm"] }),
            json!({ "areasLimit": 2, "areasLabels": ["House", "Flat"] }),
        );

        let areas = panel_area_records(&raw);
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].name, "House");
        assert_eq!(areas[0].state, "arm");
        assert_eq!(areas[0].area_number, 1);
    }

    #[test]
    fn area_count_falls_back_to_label_length() {
        let raw = device(
            json!({ "areas": ["disarm", "stay"] }),
            json!({ "areasLabels": ["House", ""] }),
        );

        let areas = panel_area_records(&raw);
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[1].name, "Area 2");
        assert_eq!(areas[1].state, "stay");
        assert_eq!(areas[1].area_number, 2);
    }

    // ── PGMs ────────────────────────────────────────────────────────

    #[test]
    fn empty_setup_string_skips_the_pgm() {
        let raw = device(
            json!({ "pgm": ["a", "x", "a"] }),
            json!({
                "pgmLimit": 3,
                "pgmLabels": ["Gate", "Unused", "Pool Pump"],
                "pgmControl": ["101", "", "111"],
            }),
        );

        let pgms = pgm_records(&raw);
        assert_eq!(pgms.len(), 2);
        assert_eq!(pgms[0].name, "Gate");
        assert_eq!(pgms[0].pgm_number, 1);
        assert_eq!(pgms[1].name, "Pool Pump");
        assert_eq!(pgms[1].pgm_number, 3);
    }

    #[test]
    fn null_setup_entry_skips_the_pgm() {
        let raw = device(
            json!({ "pgm": ["a", "a", "a"] }),
            json!({
                "pgmLimit": 3,
                "pgmLabels": ["Gate", "Unused", "Pool Pump"],
                "pgmControl": [null, "111", null],
            }),
        );

        let pgms = pgm_records(&raw);
        assert_eq!(pgms.len(), 1);
        assert_eq!(pgms[0].name, "Unused");
        assert_eq!(pgms[0].pgm_number, 2);
    }

    #[test]
    fn setup_string_bits_drive_enabled_and_pulse() {
        let raw = device(
            json!({ "pgm": ["A", "x"] }),
            json!({ "pgmLimit": 2, "pgmControl": ["101", "010"] }),
        );

        let pgms = pgm_records(&raw);
        assert!(pgms[0].enabled);
        assert!(pgms[0].pulse_capable);
        assert_eq!(pgms[0].state, ZoneState::On);
        assert_eq!(pgms[0].name, "PGM 1");

        assert!(!pgms[1].enabled);
        assert!(!pgms[1].pulse_capable);
        assert_eq!(pgms[1].state, ZoneState::Off);
    }

    #[test]
    fn pgm_limit_zero_uses_label_length() {
        let raw = device(
            json!({}),
            json!({ "pgmLimit": 0, "pgmLabels": ["Gate"], "pgmControl": ["100"] }),
        );

        assert_eq!(pgm_records(&raw).len(), 1);
    }

    #[test]
    fn missing_profile_means_no_pgms() {
        let raw = RawDevice(json!({ "deviceState": { "pgm": ["a"] } }));
        assert!(pgm_records(&raw).is_empty());
    }

    // ── Utility keys ────────────────────────────────────────────────

    #[test]
    fn missing_control_array_disables_ukeys_entirely() {
        let raw = device(
            json!({}),
            json!({ "ukeysLimit": 2, "ukeysLabels": ["Gate Key", "Door Key"] }),
        );

        assert!(utility_key_records(&raw).is_empty());
    }

    #[test]
    fn ukey_state_is_an_integer_compare() {
        let raw = device(
            json!({}),
            json!({
                "ukeysLimit": 3,
                "ukeysLabels": ["Gate Key", "", "Siren"],
                "ukeysControl": [1, 0, 1],
            }),
        );

        let ukeys = utility_key_records(&raw);
        assert_eq!(ukeys.len(), 3);
        assert_eq!(ukeys[0].state, ZoneState::On);
        assert_eq!(ukeys[1].state, ZoneState::Off);
        assert_eq!(ukeys[1].name, "Ukey 2");
        assert_eq!(ukeys[2].key_number, 3);
    }

    #[test]
    fn short_control_array_aborts_with_partial_list() {
        let raw = device(
            json!({}),
            json!({ "ukeysLimit": 3, "ukeysLabels": ["A", "B", "C"], "ukeysControl": [1] }),
        );

        let ukeys = utility_key_records(&raw);
        assert_eq!(ukeys.len(), 1);
        assert_eq!(ukeys[0].name, "A");
    }

    // ── Triggers ────────────────────────────────────────────────────

    #[test]
    fn alarm_triggers_pass_through_untouched() {
        let raw = device(
            json!({ "areasDetail": [{ "triggeredZones": [3, 7] }, {}] }),
            json!({}),
        );

        let triggers = alarm_triggers(&raw);
        assert_eq!(triggers.len(), 2);
        assert_eq!(triggers[0]["triggeredZones"][1], 7);
    }

    #[test]
    fn missing_detail_yields_empty_triggers() {
        let raw = RawDevice(json!({}));
        assert!(alarm_triggers(&raw).is_empty());
    }
}
