// Canonical charger status and response normalization.
//
// The vendor returns three body shapes depending on deployment and
// endpoint: a JSON status object, a JSON array of pairing records, and
// comma-joined `key:value` text. Shape detection happens once, up front;
// every branch funnels into the same field map so downstream consumers
// only ever see `ChargerStatus`. Missing or malformed vendor fields
// resolve to documented defaults -- a half-broken payload degrades
// per-field, it does not fail the fetch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

// ── Canonical types ─────────────────────────────────────────────────

/// Connector/charging state, decoded from the vendor's numeric code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChargeState {
    Disconnected,
    ConnectedNotCharging,
    ConnectedCharging,
    Error,
    Paused,
    Unknown,
}

impl ChargeState {
    /// Decode the vendor state code. Codes outside the documented table
    /// (the vendor uses 99 as an explicit sentinel) map to `Unknown`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Disconnected,
            1 => Self::ConnectedNotCharging,
            2 => Self::ConnectedCharging,
            3 => Self::Error,
            4 => Self::Paused,
            _ => Self::Unknown,
        }
    }

    pub fn is_charging(self) -> bool {
        self == Self::ConnectedCharging
    }
}

/// Normalized snapshot of charger telemetry.
///
/// The only status type consumers ever read -- raw vendor shapes never
/// leave this module. Immutable once constructed; the coordinator swaps
/// whole instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargerStatus {
    /// Instantaneous charge power, watts.
    pub charge_power: f64,
    /// Energy delivered this charge, watt-hours.
    pub charge_energy: f64,
    /// Energy delivered this session, watt-hours.
    pub session_energy: f64,
    /// Lifetime energy counter, watt-hours.
    pub total_energy: f64,
    pub charge_state: ChargeState,
    /// Active charging current, amperes.
    pub charge_current: u8,
    /// Configured charging intensity, amperes.
    pub intensity: u8,
    pub max_intensity: u8,
    pub min_intensity: u8,
    /// Supply voltage, volts.
    pub voltage: f64,
    /// Charger internal temperature, degrees Celsius.
    pub temperature: f64,
    /// WiFi signal strength, dBm.
    pub wifi_signal: i32,
    /// Duration of the current session, minutes.
    pub session_time: u32,
    pub firmware_version: String,
    pub dynamic_power: bool,
    pub paused: bool,
    pub locked: bool,
    /// Vendor-reported timestamp, opaque. Empty when not provided.
    pub last_updated: String,
    /// The intermediate key/value map, retained only when the wire format
    /// required speculative text parsing. Diagnostics only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub raw_data: Option<BTreeMap<String, String>>,
}

impl Default for ChargerStatus {
    fn default() -> Self {
        Self {
            charge_power: 0.0,
            charge_energy: 0.0,
            session_energy: 0.0,
            total_energy: 0.0,
            charge_state: ChargeState::Unknown,
            charge_current: 0,
            intensity: 6,
            max_intensity: 32,
            min_intensity: 6,
            voltage: 230.0,
            temperature: 0.0,
            wifi_signal: -50,
            session_time: 0,
            firmware_version: "Unknown".to_owned(),
            dynamic_power: false,
            paused: false,
            locked: false,
            last_updated: String::new(),
            raw_data: None,
        }
    }
}

/// Identity of a paired charger, fetched once at setup/reauth time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Stable vendor identifier; the unique key for the whole instance.
    pub device_id: String,
    pub name: String,
    pub serial_number: String,
}

// ── Field map ───────────────────────────────────────────────────────
// Vendor field aliases per canonical field, in priority order. The
// gateway's text payloads and the REST deployment's JSON disagree on
// naming, so every lookup walks its alias list.

const CHARGE_POWER_KEYS: &[&str] = &["charge_power", "ev_power", "power"];
const CHARGE_ENERGY_KEYS: &[&str] = &["charge_energy", "energy"];
const SESSION_ENERGY_KEYS: &[&str] = &["session_energy"];
const TOTAL_ENERGY_KEYS: &[&str] = &["total_energy"];
const CHARGE_STATE_KEYS: &[&str] = &["charge_state", "status", "state"];
const CHARGE_CURRENT_KEYS: &[&str] = &["charge_current", "current", "intensity"];
const INTENSITY_KEYS: &[&str] = &["intensity"];
const MAX_INTENSITY_KEYS: &[&str] = &["max_intensity", "maxIntensity"];
const MIN_INTENSITY_KEYS: &[&str] = &["min_intensity", "minIntensity"];
const VOLTAGE_KEYS: &[&str] = &["voltage"];
const TEMPERATURE_KEYS: &[&str] = &["temperature"];
const WIFI_SIGNAL_KEYS: &[&str] = &["wifi_signal", "signal"];
const SESSION_TIME_KEYS: &[&str] = &["session_time"];
const FIRMWARE_KEYS: &[&str] = &["firmware_version", "firmware"];
const DYNAMIC_KEYS: &[&str] = &["dynamic_power", "dynamic"];
const PAUSED_KEYS: &[&str] = &["paused", "pause"];
const LOCKED_KEYS: &[&str] = &["locked", "lock"];
const LAST_UPDATED_KEYS: &[&str] = &["last_updated", "timestamp"];

const DEVICE_ID_KEYS: &[&str] = &["deviceId", "device_id", "id"];
const NAME_KEYS: &[&str] = &["name", "deviceName", "alias"];
const SERIAL_KEYS: &[&str] = &["serialNumber", "serial_number", "serial"];

// ── Shape detection ─────────────────────────────────────────────────

/// A vendor response body after shape detection, before field extraction.
#[derive(Debug)]
pub(crate) enum RawPayload {
    /// JSON object carrying status or identity fields.
    Object(Map<String, Value>),
    /// JSON array of pairing records (identity listing).
    Array(Vec<Value>),
    /// Comma-joined `key:value` pairs (gateway text quirk).
    Text(BTreeMap<String, String>),
}

/// Classify a raw body as JSON object, JSON array, or delimited text.
///
/// The `{"data": ...}` and `{"response": "..."}` wrappers observed on
/// the REST and gateway deployments are unwrapped here, before dispatch.
pub(crate) fn detect(body: &str, content_type: Option<&str>) -> Result<RawPayload, Error> {
    let trimmed = body.trim();
    let looks_json = content_type.is_some_and(|ct| ct.contains("json"))
        || trimmed.starts_with('{')
        || trimmed.starts_with('[');

    if looks_json {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(map)) => return unwrap_object(map, body),
            Ok(Value::Array(items)) => return Ok(RawPayload::Array(items)),
            // Scalar JSON or a parse failure: fall through to text sniffing.
            Ok(_) | Err(_) => {}
        }
    }

    if let Some(pairs) = parse_pairs(trimmed) {
        return Ok(RawPayload::Text(pairs));
    }

    Err(Error::Parse {
        message: "body is neither JSON nor key:value text".to_owned(),
        body: body.to_owned(),
    })
}

/// Strip vendor envelopes from a JSON object.
fn unwrap_object(map: Map<String, Value>, original: &str) -> Result<RawPayload, Error> {
    match map.get("data") {
        Some(Value::Object(inner)) => return Ok(RawPayload::Object(inner.clone())),
        Some(Value::Array(items)) => return Ok(RawPayload::Array(items.clone())),
        _ => {}
    }
    // The gateway wraps text bodies as {"response": "<key:value,...>"}.
    if let Some(Value::String(text)) = map.get("response") {
        if let Some(pairs) = parse_pairs(text.trim()) {
            return Ok(RawPayload::Text(pairs));
        }
        return Err(Error::Parse {
            message: "wrapped response text is not key:value data".to_owned(),
            body: original.to_owned(),
        });
    }
    Ok(RawPayload::Object(map))
}

/// Parse comma-joined `key:value` segments. Splits each segment on the
/// first `:` only -- values may themselves contain colons (timestamps).
fn parse_pairs(text: &str) -> Option<BTreeMap<String, String>> {
    if !text.contains(':') {
        return None;
    }
    let mut pairs = BTreeMap::new();
    for segment in text.split(',') {
        if let Some((key, value)) = segment.split_once(':') {
            let key = key.trim();
            if !key.is_empty() {
                pairs.insert(key.to_owned(), value.trim().to_owned());
            }
        }
    }
    if pairs.is_empty() { None } else { Some(pairs) }
}

// ── Coercion ────────────────────────────────────────────────────────
// Vendor numbers arrive as numbers one day and quoted strings the next.
// Numeric coercion goes string -> float -> int; anything unparsable
// falls back to the field default at the lookup site.

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn coerce_i64(value: &Value) -> Option<i64> {
    coerce_f64(value).map(|f| f as i64)
}

/// Total boolean coercion: `"1"`, `"true"`, `"yes"`, `"on"`
/// (case-insensitive) and any non-zero number are true, everything else
/// is false.
fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim();
            if matches!(
                s.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ) {
                return true;
            }
            s.parse::<f64>().is_ok_and(|f| f != 0.0)
        }
        _ => false,
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| map.get(*k))
}

fn f64_field(map: &Map<String, Value>, keys: &[&str], default: f64) -> f64 {
    lookup(map, keys)
        .and_then(coerce_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn u8_field(map: &Map<String, Value>, keys: &[&str], default: u8) -> u8 {
    lookup(map, keys)
        .and_then(coerce_i64)
        .and_then(|v| u8::try_from(v).ok())
        .unwrap_or(default)
}

fn u32_field(map: &Map<String, Value>, keys: &[&str], default: u32) -> u32 {
    lookup(map, keys)
        .and_then(coerce_i64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

fn i32_field(map: &Map<String, Value>, keys: &[&str], default: i32) -> i32 {
    lookup(map, keys)
        .and_then(coerce_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(default)
}

fn bool_field(map: &Map<String, Value>, keys: &[&str]) -> bool {
    lookup(map, keys).is_some_and(coerce_bool)
}

fn string_field(map: &Map<String, Value>, keys: &[&str], default: &str) -> String {
    lookup(map, keys)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_owned()
}

// ── Normalization ───────────────────────────────────────────────────

/// Normalize a raw status body into a [`ChargerStatus`].
///
/// Accepts the JSON-object and key:value-text shapes. A pairing array is
/// a parse error here -- that shape belongs to the identity endpoint.
pub fn normalize_status(body: &str, content_type: Option<&str>) -> Result<ChargerStatus, Error> {
    match detect(body, content_type)? {
        RawPayload::Object(map) => {
            if !has_status_keys(&map) {
                return Err(Error::Parse {
                    message: "JSON object carries no recognized status fields".to_owned(),
                    body: body.to_owned(),
                });
            }
            Ok(status_from_map(&map, None))
        }
        RawPayload::Text(pairs) => {
            let map: Map<String, Value> = pairs
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            Ok(status_from_map(&map, Some(pairs)))
        }
        RawPayload::Array(_) => Err(Error::Parse {
            message: "pairing list where a status object was expected".to_owned(),
            body: body.to_owned(),
        }),
    }
}

fn has_status_keys(map: &Map<String, Value>) -> bool {
    CHARGE_STATE_KEYS
        .iter()
        .chain(CHARGE_POWER_KEYS)
        .chain(INTENSITY_KEYS)
        .chain(CHARGE_ENERGY_KEYS)
        .chain(VOLTAGE_KEYS)
        .any(|k| map.contains_key(*k))
}

fn status_from_map(map: &Map<String, Value>, raw: Option<BTreeMap<String, String>>) -> ChargerStatus {
    let d = ChargerStatus::default();
    ChargerStatus {
        charge_power: f64_field(map, CHARGE_POWER_KEYS, d.charge_power),
        charge_energy: f64_field(map, CHARGE_ENERGY_KEYS, d.charge_energy),
        session_energy: f64_field(map, SESSION_ENERGY_KEYS, d.session_energy),
        total_energy: f64_field(map, TOTAL_ENERGY_KEYS, d.total_energy),
        charge_state: lookup(map, CHARGE_STATE_KEYS)
            .and_then(coerce_i64)
            .map_or(d.charge_state, ChargeState::from_code),
        charge_current: u8_field(map, CHARGE_CURRENT_KEYS, d.charge_current),
        intensity: u8_field(map, INTENSITY_KEYS, d.intensity),
        max_intensity: u8_field(map, MAX_INTENSITY_KEYS, d.max_intensity),
        min_intensity: u8_field(map, MIN_INTENSITY_KEYS, d.min_intensity),
        voltage: f64_field(map, VOLTAGE_KEYS, d.voltage),
        temperature: f64_field(map, TEMPERATURE_KEYS, d.temperature),
        wifi_signal: i32_field(map, WIFI_SIGNAL_KEYS, d.wifi_signal),
        session_time: u32_field(map, SESSION_TIME_KEYS, d.session_time),
        firmware_version: string_field(map, FIRMWARE_KEYS, &d.firmware_version),
        dynamic_power: bool_field(map, DYNAMIC_KEYS),
        paused: bool_field(map, PAUSED_KEYS),
        locked: bool_field(map, LOCKED_KEYS),
        last_updated: string_field(map, LAST_UPDATED_KEYS, &d.last_updated),
        raw_data: raw,
    }
}

/// Resolve a [`DeviceIdentity`] from an identity/pairing response.
///
/// The gateway returns a pairing array to scan for `device_id`; the REST
/// deployment returns a single record. A bare text acknowledgement (seen
/// on some gateway accounts) confirms the pairing without metadata.
pub fn identity_from_body(
    body: &str,
    content_type: Option<&str>,
    device_id: &str,
) -> Result<DeviceIdentity, Error> {
    match detect(body, content_type)? {
        RawPayload::Array(items) => {
            for item in &items {
                if let Value::Object(map) = item {
                    let id = lookup(map, DEVICE_ID_KEYS).and_then(Value::as_str);
                    if id == Some(device_id) {
                        return Ok(identity_from_map(map, device_id));
                    }
                }
            }
            Err(Error::NotFound)
        }
        RawPayload::Object(map) => Ok(identity_from_map(&map, device_id)),
        RawPayload::Text(_) => Ok(DeviceIdentity {
            device_id: device_id.to_owned(),
            name: device_id.to_owned(),
            serial_number: "Unknown".to_owned(),
        }),
    }
}

fn identity_from_map(map: &Map<String, Value>, device_id: &str) -> DeviceIdentity {
    DeviceIdentity {
        device_id: string_field(map, DEVICE_ID_KEYS, device_id),
        name: string_field(map, NAME_KEYS, device_id),
        serial_number: string_field(map, SERIAL_KEYS, "Unknown"),
    }
}

// ── Tests ───────────────────────────────────────────────────────────
