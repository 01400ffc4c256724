//! Polling intervals as reported by the station.
//!
//! Validation is per-field: a value that fails to parse as a positive integer
//! falls back to its default silently, leaving the other fields intact.

use serde_json::Value;

use crate::api::types::{ConfigPayload, ConfigUpdate};

pub const DEFAULT_SENSOR_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_GRAPH_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_LOG_INTERVAL_MS: u64 = 3_600_000;

/// Intervals driving the sensor and log pollers. `log_interval_ms` is the
/// station's log retention cadence; the client consumes it only for the chart
/// tick-unit label, it never drives a client timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    pub sensor_interval_ms: u64,
    pub graph_interval_ms: u64,
    pub log_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            sensor_interval_ms: DEFAULT_SENSOR_INTERVAL_MS,
            graph_interval_ms: DEFAULT_GRAPH_INTERVAL_MS,
            log_interval_ms: DEFAULT_LOG_INTERVAL_MS,
        }
    }
}

impl PollingConfig {
    /// Decode a `/config` body, substituting the default for any field that
    /// is missing, non-numeric, or not a positive integer.
    pub fn from_payload(payload: &ConfigPayload) -> Self {
        Self {
            sensor_interval_ms: interval_or(&payload.sensor_int, DEFAULT_SENSOR_INTERVAL_MS),
            graph_interval_ms: interval_or(&payload.graph_int, DEFAULT_GRAPH_INTERVAL_MS),
            log_interval_ms: interval_or(&payload.log_int, DEFAULT_LOG_INTERVAL_MS),
        }
    }

    /// Body for `PUT /config`.
    pub fn to_update(&self) -> ConfigUpdate {
        ConfigUpdate {
            sensor_int: self.sensor_interval_ms,
            graph_int: self.graph_interval_ms,
            log_int: self.log_interval_ms,
        }
    }
}

fn interval_or(raw: &Option<Value>, default: u64) -> u64 {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.filter(|ms| *ms > 0).unwrap_or(default)
}
