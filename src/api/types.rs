//! Wire schemas for the station endpoints and the domain types decoded from
//! them. Field-name coupling to the firmware's JSON (`temp`, `humy`, `VOC`,
//! ...) is confined to this module.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::format;

/// `GET /sensor` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorPayload {
    pub uptime: u64,
    pub time: String,
    pub temp: f64,
    pub pres: f64,
    pub humy: f64,
    #[serde(rename = "IAQ")]
    pub iaq: f64,
    #[serde(rename = "IAQacc")]
    pub iaq_acc: i64,
    #[serde(rename = "CO2")]
    pub co2: f64,
    #[serde(rename = "VOC")]
    pub voc: f64,
}

/// One record inside the `GET /log` body. Same shape as a sensor reading;
/// `uptime` is not logged.
#[derive(Debug, Clone, Deserialize)]
pub struct LogRecordPayload {
    pub time: String,
    pub temp: f64,
    pub pres: f64,
    pub humy: f64,
    #[serde(rename = "IAQ")]
    pub iaq: f64,
    #[serde(rename = "IAQacc", default)]
    pub iaq_acc: i64,
    #[serde(rename = "CO2")]
    pub co2: f64,
    #[serde(rename = "VOC")]
    pub voc: f64,
}

/// `GET /log` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct LogPayload {
    pub logfile: Vec<LogRecordPayload>,
}

/// `GET /config` response body. The firmware may serialize intervals as
/// numbers or strings; each field is validated independently downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigPayload {
    #[serde(rename = "sensorInt", default)]
    pub sensor_int: Option<Value>,
    #[serde(rename = "graphInt", default)]
    pub graph_int: Option<Value>,
    #[serde(rename = "logInt", default)]
    pub log_int: Option<Value>,
}

/// `PUT /config` request body. Always serialized as numbers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigUpdate {
    #[serde(rename = "sensorInt")]
    pub sensor_int: u64,
    #[serde(rename = "graphInt")]
    pub graph_int: u64,
    #[serde(rename = "logInt")]
    pub log_int: u64,
}

/// Decoded instantaneous reading with the derived dew point. Transient:
/// rebuilt on every sensor poll, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub timestamp: String,
    pub uptime_secs: u64,
    pub temperature_c: f64,
    pub pressure_hpa: f64,
    pub humidity_pct: f64,
    pub iaq_index: f64,
    pub iaq_accuracy: i64,
    pub co2_ppm: f64,
    pub voc: f64,
    pub dew_point_c: f64,
}

impl From<SensorPayload> for SensorReading {
    fn from(p: SensorPayload) -> Self {
        let dew_point_c = format::dew_point(p.temp, p.humy);
        Self {
            timestamp: p.time,
            uptime_secs: p.uptime,
            temperature_c: p.temp,
            pressure_hpa: p.pres,
            humidity_pct: p.humy,
            iaq_index: p.iaq,
            iaq_accuracy: p.iaq_acc,
            co2_ppm: p.co2,
            voc: p.voc,
            dew_point_c,
        }
    }
}

/// One historical sample.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub temperature_c: f64,
    pub pressure_hpa: f64,
    pub humidity_pct: f64,
    pub iaq_index: f64,
    pub co2_ppm: f64,
    pub voc: f64,
}

impl From<LogRecordPayload> for LogEntry {
    fn from(p: LogRecordPayload) -> Self {
        Self {
            timestamp: p.time,
            temperature_c: p.temp,
            pressure_hpa: p.pres,
            humidity_pct: p.humy,
            iaq_index: p.iaq,
            co2_ppm: p.co2,
            voc: p.voc,
        }
    }
}

/// Ordered batch of log entries, oldest first. Each poll replaces the
/// previous batch wholesale.
pub type LogBatch = Vec<LogEntry>;
