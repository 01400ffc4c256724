//! Presentation adapter for the live-reading panel. The dashboard publishes
//! display-ready strings through [`View`]; the binary uses [`ConsoleView`],
//! tests use [`RecordingView`].

use crate::api::SensorReading;
use crate::config::PollingConfig;
use crate::format::{self, DateStyle};

/// Display-ready rendering of one sensor poll: raw values rounded to one
/// decimal where shown, plus the derived dew point and IAQ label.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingView {
    pub uptime: String,
    pub date: String,
    pub temperature: String,
    pub pressure: String,
    pub humidity: String,
    pub iaq: String,
    pub iaq_accuracy: String,
    pub iaq_description: String,
    pub co2: String,
    pub voc: String,
    pub dew_point: String,
}

impl ReadingView {
    pub fn from_reading(reading: &SensorReading) -> Self {
        Self {
            uptime: format::format_uptime(reading.uptime_secs),
            date: format::format_date(&reading.timestamp, DateStyle::Full),
            temperature: one_decimal(reading.temperature_c),
            pressure: one_decimal(reading.pressure_hpa),
            humidity: one_decimal(reading.humidity_pct),
            iaq: one_decimal(reading.iaq_index),
            iaq_accuracy: reading.iaq_accuracy.to_string(),
            iaq_description: format::iaq_description(reading.iaq_index).to_string(),
            co2: one_decimal(reading.co2_ppm),
            voc: one_decimal(reading.voc),
            dew_point: one_decimal(reading.dew_point_c),
        }
    }
}

// Non-finite values (dew point with zero humidity) print as-is; the panel
// shows them rather than hiding the sample.
fn one_decimal(value: f64) -> String {
    format::round_to(value, 1).to_string()
}

/// Where live readings, config echoes and alerts land.
pub trait View {
    fn show_reading(&mut self, reading: &ReadingView);
    fn show_config(&mut self, cfg: &PollingConfig);
    /// User-visible failure notice; never stops the polling loop.
    fn alert(&mut self, message: &str);
}

/// Console panel for the daemon.
#[derive(Debug, Default)]
pub struct ConsoleView;

impl View for ConsoleView {
    fn show_reading(&mut self, reading: &ReadingView) {
        println!(
            "[{}] up {} | temp {} C (dew {} C) | pres {} hPa | humy {} % | IAQ {} ({}, acc {}) | CO2 {} ppm | VOC {}",
            reading.date,
            reading.uptime,
            reading.temperature,
            reading.dew_point,
            reading.pressure,
            reading.humidity,
            reading.iaq,
            reading.iaq_description,
            reading.iaq_accuracy,
            reading.co2,
            reading.voc,
        );
    }

    fn show_config(&mut self, cfg: &PollingConfig) {
        println!(
            "intervals: sensor {} ms, graph {} ms, log {} ms",
            cfg.sensor_interval_ms, cfg.graph_interval_ms, cfg.log_interval_ms
        );
    }

    fn alert(&mut self, message: &str) {
        eprintln!("alert: {message}");
    }
}

/// View double that records everything published to it.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub readings: Vec<ReadingView>,
    pub configs: Vec<PollingConfig>,
    pub alerts: Vec<String>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl View for RecordingView {
    fn show_reading(&mut self, reading: &ReadingView) {
        self.readings.push(reading.clone());
    }

    fn show_config(&mut self, cfg: &PollingConfig) {
        self.configs.push(*cfg);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
