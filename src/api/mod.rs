//! Client side of the station's REST contract.
//!
//! The wire shapes (`/sensor`, `/config`, `/log`) live in [`types`]; the
//! transport lives in [`http`]. Everything above this module talks to the
//! [`Station`] trait so the pipeline can run against [`fake::FakeStation`]
//! in tests.

use crate::config::PollingConfig;
use crate::Result;

pub mod fake;
pub mod http;
pub mod types;

pub use http::HttpStation;
pub use types::{LogBatch, LogEntry, SensorReading};

/// Access to the station's four REST endpoints.
pub trait Station {
    /// `GET /sensor`: the current instantaneous reading.
    fn sensor(&mut self) -> Result<SensorReading>;

    /// `GET /config`: polling intervals, with per-field fallback to defaults.
    fn config(&mut self) -> Result<PollingConfig>;

    /// `PUT /config`: push new polling intervals to the station.
    fn update_config(&mut self, cfg: &PollingConfig) -> Result<()>;

    /// `GET /log`: the full historical batch, oldest first.
    fn log(&mut self) -> Result<LogBatch>;
}
