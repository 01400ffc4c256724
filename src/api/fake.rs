use std::collections::VecDeque;

use super::{LogBatch, SensorReading, Station};
use crate::api::types::ConfigUpdate;
use crate::config::PollingConfig;
use crate::{Error, Result};

/// Scripted station used in tests: responses are queued per endpoint and
/// popped in order; `PUT /config` bodies are recorded for inspection.
#[derive(Default)]
pub struct FakeStation {
    sensor_script: VecDeque<Result<SensorReading>>,
    config_script: VecDeque<Result<PollingConfig>>,
    log_script: VecDeque<Result<LogBatch>>,
    update_script: VecDeque<Result<()>>,
    updates: Vec<ConfigUpdate>,
}

impl FakeStation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_sensor(&mut self, response: Result<SensorReading>) {
        self.sensor_script.push_back(response);
    }

    pub fn push_config(&mut self, response: Result<PollingConfig>) {
        self.config_script.push_back(response);
    }

    pub fn push_log(&mut self, response: Result<LogBatch>) {
        self.log_script.push_back(response);
    }

    pub fn push_update(&mut self, response: Result<()>) {
        self.update_script.push_back(response);
    }

    /// Bodies received via `update_config`, in call order.
    pub fn updates(&self) -> &[ConfigUpdate] {
        &self.updates
    }
}

impl Station for FakeStation {
    fn sensor(&mut self) -> Result<SensorReading> {
        self.sensor_script.pop_front().unwrap_or_else(unscripted)
    }

    fn config(&mut self) -> Result<PollingConfig> {
        self.config_script.pop_front().unwrap_or_else(unscripted)
    }

    fn update_config(&mut self, cfg: &PollingConfig) -> Result<()> {
        self.updates.push(cfg.to_update());
        self.update_script.pop_front().unwrap_or(Ok(()))
    }

    fn log(&mut self) -> Result<LogBatch> {
        self.log_script.pop_front().unwrap_or_else(unscripted)
    }
}

fn unscripted<T>() -> Result<T> {
    Err(Error::Network("fake station: no scripted response".into()))
}
