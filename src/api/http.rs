use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use super::types::{LogEntry, LogPayload, SensorPayload};
use super::{LogBatch, SensorReading, Station};
use crate::config::PollingConfig;
use crate::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP client for the station. One instance per base URL; requests
/// are issued from the dashboard loop, so a slow station stalls at most one
/// tick and the next deadline catches up.
pub struct HttpStation {
    base_url: String,
    client: Client,
}

impl HttpStation {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.client.get(self.url(path)).send().map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http(status.as_u16()));
        }
        let body = resp.text().map_err(transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Parse(format!("{path}: {e}")))
    }
}

impl Station for HttpStation {
    fn sensor(&mut self) -> Result<SensorReading> {
        let payload: SensorPayload = self.get_json("/sensor")?;
        Ok(payload.into())
    }

    fn config(&mut self) -> Result<PollingConfig> {
        let payload = self.get_json("/config")?;
        Ok(PollingConfig::from_payload(&payload))
    }

    fn update_config(&mut self, cfg: &PollingConfig) -> Result<()> {
        let resp = self
            .client
            .put(self.url("/config"))
            .json(&cfg.to_update())
            .send()
            .map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http(status.as_u16()));
        }
        Ok(())
    }

    fn log(&mut self) -> Result<LogBatch> {
        let payload: LogPayload = self.get_json("/log")?;
        Ok(payload.logfile.into_iter().map(LogEntry::from).collect())
    }
}

fn transport(err: reqwest::Error) -> Error {
    Error::Network(err.to_string())
}
