use std::time::Instant;

use super::scheduler::Scheduler;
use super::Logger;
use crate::api::Station;
use crate::chart::{auto_range, renderer, Metric, Surfaces};
use crate::config::PollingConfig;
use crate::format::{self, DateStyle};
use crate::view::{ReadingView, View};
use crate::Error;

/// Orchestrator for one station: loads config, runs the two pollers, keeps
/// the scheduler in step with config changes, and fans log batches out to
/// the six chart surfaces.
pub struct Dashboard<'a> {
    station: &'a mut dyn Station,
    view: &'a mut dyn View,
    surfaces: &'a mut dyn Surfaces,
    logger: &'a Logger,
    cfg: PollingConfig,
    scheduler: Scheduler,
}

impl<'a> Dashboard<'a> {
    pub fn new(
        station: &'a mut dyn Station,
        view: &'a mut dyn View,
        surfaces: &'a mut dyn Surfaces,
        logger: &'a Logger,
    ) -> Self {
        Self {
            station,
            view,
            surfaces,
            logger,
            cfg: PollingConfig::default(),
            scheduler: Scheduler::new(),
        }
    }

    pub fn config(&self) -> PollingConfig {
        self.cfg
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Startup sequence: fetch config, then take the first sensor and log
    /// polls immediately so the display is live before the first tick.
    pub fn start(&mut self, now: Instant) {
        self.reload_config(now);
        self.poll_sensor();
        self.poll_log();
    }

    /// Run any polls whose deadline has passed. The two timers interleave
    /// arbitrarily; each poll writes to its own view region, so order
    /// between them does not matter.
    pub fn tick(&mut self, now: Instant) {
        if self.scheduler.sensor_due(now) {
            self.poll_sensor();
        }
        if self.scheduler.log_due(now) {
            self.poll_log();
        }
    }

    /// Fetch `/config` and reschedule both timers. On failure the current
    /// intervals (defaults at startup) stay in force and timers are still
    /// installed, so polling continues against an unreachable config
    /// endpoint.
    pub fn reload_config(&mut self, now: Instant) {
        match self.station.config() {
            Ok(cfg) => {
                self.cfg = cfg;
                self.view.show_config(&self.cfg);
            }
            Err(err) => {
                self.logger.warn(format!("config load failed: {err}"));
                self.view.alert(&format!("Config load failed: {err}"));
            }
        }
        self.scheduler.reschedule_all(&self.cfg, now);
    }

    /// Push new intervals to the station. The local config is updated before
    /// the request and is not rolled back on failure; timers are only
    /// rescheduled on success.
    pub fn save_config(&mut self, cfg: PollingConfig, now: Instant) {
        self.cfg = cfg;
        match self.station.update_config(&cfg) {
            Ok(()) => {
                self.scheduler.reschedule_all(&self.cfg, now);
                self.view.show_config(&self.cfg);
                self.view.alert("Update Successful");
            }
            Err(err) => {
                self.logger.warn(format!("config update failed: {err}"));
                let message = save_failure_message(&err);
                self.view.alert(&message);
            }
        }
    }

    /// Locally override intervals (CLI flags) without writing to the
    /// station; takes effect immediately via a reschedule.
    pub fn apply_local_intervals(
        &mut self,
        sensor_ms: Option<u64>,
        graph_ms: Option<u64>,
        now: Instant,
    ) {
        if sensor_ms.is_none() && graph_ms.is_none() {
            return;
        }
        if let Some(ms) = sensor_ms {
            self.cfg.sensor_interval_ms = ms;
        }
        if let Some(ms) = graph_ms {
            self.cfg.graph_interval_ms = ms;
        }
        self.view.show_config(&self.cfg);
        self.scheduler.reschedule_all(&self.cfg, now);
    }

    /// Fetch the instantaneous reading and publish it. A failed poll raises
    /// an alert and waits for the next tick; there is no retry.
    pub fn poll_sensor(&mut self) {
        match self.station.sensor() {
            Ok(reading) => {
                self.view.show_reading(&ReadingView::from_reading(&reading));
            }
            Err(err) => {
                self.logger.warn(format!("sensor poll failed: {err}"));
                let message = poll_failure_message(&err);
                self.view.alert(&message);
            }
        }
    }

    /// Fetch the historical batch and repaint every chart from it. The batch
    /// replaces the previous one wholesale; nothing is merged or cached.
    pub fn poll_log(&mut self) {
        let batch = match self.station.log() {
            Ok(batch) => batch,
            Err(err) => {
                self.logger.warn(format!("log poll failed: {err}"));
                let message = poll_failure_message(&err);
                self.view.alert(&message);
                return;
            }
        };
        if batch.is_empty() {
            self.logger.debug("log batch empty, charts left unchanged");
            return;
        }

        let x_min = format::format_date(&batch[0].timestamp, DateStyle::Compact);
        let x_max = format::format_date(&batch[batch.len() - 1].timestamp, DateStyle::Compact);

        for metric in Metric::ALL {
            let series: Vec<f64> = batch.iter().map(|entry| metric.sample(entry)).collect();
            let range = auto_range(metric.default_range(), &series);
            renderer::draw_chart(
                self.surfaces.canvas(metric),
                metric,
                &series,
                &x_min,
                &x_max,
                range,
                self.cfg.log_interval_ms,
            );
            if let Err(err) = self.surfaces.commit(metric) {
                self.logger
                    .warn(format!("chart commit failed for {}: {err}", metric.chart_id()));
            }
        }
    }
}

/// Alert text for a failed sensor or log poll.
pub(crate) fn poll_failure_message(err: &Error) -> String {
    match err {
        Error::Http(status) => format!("Request failed. Returned status of {status}"),
        other => format!("Request failed. {other}"),
    }
}

/// Status-class message for a failed config update.
pub(crate) fn save_failure_message(err: &Error) -> String {
    match err {
        Error::Http(404) => "Resource Not Found".to_string(),
        Error::Http(status) if *status >= 500 => "Update Failed".to_string(),
        other => format!("Update error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeStation;
    use crate::api::{LogEntry, SensorReading};
    use crate::app::LogLevel;
    use crate::chart::recording::{DrawOp, RecordingSurfaces};
    use crate::view::RecordingView;
    use std::time::Duration;

    fn reading() -> SensorReading {
        SensorReading {
            timestamp: "2024-05-01T12:00:00".into(),
            uptime_secs: 59,
            temperature_c: 21.0,
            pressure_hpa: 1005.0,
            humidity_pct: 40.0,
            iaq_index: 30.0,
            iaq_accuracy: 2,
            co2_ppm: 550.0,
            voc: 0.7,
            dew_point_c: 7.2,
        }
    }

    fn entry(stamp: &str, temp: f64) -> LogEntry {
        LogEntry {
            timestamp: stamp.into(),
            temperature_c: temp,
            pressure_hpa: 1001.0,
            humidity_pct: 45.0,
            iaq_index: 20.0,
            co2_ppm: 480.0,
            voc: 0.4,
        }
    }

    fn quiet_logger() -> Logger {
        Logger::new(LogLevel::Error, None)
    }

    #[test]
    fn start_loads_config_polls_and_schedules() {
        let mut station = FakeStation::new();
        station.push_config(Ok(PollingConfig {
            sensor_interval_ms: 1_000,
            graph_interval_ms: 2_000,
            log_interval_ms: 60_000,
        }));
        station.push_sensor(Ok(reading()));
        station.push_log(Ok(vec![
            entry("2024-05-01T00:00:00", 20.0),
            entry("2024-05-01T01:00:00", 22.0),
        ]));
        let mut view = RecordingView::new();
        let mut surfaces = RecordingSurfaces::new(400.0, 200.0);
        let logger = quiet_logger();
        let mut dash = Dashboard::new(&mut station, &mut view, &mut surfaces, &logger);

        let now = Instant::now();
        dash.start(now);
        let cfg = dash.config();
        let deadline = dash.next_deadline();
        drop(dash);

        assert_eq!(cfg.sensor_interval_ms, 1_000);
        assert_eq!(view.configs.len(), 1);
        assert_eq!(view.readings.len(), 1);
        assert_eq!(view.readings[0].uptime, "0:00:59");
        assert!(view.alerts.is_empty());
        assert_eq!(surfaces.commits().len(), Metric::ALL.len());
        assert_eq!(deadline, Some(now + Duration::from_millis(1_000)));
    }

    #[test]
    fn config_load_failure_keeps_defaults_and_still_schedules() {
        let mut station = FakeStation::new();
        station.push_config(Err(Error::Network("connect refused".into())));
        let mut view = RecordingView::new();
        let mut surfaces = RecordingSurfaces::new(400.0, 200.0);
        let logger = quiet_logger();
        let mut dash = Dashboard::new(&mut station, &mut view, &mut surfaces, &logger);

        let now = Instant::now();
        dash.reload_config(now);
        let cfg = dash.config();
        let deadline = dash.next_deadline();
        drop(dash);

        assert_eq!(cfg, PollingConfig::default());
        assert_eq!(view.alerts.len(), 1);
        assert!(deadline.is_some());
    }

    #[test]
    fn sensor_poll_failure_alerts_with_raw_status() {
        let mut station = FakeStation::new();
        station.push_sensor(Err(Error::Http(503)));
        let mut view = RecordingView::new();
        let mut surfaces = RecordingSurfaces::new(400.0, 200.0);
        let logger = quiet_logger();
        let mut dash = Dashboard::new(&mut station, &mut view, &mut surfaces, &logger);

        dash.poll_sensor();

        assert_eq!(view.alerts, vec!["Request failed. Returned status of 503"]);
        assert!(view.readings.is_empty());
    }

    #[test]
    fn parse_failure_is_treated_as_a_failed_poll() {
        let mut station = FakeStation::new();
        station.push_log(Err(Error::Parse("/log: missing field".into())));
        let mut view = RecordingView::new();
        let mut surfaces = RecordingSurfaces::new(400.0, 200.0);
        let logger = quiet_logger();
        let mut dash = Dashboard::new(&mut station, &mut view, &mut surfaces, &logger);

        dash.poll_log();

        assert_eq!(view.alerts.len(), 1);
        assert!(surfaces.commits().is_empty());
    }

    #[test]
    fn log_poll_renders_all_six_metrics_with_compact_endpoints() {
        let mut station = FakeStation::new();
        station.push_log(Ok(vec![
            entry("2024-05-01T00:00:00", 20.0),
            entry("2024-05-01T06:00:00", 21.0),
            entry("2024-05-01T12:00:00", 19.5),
        ]));
        let mut view = RecordingView::new();
        let mut surfaces = RecordingSurfaces::new(400.0, 200.0);
        let logger = quiet_logger();
        let mut dash = Dashboard::new(&mut station, &mut view, &mut surfaces, &logger);

        dash.poll_log();

        assert_eq!(surfaces.commits(), Metric::ALL);
        let temp = surfaces.canvas_for(Metric::Temperature);
        let texts = temp.texts();
        assert!(texts.contains(&"5-1 00:00".to_string()));
        assert!(texts.contains(&"5-1 12:00".to_string()));
        let DrawOp::Polyline { points, .. } = temp.polylines()[0] else {
            unreachable!()
        };
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn empty_batch_leaves_charts_untouched() {
        let mut station = FakeStation::new();
        station.push_log(Ok(Vec::new()));
        let mut view = RecordingView::new();
        let mut surfaces = RecordingSurfaces::new(400.0, 200.0);
        let logger = quiet_logger();
        let mut dash = Dashboard::new(&mut station, &mut view, &mut surfaces, &logger);

        dash.poll_log();

        assert!(surfaces.commits().is_empty());
        assert!(view.alerts.is_empty());
    }

    #[test]
    fn save_config_success_reschedules_and_confirms() {
        let mut station = FakeStation::new();
        station.push_update(Ok(()));
        let mut view = RecordingView::new();
        let mut surfaces = RecordingSurfaces::new(400.0, 200.0);
        let logger = quiet_logger();
        let mut dash = Dashboard::new(&mut station, &mut view, &mut surfaces, &logger);

        let cfg = PollingConfig {
            sensor_interval_ms: 750,
            graph_interval_ms: 1_500,
            log_interval_ms: 600_000,
        };
        let now = Instant::now();
        dash.save_config(cfg, now);
        let deadline = dash.next_deadline();
        drop(dash);

        assert_eq!(view.alerts, vec!["Update Successful"]);
        assert_eq!(station.updates().len(), 1);
        assert_eq!(station.updates()[0].sensor_int, 750);
        assert_eq!(deadline, Some(now + Duration::from_millis(750)));
    }

    #[test]
    fn save_config_maps_status_classes_to_messages() {
        for (err, expected) in [
            (Error::Http(500), "Update Failed"),
            (Error::Http(404), "Resource Not Found"),
        ] {
            let mut station = FakeStation::new();
            station.push_update(Err(err));
            let mut view = RecordingView::new();
            let mut surfaces = RecordingSurfaces::new(400.0, 200.0);
            let logger = quiet_logger();
            let mut dash = Dashboard::new(&mut station, &mut view, &mut surfaces, &logger);

            dash.save_config(PollingConfig::default(), Instant::now());
            let cfg = dash.config();
            let deadline = dash.next_deadline();
            drop(dash);

            assert_eq!(view.alerts, vec![expected]);
            // Not rolled back, but also not rescheduled.
            assert_eq!(cfg, PollingConfig::default());
            assert!(deadline.is_none());
        }
    }

    #[test]
    fn tick_runs_due_polls_only() {
        let mut station = FakeStation::new();
        station.push_config(Ok(PollingConfig {
            sensor_interval_ms: 100,
            graph_interval_ms: 10_000,
            log_interval_ms: 3_600_000,
        }));
        station.push_sensor(Ok(reading()));
        let mut view = RecordingView::new();
        let mut surfaces = RecordingSurfaces::new(400.0, 200.0);
        let logger = quiet_logger();
        let mut dash = Dashboard::new(&mut station, &mut view, &mut surfaces, &logger);

        let now = Instant::now();
        dash.reload_config(now);
        dash.tick(now + Duration::from_millis(150));

        assert_eq!(view.readings.len(), 1);
        assert!(surfaces.commits().is_empty(), "log timer not due yet");
    }
}
