//! Application wiring: the polling daemon and the `set-intervals` one-shot,
//! built on the dashboard orchestrator.

mod dashboard;
mod logger;
mod scheduler;

pub use dashboard::Dashboard;
pub use logger::{LogLevel, Logger};
pub use scheduler::Scheduler;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::api::{HttpStation, Station};
use crate::chart::SvgSurfaces;
use crate::cli::{IntervalOptions, RunOptions};
use crate::view::ConsoleView;
use crate::Result;

pub const DEFAULT_BASE_URL: &str = "http://envstation.local";
pub const DEFAULT_OUT_DIR: &str = "charts";

pub const CHART_WIDTH: f64 = 400.0;
pub const CHART_HEIGHT: f64 = 200.0;

/// Cap on loop sleep so a Ctrl-C is noticed promptly even with long poll
/// intervals.
const IDLE_SLEEP: Duration = Duration::from_millis(200);

/// The polling daemon: HTTP station in, console panel and SVG charts out.
pub struct App {
    options: RunOptions,
    logger: Logger,
}

impl App {
    pub fn new(options: RunOptions) -> Self {
        let logger = Logger::new(options.log_level, options.log_file.clone());
        Self { options, logger }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut station = HttpStation::new(&self.options.url)?;
        let mut view = ConsoleView;
        let mut surfaces = SvgSurfaces::new(
            Path::new(&self.options.out_dir),
            CHART_WIDTH,
            CHART_HEIGHT,
        )?;
        let mut dashboard = Dashboard::new(&mut station, &mut view, &mut surfaces, &self.logger);

        self.logger.info(format!(
            "polling {}, charts in {}",
            self.options.url, self.options.out_dir
        ));
        dashboard.start(Instant::now());
        dashboard.apply_local_intervals(
            self.options.sensor_interval.map(as_millis),
            self.options.graph_interval.map(as_millis),
            Instant::now(),
        );

        if self.options.once {
            self.logger.info("single poll complete");
            return Ok(());
        }

        let running = Arc::new(AtomicBool::new(true));
        {
            let running = Arc::clone(&running);
            if let Err(err) = ctrlc::set_handler(move || running.store(false, Ordering::SeqCst)) {
                self.logger
                    .warn(format!("signal handler not installed: {err}"));
            }
        }

        while running.load(Ordering::SeqCst) {
            dashboard.tick(Instant::now());
            let sleep = dashboard
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()))
                .unwrap_or(IDLE_SLEEP)
                .min(IDLE_SLEEP);
            thread::sleep(sleep);
        }
        self.logger.info("shutting down");
        Ok(())
    }
}

/// Fetch the station's current intervals, apply the requested overrides, and
/// push the result back. Fields not mentioned keep their on-station values.
pub fn set_intervals(options: &IntervalOptions, logger: &Logger) -> Result<()> {
    let mut station = HttpStation::new(&options.url)?;
    let mut cfg = station.config()?;
    if let Some(interval) = options.sensor {
        cfg.sensor_interval_ms = as_millis(interval);
    }
    if let Some(interval) = options.graph {
        cfg.graph_interval_ms = as_millis(interval);
    }
    if let Some(interval) = options.log {
        cfg.log_interval_ms = as_millis(interval);
    }
    match station.update_config(&cfg) {
        Ok(()) => {
            logger.info(format!("intervals updated on {}", options.url));
            println!("Update Successful");
            println!(
                "intervals: sensor {} ms, graph {} ms, log {} ms",
                cfg.sensor_interval_ms, cfg.graph_interval_ms, cfg.log_interval_ms
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", dashboard::save_failure_message(&err));
            Err(err)
        }
    }
}

fn as_millis(interval: Duration) -> u64 {
    interval.as_millis() as u64
}
