//! Chart pipeline: fixed per-metric presentation, widen-only axis ranging,
//! and the line-chart renderer drawing through the [`Canvas`] seam.

use crate::api::LogEntry;
use crate::Result;

pub mod canvas;
pub mod range;
pub mod recording;
pub mod renderer;
pub mod svg;

pub use canvas::{Canvas, TextAnchor};
pub use range::{auto_range, AxisRange};
pub use svg::{SvgCanvas, SvgSurfaces};

pub const AXIS_COLOR: &str = "#333333";
pub const DATUM_COLOR: &str = "#a9a9a9";

/// Standard sea-level pressure, the datum overlay on the pressure chart.
pub const SEA_LEVEL_HPA: f64 = 1013.25;

/// The six charted metrics. Ranges, colors and datum overlays are fixed per
/// metric; this is not a general charting surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Temperature,
    Pressure,
    Humidity,
    Iaq,
    Co2,
    Voc,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Temperature,
        Metric::Pressure,
        Metric::Humidity,
        Metric::Iaq,
        Metric::Co2,
        Metric::Voc,
    ];

    /// Stable identifier for the metric's chart surface.
    pub fn chart_id(self) -> &'static str {
        match self {
            Metric::Temperature => "tempChart",
            Metric::Pressure => "presChart",
            Metric::Humidity => "humyChart",
            Metric::Iaq => "sIAQChart",
            Metric::Co2 => "CO2Chart",
            Metric::Voc => "bVOCChart",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Metric::Temperature => "#cc5555",
            Metric::Pressure => "#669900",
            Metric::Humidity => "#0099ff",
            Metric::Iaq => "#b266ff",
            Metric::Co2 => "#aaaa00",
            Metric::Voc => "#cc6600",
        }
    }

    /// Nominal axis bounds, before widening to cover the batch.
    pub fn default_range(self) -> AxisRange {
        match self {
            Metric::Temperature => AxisRange::new(-10.0, 40.0),
            Metric::Pressure => AxisRange::new(980.0, 1040.0),
            Metric::Humidity => AxisRange::new(0.0, 100.0),
            Metric::Iaq => AxisRange::new(0.0, 150.0),
            Metric::Co2 => AxisRange::new(300.0, 1000.0),
            Metric::Voc => AxisRange::new(0.0, 5.0),
        }
    }

    /// Reference line overlaid when the axis range straddles it. Only the
    /// temperature (0 °C) and pressure (sea level) charts carry one.
    pub fn datum(self) -> Option<f64> {
        match self {
            Metric::Temperature => Some(0.0),
            Metric::Pressure => Some(SEA_LEVEL_HPA),
            _ => None,
        }
    }

    /// Pull this metric's value out of a log entry.
    pub fn sample(self, entry: &LogEntry) -> f64 {
        match self {
            Metric::Temperature => entry.temperature_c,
            Metric::Pressure => entry.pressure_hpa,
            Metric::Humidity => entry.humidity_pct,
            Metric::Iaq => entry.iaq_index,
            Metric::Co2 => entry.co2_ppm,
            Metric::Voc => entry.voc,
        }
    }
}

/// The six chart surfaces, addressed by metric. `commit` publishes the
/// finished frame (flushes the SVG file; a no-op for the test recorder).
pub trait Surfaces {
    fn canvas(&mut self, metric: Metric) -> &mut dyn Canvas;
    fn commit(&mut self, metric: Metric) -> Result<()>;
}
