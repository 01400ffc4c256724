//! Line-chart renderer. Draws one metric's series with auto-ranged Y bounds,
//! 10 tick intervals per axis, endpoint date labels, a tick-duration label,
//! and the metric's datum overlay when the range straddles it.

use super::canvas::{Canvas, TextAnchor};
use super::range::AxisRange;
use super::{Metric, AXIS_COLOR, DATUM_COLOR};

/// Space reserved left of the plot for Y labels and ticks.
const X_OFFSET: f64 = 30.0;
/// Space reserved below the plot for X labels and ticks.
const Y_OFFSET: f64 = 25.0;
/// Ticks per axis; the X axis divides the batch span into this many equal
/// time subdivisions.
const TICKS: f64 = 10.0;

/// Repaint `canvas` with the given series. Every call clears first, so
/// repeated renders of identical inputs are identical. Values outside the
/// range are not clipped; the auto-ranger guarantees the bounds already cover
/// the data, so nothing is lost in practice.
pub fn draw_chart(
    canvas: &mut dyn Canvas,
    metric: Metric,
    series: &[f64],
    x_min_label: &str,
    x_max_label: &str,
    range: AxisRange,
    log_interval_ms: u64,
) {
    let w = canvas.width();
    let h = canvas.height();
    let floor = h - Y_OFFSET;

    canvas.clear();

    // Axis lines: Y down the left, X along the bottom.
    canvas.line(X_OFFSET, 0.0, X_OFFSET, floor, AXIS_COLOR);
    canvas.line(X_OFFSET, floor, w, floor, AXIS_COLOR);

    // Numeric Y bounds in the series color, date endpoints and tick-duration
    // label along the bottom in the axis color.
    canvas.text(
        &format_number(range.max),
        X_OFFSET - 7.0,
        10.0,
        metric.color(),
        TextAnchor::End,
    );
    canvas.text(
        &format_number(range.min),
        X_OFFSET - 7.0,
        floor + 5.0,
        metric.color(),
        TextAnchor::End,
    );
    canvas.text(x_min_label, X_OFFSET, h - 5.0, AXIS_COLOR, TextAnchor::Middle);
    canvas.text(
        &tick_interval_label(log_interval_ms),
        (w + X_OFFSET) / 2.0,
        h - 5.0,
        AXIS_COLOR,
        TextAnchor::Middle,
    );
    canvas.text(x_max_label, w - 2.0, h - 5.0, AXIS_COLOR, TextAnchor::End);

    // Y tick marks, floor upward.
    let y_step = floor / TICKS;
    let mut y = floor;
    while y > 0.0 {
        canvas.line(X_OFFSET - 5.0, y, X_OFFSET, y, AXIS_COLOR);
        y -= y_step;
    }

    // X tick marks depend on sample spacing; skip for an empty series.
    if !series.is_empty() {
        let x_step = TICKS * (w - X_OFFSET) / series.len() as f64;
        let mut x = X_OFFSET;
        while x < w {
            canvas.line(x, floor, x, floor + 3.0, AXIS_COLOR);
            x += x_step;
        }
    }

    if range.span() <= 0.0 {
        return;
    }
    let scale = floor / range.span();

    if let Some(datum) = metric.datum() {
        if range.straddles(datum) {
            let y = floor - (datum - range.min) * scale;
            canvas.line(X_OFFSET, y, w, y, DATUM_COLOR);
        }
    }

    if !series.is_empty() {
        let spacing = (w - X_OFFSET) / series.len() as f64;
        let points: Vec<(f64, f64)> = series
            .iter()
            .enumerate()
            .map(|(i, &value)| (X_OFFSET + i as f64 * spacing, floor - (value - range.min) * scale))
            .collect();
        canvas.polyline(&points, metric.color());
    }
}

/// Human-readable duration of one X-axis tick. The base duration comes from
/// the station's log retention interval divided across the hundred-sample
/// logfile; the unit is promoted through secs -> mins -> hours while the
/// value stays at 60 or above, going singular at exactly 1.
pub fn tick_interval_label(log_interval_ms: u64) -> String {
    let mut tick_time = log_interval_ms as f64 / 100.0;
    let mut unit = "secs";
    if tick_time >= 60.0 {
        tick_time /= 60.0;
        unit = if tick_time == 1.0 { "min" } else { "mins" };
    }
    if tick_time >= 60.0 {
        tick_time /= 60.0;
        unit = if tick_time == 1.0 { "hour" } else { "hours" };
    }
    format!("1 tick = {} {}", format_number(tick_time), unit)
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
