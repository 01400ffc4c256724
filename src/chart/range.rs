use crate::format::{round_ten, RoundDirection};

/// Inclusive Y-axis bounds for one chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when `value` sits strictly inside the range; used to decide
    /// whether a datum overlay is visible.
    pub fn straddles(&self, value: f64) -> bool {
        self.min < value && self.max > value
    }
}

/// Widen the default bounds to cover every sample in the batch, rounding
/// outward to the nearest multiple of 10. Bounds only ever grow, so the
/// nominal range stays visible and no data point is clipped. Non-finite
/// samples fail both comparisons and are ignored.
pub fn auto_range(defaults: AxisRange, series: &[f64]) -> AxisRange {
    let mut range = defaults;
    for &value in series {
        if value < range.min {
            range.min = round_ten(value, RoundDirection::Down);
        }
        if value > range.max {
            range.max = round_ten(value, RoundDirection::Up);
        }
    }
    range
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMP_DEFAULTS: AxisRange = AxisRange::new(-10.0, 40.0);

    #[test]
    fn batch_inside_defaults_leaves_bounds_unchanged() {
        let range = auto_range(TEMP_DEFAULTS, &[22.1, 23.5, 5.2]);
        assert_eq!(range, AxisRange::new(-10.0, 40.0));
    }

    #[test]
    fn low_outlier_widens_min_outward() {
        let range = auto_range(TEMP_DEFAULTS, &[-15.2]);
        assert_eq!(range.min, -20.0);
        assert_eq!(range.max, 40.0);
    }

    #[test]
    fn high_outlier_widens_max_outward() {
        let range = auto_range(TEMP_DEFAULTS, &[44.0]);
        assert_eq!(range.max, 50.0);
        assert_eq!(range.min, -10.0);
    }

    #[test]
    fn bounds_cover_defaults_and_data_on_multiples_of_ten() {
        let batches: &[&[f64]] = &[
            &[22.1, 23.5, 5.2],
            &[-15.2],
            &[55.0, -33.3, 12.0],
            &[40.0],
            &[],
        ];
        for batch in batches {
            let range = auto_range(TEMP_DEFAULTS, batch);
            assert!(range.min <= TEMP_DEFAULTS.min);
            assert!(range.max >= TEMP_DEFAULTS.max);
            if !batch.is_empty() {
                let data_min = batch.iter().cloned().fold(f64::INFINITY, f64::min);
                let data_max = batch.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                assert!(range.min <= data_min);
                assert!(range.max >= data_max);
            }
            assert_eq!(range.min % 10.0, 0.0);
            assert_eq!(range.max % 10.0, 0.0);
        }
    }

    #[test]
    fn exact_bound_value_is_not_widened() {
        // 40.0 is not strictly above the default max, so it stays.
        let range = auto_range(TEMP_DEFAULTS, &[40.0, -10.0]);
        assert_eq!(range, TEMP_DEFAULTS);
    }

    #[test]
    fn nan_samples_are_ignored() {
        let range = auto_range(TEMP_DEFAULTS, &[f64::NAN, 20.0]);
        assert_eq!(range, TEMP_DEFAULTS);
    }

    #[test]
    fn straddles_is_strict() {
        let range = AxisRange::new(-10.0, 40.0);
        assert!(range.straddles(0.0));
        assert!(!range.straddles(-10.0));
        assert!(!range.straddles(40.0));
    }
}
