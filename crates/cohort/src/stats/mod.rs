//! Summary statistics over the valid record set.

mod summary;

pub use summary::{DataQuality, SummaryStatistics};

/// Round to two decimal places, half away from zero. All reported
/// percentages and means go through this.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `part` in `whole`, rounded to two decimals. A zero
/// denominator reports 0 rather than NaN.
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}
