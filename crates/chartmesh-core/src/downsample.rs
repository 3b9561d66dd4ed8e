// File: crates/chartmesh-core/src/downsample.rs
// Summary: Sampling utilities: step rate for dense series and per-bucket representative values.

use std::ops::Range;

use crate::error::ConfigError;

/// How a bucket of `rate` consecutive values is reduced to one drawn value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleType {
    /// Nearest raw value (the first of the bucket).
    None,
    Average,
    /// Trailing simple moving average over `period` values.
    MovingAverage { period: usize },
    Max,
    Min,
    /// Bucket max when the bucket average exceeds the series average, else bucket min.
    Peak,
    Sum,
}

impl SampleType {
    pub fn moving_average(period: usize) -> Result<Self, ConfigError> {
        if period == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(SampleType::MovingAverage { period })
    }
}

/// Step between drawn indices: `ceil(visible / max_display)` when downsampling is needed, else 1.
pub fn sample_rate(visible: usize, max_display: usize) -> usize {
    if max_display == 0 || visible <= max_display {
        return 1;
    }
    let rate = visible.div_ceil(max_display);
    debug_assert!(rate >= 1, "sampling rate must be positive");
    rate.max(1)
}

/// Maximum drawn points along an axis of `axis_length` pixels with `sample_dist` spacing.
pub fn max_display_for(axis_length: f32, sample_dist: f32) -> Option<usize> {
    if sample_dist <= 0.0 || !axis_length.is_finite() || axis_length <= 0.0 {
        return None;
    }
    Some(((axis_length / sample_dist).floor() as usize).max(1))
}

/// Mean of the finite values in `window` (clamped to the slice); 0 when there are none.
pub fn data_average(values: &[f64], window: Range<usize>) -> f64 {
    let end = window.end.min(values.len());
    let start = window.start.min(end);
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values[start..end].iter().filter(|v| v.is_finite()) {
        sum += *v;
        n += 1;
    }
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Representative value for drawn index `i`, reading only inside `[min_show, max_show)`.
pub fn sample_value(
    values: &[f64],
    kind: SampleType,
    rate: usize,
    min_show: usize,
    max_show: usize,
    total_average: f64,
    i: usize,
) -> f64 {
    let max_show = max_show.min(values.len());
    if i < min_show || i >= max_show {
        debug_assert!(false, "sampled index {i} outside {min_show}..{max_show}");
        return f64::NAN;
    }
    let rate = rate.max(1);
    if rate == 1 && !matches!(kind, SampleType::MovingAverage { .. }) {
        return values[i];
    }
    let bucket = &values[i..(i + rate).min(max_show)];
    match kind {
        SampleType::None => values[i],
        SampleType::Average => data_average(bucket, 0..bucket.len()),
        SampleType::Sum => bucket.iter().filter(|v| v.is_finite()).sum(),
        SampleType::Max => fold_finite(bucket, f64::max).unwrap_or(values[i]),
        SampleType::Min => fold_finite(bucket, f64::min).unwrap_or(values[i]),
        SampleType::Peak => {
            let avg = data_average(bucket, 0..bucket.len());
            let pick: fn(f64, f64) -> f64 = if avg > total_average { f64::max } else { f64::min };
            fold_finite(bucket, pick).unwrap_or(values[i])
        }
        SampleType::MovingAverage { period } => {
            let period = period.max(1);
            let start = (i + 1).saturating_sub(period).max(min_show);
            data_average(values, start..i + 1)
        }
    }
}

fn fold_finite(values: &[f64], f: fn(f64, f64) -> f64) -> Option<f64> {
    values.iter().copied().filter(|v| v.is_finite()).reduce(f)
}

/// Indices drawn for a window: `min_show, min_show + rate, ..` below `max_show`.
pub fn sampled_indices(min_show: usize, max_show: usize, rate: usize) -> impl Iterator<Item = usize> {
    (min_show..max_show).step_by(rate.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_average_trailing_window() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(sample_value(&v, SampleType::MovingAverage { period: 3 }, 1, 0, 5, 0.0, 4), 4.0);
        // Window is clamped at the start of the data.
        assert_eq!(sample_value(&v, SampleType::MovingAverage { period: 3 }, 1, 0, 5, 0.0, 0), 1.0);
    }

    #[test]
    fn peak_follows_average() {
        let v = [1.0, 9.0, 2.0, 3.0];
        let avg = data_average(&v, 0..4);
        assert_eq!(sample_value(&v, SampleType::Peak, 2, 0, 4, avg, 0), 9.0);
        assert_eq!(sample_value(&v, SampleType::Peak, 2, 0, 4, avg, 2), 2.0);
    }

    #[test]
    fn zero_period_rejected() {
        assert_eq!(SampleType::moving_average(0), Err(ConfigError::ZeroPeriod));
    }
}
