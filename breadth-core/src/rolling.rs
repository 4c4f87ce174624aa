//! Windowed-aggregate primitives.
//!
//! All rolling aggregates use minimum-period-of-one semantics: at index i
//! the window is `[max(0, i - W + 1), i]`, so the window simply shrinks
//! near the start of the series instead of withholding a value. `lag` and
//! `pct_change` are the only primitives that produce NaN ("no value")
//! leading entries.
//!
//! This module is the only place rolling-window logic lives; the indicator
//! and ratio layers are expressed entirely in terms of these functions.

/// Rolling mean over a window of `period`, minimum period of one.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "rolling period must be >= 1");
    let mut result = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for i in 0..values.len() {
        sum += values[i];
        if i >= period {
            sum -= values[i - period];
        }
        let len = (i + 1).min(period);
        // NaN anywhere in the window poisons the running sum; recompute
        // once the NaN has left the window.
        if sum.is_nan() {
            let start = i + 1 - len;
            sum = values[start..=i].iter().sum();
        }
        result.push(sum / len as f64);
    }
    result
}

/// Rolling sum over a window of `period`, minimum period of one.
pub fn rolling_sum(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "rolling period must be >= 1");
    let mut result = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for i in 0..values.len() {
        sum += values[i];
        if i >= period {
            sum -= values[i - period];
        }
        if sum.is_nan() {
            let len = (i + 1).min(period);
            let start = i + 1 - len;
            sum = values[start..=i].iter().sum();
        }
        result.push(sum);
    }
    result
}

/// Rolling minimum over a window of `period`, minimum period of one.
pub fn rolling_min(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "rolling period must be >= 1");
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(period);
            values[start..=i].iter().copied().fold(f64::INFINITY, f64::min)
        })
        .collect()
}

/// Rolling maximum over a window of `period`, minimum period of one.
pub fn rolling_max(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "rolling period must be >= 1");
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(period);
            values[start..=i]
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max)
        })
        .collect()
}

/// Shift the series forward by `k`: index i reports `values[i - k]`, NaN
/// while `i < k`.
pub fn lag(values: &[f64], k: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| if i >= k { values[i - k] } else { f64::NAN })
        .collect()
}

/// One-period percentage change: `values[i] / values[i-1] - 1`, NaN at
/// index 0. Division by a prior zero propagates the IEEE result.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            if i >= 1 {
                values[i] / values[i - 1] - 1.0
            } else {
                f64::NAN
            }
        })
        .collect()
}
