/// Threshold estimation for POT extraction.
///
/// The threshold is the empirical `p`-quantile of the valid (non-missing)
/// daily values, computed with the type-7 linear-interpolation estimator
/// (R's default `quantile` algorithm). It is computed once per station and
/// attached unchanged to every event that station produces.

use crate::model::{DailyObservation, PotError};

/// Computes the `p`-quantile threshold over the non-missing values of the
/// series.
///
/// # Errors
///
/// - `InvalidParameter` if `p` is outside the open interval (0, 1).
/// - `InsufficientValidData` if no non-missing values remain — the station
///   yields no events, the batch continues.
pub fn estimate_threshold(series: &[DailyObservation], p: f64) -> Result<f64, PotError> {
    if !(p > 0.0 && p < 1.0) {
        return Err(PotError::InvalidParameter {
            name: "p_threshold",
            value: p,
        });
    }

    let mut valid: Vec<f64> = series.iter().filter_map(|obs| obs.value).collect();
    if valid.is_empty() {
        return Err(PotError::InsufficientValidData);
    }

    // Missing values were stripped above and parsed values are finite,
    // so total_cmp gives the ordinary numeric order here.
    valid.sort_by(|a, b| a.total_cmp(b));
    Ok(quantile_type7(&valid, p))
}

/// Type-7 quantile of a pre-sorted slice: linear interpolation between the
/// order statistics at h = (n - 1) * p.
fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
