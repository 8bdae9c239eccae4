/// Peaks-Over-Threshold extraction pipeline.
///
/// One public operation, `extract_independent_peaks`, runs the five stages
/// in order over a single station's daily series:
///
/// ```text
/// threshold  →  crossings  →  peaks  →  decluster (temporal)  →  decluster (flow ratio)
/// ```
///
/// Each stage is a pure function over an immutable view of the series; the
/// pipeline holds no state between invocations and performs no I/O. The
/// batch driver owns station iteration, file loading, and result
/// persistence.

pub mod crossings;
pub mod decluster;
pub mod peaks;
pub mod threshold;

use chrono::NaiveDate;

use crate::model::{DailyObservation, PotError};

/// Declustering parameters (Lang et al. 1999).
#[derive(Debug, Clone, Copy)]
pub struct PotParams {
    /// Empirical quantile for the magnitude threshold, in (0, 1).
    pub p_threshold: f64,
    /// Minimum separation between independent peaks, in days (≥ 1).
    pub min_separation_days: i64,
    /// Recession ratio for the flow-ratio criterion, in (0, 1).
    pub recession_ratio: f64,
}

impl PotParams {
    /// Checks the parameter domains. `p_threshold` is re-checked by the
    /// threshold estimator; the other two are only validated here.
    pub fn validate(&self) -> Result<(), PotError> {
        if !(self.p_threshold > 0.0 && self.p_threshold < 1.0) {
            return Err(PotError::InvalidParameter {
                name: "p_threshold",
                value: self.p_threshold,
            });
        }
        if self.min_separation_days < 1 {
            return Err(PotError::InvalidParameter {
                name: "min_separation_days",
                value: self.min_separation_days as f64,
            });
        }
        if !(self.recession_ratio > 0.0 && self.recession_ratio < 1.0) {
            return Err(PotError::InvalidParameter {
                name: "recession_ratio",
                value: self.recession_ratio,
            });
        }
        Ok(())
    }
}

/// One independent flood peak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub date: NaiveDate,
    pub value: f64,
}

/// Result of POT extraction for one station.
#[derive(Debug, Clone)]
pub struct PotResult {
    /// The magnitude threshold the peaks were extracted against.
    pub threshold: f64,
    /// Independent flood peaks, chronologically ordered. Empty when the
    /// series never exceeds the threshold.
    pub peaks: Vec<Peak>,
    /// Number of crossing clusters dropped because they contained missing
    /// observations. Reported by the driver for auditability.
    pub invalid_clusters: usize,
}

/// Extracts statistically independent flood peaks from a daily series.
///
/// The series is expected to be ascending by date with one observation per
/// day, already restricted to the years of interest.
///
/// # Errors
///
/// - `InvalidParameter` for out-of-domain parameters.
/// - `InsufficientValidData` when no non-missing values exist to estimate
///   the threshold from; the caller treats this as "station yields no
///   events", not as a batch failure.
pub fn extract_independent_peaks(
    series: &[DailyObservation],
    params: &PotParams,
) -> Result<PotResult, PotError> {
    params.validate()?;

    let threshold = threshold::estimate_threshold(series, params.p_threshold)?;

    let clusters = crossings::detect_clusters(series, threshold);
    let (candidates, invalid_clusters) = peaks::extract_candidates(series, &clusters);
    let survivors = decluster::by_separation(&candidates, params.min_separation_days);
    let independent = decluster::by_flow_ratio(series, &survivors, params.recession_ratio);

    Ok(PotResult {
        threshold,
        peaks: independent
            .into_iter()
            .map(|c| Peak {
                date: c.date,
                value: c.value,
            })
            .collect(),
        invalid_clusters,
    })
}

// ---------------------------------------------------------------------------
// Tests — stage wiring; scenario and property tests live in tests/
// ---------------------------------------------------------------------------
