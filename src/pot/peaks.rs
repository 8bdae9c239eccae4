/// Cluster peak extraction.
///
/// Reduces each crossing-delimited interval to a single candidate peak:
/// the maximum value in the interval, dated at its first occurrence. An
/// interval containing any missing observation yields no candidate at all —
/// the cluster's true peak cannot be known, so it is excluded from every
/// later stage rather than guessed.

use crate::model::{Candidate, DailyObservation};

use super::crossings::ClusterInterval;

/// Extracts the peak candidate for one inclusive interval, or `None` if any
/// observation inside the interval is missing.
///
/// Ties break to the earliest date: the strict `>` comparison keeps the
/// first occurrence of the maximum.
pub fn extract_cluster_peak(
    series: &[DailyObservation],
    interval: ClusterInterval,
) -> Option<Candidate> {
    let (up, down) = interval;
    let mut best: Option<(usize, f64)> = None;

    for (offset, obs) in series[up..=down].iter().enumerate() {
        let value = obs.value?;
        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((up + offset, value));
        }
    }

    best.map(|(index, value)| Candidate {
        date: series[index].date,
        index,
        value,
    })
}

/// Extracts candidates for all intervals, in order. Returns the candidate
/// list and the number of clusters invalidated by missing data, which the
/// driver reports for auditability.
pub fn extract_candidates(
    series: &[DailyObservation],
    intervals: &[ClusterInterval],
) -> (Vec<Candidate>, usize) {
    let mut candidates = Vec::with_capacity(intervals.len());
    let mut invalid = 0;

    for &interval in intervals {
        match extract_cluster_peak(series, interval) {
            Some(candidate) => candidates.push(candidate),
            None => invalid += 1,
        }
    }

    (candidates, invalid)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
