/// Threshold-crossing detection.
///
/// Scans the above-threshold flag sequence in a single forward pass and
/// pairs up-crossings with down-crossings into candidate flood clusters.
/// Missing values count as not-above, so a gap in the record terminates a
/// cluster the same way a recession does (the cluster is then invalidated
/// later by the peak extractor if the gap falls inside it).

use crate::model::DailyObservation;

/// An inclusive index interval delimiting one candidate flood cluster:
/// first and last day on which the series sits above the threshold.
pub type ClusterInterval = (usize, usize);

/// Finds all matched (up, down) crossing pairs of the series against
/// `threshold`.
///
/// An up-crossing is the first index where the above-threshold flag turns
/// true; a down-crossing is the last true index before it turns false.
///
/// Boundary policy: an event already in progress at the start of the series
/// has an unknown true beginning, so its unmatched down-crossing is dropped;
/// symmetrically an event still in progress at the end of the series drops
/// its unmatched up-crossing.
pub fn detect_clusters(series: &[DailyObservation], threshold: f64) -> Vec<ClusterInterval> {
    let above: Vec<bool> = series
        .iter()
        .map(|obs| obs.value.is_some_and(|v| v > threshold))
        .collect();

    let mut ups: Vec<usize> = Vec::new();
    let mut downs: Vec<usize> = Vec::new();
    for i in 1..above.len() {
        if !above[i - 1] && above[i] {
            ups.push(i);
        }
        if above[i - 1] && !above[i] {
            downs.push(i - 1);
        }
    }

    // Series starts above threshold: leading down-crossing has no matching
    // up-crossing.
    if above.first().copied().unwrap_or(false) && !downs.is_empty() {
        downs.remove(0);
    }
    // Series ends above threshold: trailing up-crossing has no matching
    // down-crossing.
    if above.last().copied().unwrap_or(false) && ups.len() > downs.len() {
        ups.pop();
    }

    debug_assert_eq!(ups.len(), downs.len());
    ups.into_iter().zip(downs).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
