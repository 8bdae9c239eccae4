/// Independence filtering of candidate peaks (Lang et al. 1999).
///
/// Two filters run in sequence over the chronologically ordered candidates:
///
/// 1. **Temporal**: consecutive candidates closer than the minimum
///    separation belong to the same event and are merged.
/// 2. **Flow ratio**: consecutive survivors are independent only if the
///    flow between them receded below a fraction of the earlier peak
///    (`peak * recession_ratio > inter-peak minimum`). The prose form of
///    this rule in the literature reads inverted; the computed condition
///    here is the normative one.
///
/// Both filters merge by group and keep the group maximum, first occurrence
/// on ties (strict `>` when replacing the running best).

use crate::model::{Candidate, DailyObservation};

/// Merges candidates separated by `min_separation_days` or fewer days,
/// keeping the maximum of each merged run.
///
/// The gap is measured to the immediately preceding candidate, not to the
/// group maximum: a chain of close peaks stays one event even when the
/// chain spans more than the separation window in total. The first
/// candidate always starts a new group.
pub fn by_separation(candidates: &[Candidate], min_separation_days: i64) -> Vec<Candidate> {
    let mut survivors = Vec::new();
    let mut iter = candidates.iter().copied();
    let Some(first) = iter.next() else {
        return survivors;
    };

    let mut group_best = first;
    let mut previous_date = first.date;
    for candidate in iter {
        let gap = (candidate.date - previous_date).num_days();
        if gap > min_separation_days {
            survivors.push(group_best);
            group_best = candidate;
        } else if candidate.value > group_best.value {
            group_best = candidate;
        }
        previous_date = candidate.date;
    }
    survivors.push(group_best);
    survivors
}

/// Merges consecutive survivors whose inter-peak recession did not fall
/// below `recession_ratio` times the earlier peak.
///
/// The pairwise test walks the chain of survivors in order; each
/// "independent" decision closes the current group. When the inter-peak
/// minimum cannot be computed because every intervening day is missing,
/// the pair is treated as dependent and merged — the conservative default.
pub fn by_flow_ratio(
    series: &[DailyObservation],
    survivors: &[Candidate],
    recession_ratio: f64,
) -> Vec<Candidate> {
    if survivors.len() <= 1 {
        return survivors.to_vec();
    }

    let mut events = Vec::new();
    let mut group_best = survivors[0];
    for pair in survivors.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        let independent = inter_peak_minimum(series, previous.index, current.index)
            .is_some_and(|minimum| previous.value * recession_ratio > minimum);
        if independent {
            events.push(group_best);
            group_best = current;
        } else if current.value > group_best.value {
            group_best = current;
        }
    }
    events.push(group_best);
    events
}

/// Minimum non-missing value of the series strictly between two peak
/// indices. `None` when there are no days between the peaks or all of them
/// are missing.
pub fn inter_peak_minimum(
    series: &[DailyObservation],
    left: usize,
    right: usize,
) -> Option<f64> {
    series
        .get(left + 1..right)?
        .iter()
        .filter_map(|obs| obs.value)
        .fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |best| best.min(v)))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(offset: usize) -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Duration::days(offset as i64)
    }

    fn candidate(index: usize, value: f64) -> Candidate {
        Candidate {
            date: day(index),
            index,
            value,
        }
    }

    fn series_of(values: &[Option<f64>]) -> Vec<DailyObservation> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| DailyObservation::new(day(i), v))
            .collect()
    }

    // --- Temporal declustering ---------------------------------------------

    #[test]
    fn test_separation_merges_close_peaks() {
        // Gap of 3 days with a 6-day separation requirement: one event
        let survivors = by_separation(&[candidate(9, 100.0), candidate(12, 90.0)], 6);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].index, 9, "group maximum is the first peak");
    }

    #[test]
    fn test_separation_keeps_distant_peaks() {
        let survivors = by_separation(&[candidate(9, 100.0), candidate(19, 100.0)], 6);
        assert_eq!(survivors.len(), 2);
    }

    #[test]
    fn test_separation_gap_exactly_at_limit_merges() {
        // Independence requires gap strictly greater than the separation
        let survivors = by_separation(&[candidate(0, 50.0), candidate(6, 80.0)], 6);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].index, 6, "larger peak wins within the group");
    }

    #[test]
    fn test_separation_chains_transitively() {
        // 0 → 5 → 10: each gap is 5 ≤ 6, so all three merge even though
        // the ends are 10 days apart
        let survivors = by_separation(
            &[candidate(0, 50.0), candidate(5, 90.0), candidate(10, 60.0)],
            6,
        );
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].index, 5);
    }

    #[test]
    fn test_separation_tie_keeps_first() {
        let survivors = by_separation(&[candidate(0, 75.0), candidate(3, 75.0)], 6);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].index, 0);
    }

    #[test]
    fn test_separation_empty_and_single() {
        assert!(by_separation(&[], 6).is_empty());
        let one = [candidate(4, 10.0)];
        assert_eq!(by_separation(&one, 6), one.to_vec());
    }

    // --- Inter-peak minimum ------------------------------------------------

    #[test]
    fn test_inter_peak_minimum_is_strictly_between() {
        let series = series_of(&[Some(9.0), Some(2.0), Some(3.0), Some(8.0)]);
        // Endpoints excluded: min over indices 1..=2
        let minimum = inter_peak_minimum(&series, 0, 3).expect("should compute");
        assert!((minimum - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_inter_peak_minimum_skips_missing() {
        let series = series_of(&[Some(9.0), None, Some(3.0), Some(8.0)]);
        let minimum = inter_peak_minimum(&series, 0, 3).expect("should compute");
        assert!((minimum - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_inter_peak_minimum_all_missing_is_none() {
        let series = series_of(&[Some(9.0), None, None, Some(8.0)]);
        assert!(inter_peak_minimum(&series, 0, 3).is_none());
    }

    #[test]
    fn test_inter_peak_minimum_adjacent_peaks_is_none() {
        let series = series_of(&[Some(9.0), Some(8.0)]);
        assert!(inter_peak_minimum(&series, 0, 1).is_none());
    }

    // --- Flow-ratio declustering -------------------------------------------

    #[test]
    fn test_flow_ratio_deep_recession_keeps_both() {
        // 100 * 2/3 = 66.7 > 5 → independent
        let mut values = vec![Some(10.0); 21];
        values[0] = Some(100.0);
        values[10] = Some(5.0);
        values[20] = Some(100.0);
        let series = series_of(&values);
        let survivors = [candidate(0, 100.0), candidate(20, 100.0)];
        let events = by_flow_ratio(&series, &survivors, 2.0 / 3.0);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_flow_ratio_shallow_recession_merges_keeping_first() {
        // 100 * 2/3 = 66.7 > 90 is false → merged; equal peaks, first kept
        let mut values = vec![Some(90.0); 21];
        values[0] = Some(100.0);
        values[20] = Some(100.0);
        let series = series_of(&values);
        let survivors = [candidate(0, 100.0), candidate(20, 100.0)];
        let events = by_flow_ratio(&series, &survivors, 2.0 / 3.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].index, 0, "earlier of two equal peaks is kept");
    }

    #[test]
    fn test_flow_ratio_all_missing_between_merges() {
        let mut values: Vec<Option<f64>> = vec![None; 11];
        values[0] = Some(100.0);
        values[10] = Some(80.0);
        let series = series_of(&values);
        let survivors = [candidate(0, 100.0), candidate(10, 80.0)];
        let events = by_flow_ratio(&series, &survivors, 2.0 / 3.0);
        assert_eq!(events.len(), 1, "unresolvable recession merges the pair");
        assert_eq!(events[0].index, 0);
    }

    #[test]
    fn test_flow_ratio_chain_uses_consecutive_pairs() {
        // Three peaks: first pair merges (shallow recession), second pair
        // is independent (deep recession). Expect two events, the first
        // being the maximum of the merged pair.
        let mut values = vec![Some(60.0); 21];
        values[0] = Some(70.0);
        values[8] = Some(90.0);
        values[14] = Some(5.0);
        values[20] = Some(80.0);
        let series = series_of(&values);
        let survivors = [
            candidate(0, 70.0),
            candidate(8, 90.0),
            candidate(20, 80.0),
        ];
        // Pair (0, 8): 70 * 2/3 = 46.7 > 60 is false → merge.
        // Pair (8, 20): 90 * 2/3 = 60 > 5 → independent.
        let events = by_flow_ratio(&series, &survivors, 2.0 / 3.0);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].index, 8, "merged group keeps its maximum");
        assert_eq!(events[1].index, 20);
    }

    #[test]
    fn test_flow_ratio_single_survivor_is_noop() {
        let series = series_of(&[Some(100.0)]);
        let one = [candidate(0, 100.0)];
        assert_eq!(by_flow_ratio(&series, &one, 0.5), one.to_vec());
        assert!(by_flow_ratio(&series, &[], 0.5).is_empty());
    }
}
