//! Running totals over a timeline

use super::{BucketMap, Timeline};

/// Cumulative record count at the end of each month of `timeline`
///
/// Months without a bucket contribute zero. The result has one entry per
/// timeline month and never decreases.
pub fn cumulative_totals(timeline: &Timeline, buckets: &BucketMap) -> Vec<u64> {
    timeline
        .iter()
        .scan(0u64, |running, month| {
            *running += buckets.get(month).copied().unwrap_or(0);
            Some(*running)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::testing::{at, record, Rec};
    use crate::growth::{bucket_by_month, MonthKey};

    #[test]
    fn test_gap_months_carry_total() {
        let records = vec![
            record("2024-01-05T00:00:00Z", true),
            record("2024-01-20T00:00:00Z", true),
            record("2024-03-02T00:00:00Z", true),
        ];
        let timeline = Timeline::for_records(&records, at("2024-03-31T00:00:00Z")).unwrap();

        let totals = cumulative_totals(&timeline, &bucket_by_month(&records));
        assert_eq!(totals, vec![2, 2, 3]);
    }

    #[test]
    fn test_single_record() {
        let records = vec![record("2024-06-15T00:00:00Z", false)];
        let timeline = Timeline::for_records(&records, at("2024-06-20T00:00:00Z")).unwrap();

        assert_eq!(cumulative_totals(&timeline, &bucket_by_month(&records)), vec![1]);
    }

    #[test]
    fn test_empty_buckets_are_zero() {
        let start: MonthKey = "2024-01".parse().unwrap();
        let end: MonthKey = "2024-04".parse().unwrap();
        let totals = cumulative_totals(&Timeline::between(start, end), &BucketMap::new());
        assert_eq!(totals, vec![0, 0, 0, 0]);
    }

    proptest::proptest! {
        #[test]
        fn test_non_decreasing_and_ends_at_total(
            days in proptest::collection::vec(0i64..1500, 1..80),
            extra_days in 0i64..400,
        ) {
            let base = at("2021-01-01T00:00:00Z");
            let records: Vec<Rec> = days
                .iter()
                .map(|d| Rec { created_at: base + chrono::Duration::days(*d), active: d % 2 == 0 })
                .collect();
            let now = base + chrono::Duration::days(1500 + extra_days);

            let timeline = Timeline::for_records(&records, now).unwrap();
            let totals = cumulative_totals(&timeline, &bucket_by_month(&records));

            proptest::prop_assert_eq!(totals.len(), timeline.len());
            proptest::prop_assert!(totals.windows(2).all(|w| w[0] <= w[1]));
            proptest::prop_assert_eq!(totals.last().copied(), Some(records.len() as u64));

            let months = timeline.months();
            proptest::prop_assert!(months.windows(2).all(|w| w[0].succ() == w[1]));
            let earliest = records.iter().map(|r| r.created_at).min().unwrap();
            proptest::prop_assert_eq!(timeline.first(), Some(MonthKey::of(earliest)));
        }
    }
}
