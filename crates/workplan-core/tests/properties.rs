//! Property tests for compaction and interval arithmetic.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use workplan_core::calendar::{is_working_day, nth_working_day_from};
use workplan_core::{AllocationCompactor, TimeInterval};

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 1, 2).unwrap()
}

/// Strictly ascending allocation days with hours in 3..6.
///
/// Small gaps and a narrow hours range make runs of matching cadence and
/// hours common enough to exercise merging.
fn allocation_days() -> impl Strategy<Value = Vec<(NaiveDate, u32)>> {
    (0i64..700, prop::collection::vec((1i64..5, 3u32..6), 1..40)).prop_map(|(offset, steps)| {
        let mut day = epoch() + Duration::days(offset);
        let mut days = Vec::with_capacity(steps.len());
        for (i, (gap, hours)) in steps.into_iter().enumerate() {
            if i > 0 {
                day += Duration::days(gap);
            }
            days.push((day, hours));
        }
        days
    })
}

fn interval() -> impl Strategy<Value = TimeInterval> {
    (0i64..400, 1i64..60).prop_map(|(offset, len)| {
        let start = epoch() + Duration::days(offset);
        TimeInterval::new(start, start + Duration::days(len)).unwrap()
    })
}

proptest! {
    #[test]
    fn prop_compaction_partitions_input(days in allocation_days()) {
        let runs = AllocationCompactor::new().compact(&days).unwrap();

        for (day, hours) in &days {
            let owners: Vec<_> = runs.iter().filter(|r| r.interval.contains(*day)).collect();
            prop_assert_eq!(owners.len(), 1);
            prop_assert_eq!(owners[0].hours, *hours);
        }

        for pair in runs.windows(2) {
            prop_assert!(pair[0].interval.end_exclusive() <= pair[1].interval.start_inclusive());
        }

        // Each run starts on an input day and ends the day after one.
        for r in &runs {
            prop_assert!(days.iter().any(|(d, _)| *d == r.interval.start_inclusive()));
            let last = r.interval.end_exclusive().pred_opt().unwrap();
            prop_assert!(days.iter().any(|(d, _)| *d == last));
        }
    }

    #[test]
    fn prop_runs_break_exactly_where_merge_rule_fails(days in allocation_days()) {
        let runs = AllocationCompactor::new().compact(&days).unwrap();
        let breaks = days
            .windows(2)
            .filter(|p| {
                let expected = nth_working_day_from(2, p[0].0).unwrap();
                p[1].0 != expected || p[1].1 != p[0].1
            })
            .count();
        prop_assert_eq!(runs.len(), breaks + 1);
    }

    #[test]
    fn prop_intersection_is_symmetric(a in interval(), b in interval()) {
        prop_assert_eq!(a.intersect(&b), b.intersect(&a));
        if let Some(i) = a.intersect(&b) {
            prop_assert!(i.working_days() <= a.working_days().min(b.working_days()));
        }
    }

    #[test]
    fn prop_working_days_non_negative_and_bounded(i in interval()) {
        let wd = i.working_days();
        prop_assert!(wd >= 0);
        prop_assert!(wd <= i.duration_days());
        let expected = i.iter_days().filter(|d| is_working_day(*d)).count() as i64;
        prop_assert_eq!(wd, expected);
    }

    #[test]
    fn prop_weekend_interval_has_no_working_days(week in 0i64..100) {
        let saturday = NaiveDate::from_ymd_opt(2017, 1, 7).unwrap() + Duration::weeks(week);
        let weekend = TimeInterval::new(saturday, saturday + Duration::days(2)).unwrap();
        prop_assert_eq!(weekend.working_days(), 0);
    }
}
