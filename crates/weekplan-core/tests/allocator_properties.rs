//! Property tests for interval overlap and slot allocation.

use proptest::prelude::*;
use weekplan_core::{
    AllocatorConfig, CategoryRegistry, DayOfWeek, OverlapPolicy, Placement, ScheduleStore,
    SlotAllocator, TimeBlock, TimeInterval, AnalyticsAggregator, AnalyticsContext, TimeCategory,
};

fn interval() -> impl Strategy<Value = TimeInterval> {
    (0u32..95, 1u32..32).prop_map(|(start, len)| {
        let end = (start + len).min(96);
        TimeInterval::new(f64::from(start) / 4.0, f64::from(end) / 4.0).unwrap()
    })
}

fn blocks() -> impl Strategy<Value = Vec<TimeBlock>> {
    prop::collection::vec(interval(), 0..12).prop_map(|intervals| {
        intervals
            .into_iter()
            .enumerate()
            .map(|(i, interval)| TimeBlock {
                id: format!("1-{i}"),
                activity: format!("block {i}"),
                category: "Work".to_string(),
                color: "#3B82F6".to_string(),
                day: Some(DayOfWeek::MONDAY),
                interval,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in interval(), b in interval()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn non_empty_interval_overlaps_itself(a in interval()) {
        prop_assert!(a.overlaps(&a));
    }

    #[test]
    fn touching_intervals_do_not_overlap(start in 0u32..90, len_a in 1u32..4, len_b in 1u32..4) {
        let mid = start + len_a;
        let a = TimeInterval::new(f64::from(start) / 4.0, f64::from(mid) / 4.0).unwrap();
        let b = TimeInterval::new(f64::from(mid) / 4.0, f64::from(mid + len_b) / 4.0).unwrap();
        prop_assert!(!a.overlaps(&b));
    }

    #[test]
    fn placement_always_has_positive_length(
        existing in blocks(),
        target in -10.0f64..40.0,
        minutes in 0u32..2000,
        step in 0u32..90,
    ) {
        let allocator = SlotAllocator::with_config(AllocatorConfig { step_minutes: step });
        let interval = allocator.place(&existing, target, minutes).interval();
        prop_assert!(interval.end_hour() > interval.start_hour());
        prop_assert!(interval.start_hour() >= 0.0);
    }

    #[test]
    fn free_placement_never_overlaps(existing in blocks(), target in 0u32..24, minutes in 1u32..180) {
        let placement = SlotAllocator::new().place(&existing, f64::from(target), minutes);
        if let Placement::Free(interval) = placement {
            prop_assert!(existing.iter().all(|b| !b.interval.overlaps(&interval)));
            prop_assert!(interval.start_hour() >= f64::from(target));
            prop_assert!(interval.end_hour() <= 24.0);
        }
    }

    #[test]
    fn empty_day_places_exactly_at_target(target in 0u32..24, minutes in 1u32..600) {
        let target = f64::from(target);
        prop_assume!(target + f64::from(minutes) / 60.0 <= 24.0);

        let placement = SlotAllocator::new().place(&[], target, minutes);
        prop_assert!(placement.is_conflict_free());
        prop_assert_eq!(placement.interval().start_hour(), target);
        prop_assert_eq!(placement.interval().end_hour(), target + f64::from(minutes) / 60.0);
    }

    #[test]
    fn remove_is_idempotent(id in 0usize..11) {
        let mut store = ScheduleStore::default();
        let block_id = format!("1-{}", id + 1);
        prop_assert!(store.remove(DayOfWeek::MONDAY, &block_id).is_applied());
        let after_first = store.clone();
        store.remove(DayOfWeek::MONDAY, &block_id);
        prop_assert_eq!(store, after_first);
    }

    #[test]
    fn repeated_edit_is_idempotent(start in 0u32..90, len in 1u32..6) {
        let mut store = ScheduleStore::empty(OverlapPolicy::Allow);
        store.insert(DayOfWeek::FRIDAY, TimeBlock {
            id: "5-x".to_string(),
            activity: "x".to_string(),
            category: "Work".to_string(),
            color: "#3B82F6".to_string(),
            day: None,
            interval: TimeInterval::new(1.0, 2.0).unwrap(),
        });
        let (s, e) = (f64::from(start) / 4.0, f64::from(start + len) / 4.0);
        store.update(DayOfWeek::FRIDAY, "5-x", s, e, Some("y"));
        let once = store.clone();
        store.update(DayOfWeek::FRIDAY, "5-x", s, e, Some("y"));
        prop_assert_eq!(store, once);
    }

    #[test]
    fn pie_sweeps_sum_to_full_circle(minutes in prop::collection::vec(0u32..600, 1..12)) {
        prop_assume!(minutes.iter().any(|m| *m > 0));
        let categories = minutes
            .iter()
            .enumerate()
            .map(|(i, m)| TimeCategory::new(&format!("c{i}"), "#000000", *m, 0))
            .collect();
        let registry = CategoryRegistry::new(categories, Vec::new());
        let breakdown = AnalyticsAggregator::default().breakdown(&registry, AnalyticsContext::Weekday);

        let total: f64 = breakdown.slices.iter().map(|s| s.sweep).sum();
        prop_assert!((total - 360.0).abs() < 1e-6);
        prop_assert_eq!(breakdown.slices.len(), minutes.len());
    }
}
