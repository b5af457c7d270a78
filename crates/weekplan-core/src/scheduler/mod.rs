//! Slot allocator for new time blocks.
//!
//! Given a target hour and a duration, scans forward in quantization steps
//! for the first candidate interval that conflicts with no existing block of
//! the day:
//! - Candidates start at the target hour and advance by `step_minutes`
//! - A candidate must end by midnight (hour 24)
//! - The first conflict-free candidate wins; there is no gap-size preference
//!
//! When nothing fits, the allocator falls back to the target hour itself
//! (truncated at midnight). The fallback may overlap existing blocks and is
//! reported as [`Placement::Fallback`] so callers can tell it apart.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::schedule::{DayOfWeek, TimeBlock, TimeInterval, WeeklySchedule, HOURS_PER_DAY};

/// Allocator configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Search granularity in minutes (quarter hour by default)
    pub step_minutes: u32,
}

impl AllocatorConfig {
    /// Step size in hours, with `step_minutes` held to 1..=60.
    pub fn step_hours(&self) -> f64 {
        f64::from(self.step_minutes.clamp(1, 60)) / 60.0
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self { step_minutes: 15 }
    }
}

/// Result of a placement search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "interval", rename_all = "lowercase")]
pub enum Placement {
    /// Conflicts with no existing block of the day
    Free(TimeInterval),
    /// Best-effort slot at the target hour; may overlap existing blocks
    Fallback(TimeInterval),
}

impl Placement {
    pub fn interval(&self) -> TimeInterval {
        match self {
            Placement::Free(iv) | Placement::Fallback(iv) => *iv,
        }
    }

    pub fn is_conflict_free(&self) -> bool {
        matches!(self, Placement::Free(_))
    }
}

/// Finds non-conflicting placements within a day.
#[derive(Debug, Clone, Default)]
pub struct SlotAllocator {
    config: AllocatorConfig,
}

impl SlotAllocator {
    /// Create an allocator with the default quarter-hour step
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: AllocatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Interval for a new block of `duration_minutes` near `target_hour` on `day`.
    pub fn find_slot(
        &self,
        schedule: &WeeklySchedule,
        day: DayOfWeek,
        target_hour: f64,
        duration_minutes: u32,
    ) -> TimeInterval {
        self.place(schedule.day(day), target_hour, duration_minutes)
            .interval()
    }

    /// Search `blocks` for the first conflict-free slot at or after `target_hour`.
    ///
    /// # Arguments
    /// * `blocks` - Existing blocks of the day
    /// * `target_hour` - Preferred start; clamped into `[0, 24 - step]`
    /// * `duration_minutes` - Length of the new block; zero counts as one step
    ///
    /// # Returns
    /// The placement, always with `end > start`
    pub fn place(&self, blocks: &[TimeBlock], target_hour: f64, duration_minutes: u32) -> Placement {
        let step = self.config.step_hours();
        let target = clamp_target(target_hour, step);
        let duration = if duration_minutes == 0 {
            step
        } else {
            f64::from(duration_minutes) / 60.0
        };

        // Candidates are computed from the step index so non-binary step
        // sizes do not accumulate rounding error.
        let mut k: u32 = 0;
        loop {
            let start = target + f64::from(k) * step;
            let end = start + duration;
            if end > HOURS_PER_DAY {
                break;
            }

            let conflict = blocks
                .iter()
                .any(|b| b.interval.overlaps_range(start, end));

            if !conflict {
                debug!(target_hour = target, start, end, "found free slot");
                return Placement::Free(TimeInterval::between(start, end));
            }
            k += 1;
        }

        let end = (target + duration).min(HOURS_PER_DAY);
        warn!(
            target_hour = target,
            duration_minutes, "no conflict-free slot before midnight, using fallback"
        );
        // target < 24 and duration > 0, so the range is never empty
        Placement::Fallback(TimeInterval::between(target, end))
    }
}

fn clamp_target(target_hour: f64, step: f64) -> f64 {
    if target_hour.is_nan() {
        return 0.0;
    }
    target_hour.clamp(0.0, HOURS_PER_DAY - step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str, start: f64, end: f64) -> TimeBlock {
        TimeBlock {
            id: id.to_string(),
            activity: id.to_string(),
            category: "Other".to_string(),
            color: "#9CA3AF".to_string(),
            day: None,
            interval: TimeInterval::new(start, end).unwrap(),
        }
    }

    fn slot(p: Placement) -> (f64, f64) {
        let iv = p.interval();
        (iv.start_hour(), iv.end_hour())
    }

    #[test]
    fn empty_day_returns_target_exactly() {
        let allocator = SlotAllocator::new();
        let p = allocator.place(&[], 14.0, 30);
        assert!(p.is_conflict_free());
        assert_eq!(slot(p), (14.0, 14.5));
    }

    #[test]
    fn skips_past_conflicting_block() {
        let allocator = SlotAllocator::new();
        let p = allocator.place(&[block("a", 9.0, 10.0)], 9.0, 30);
        assert_eq!(slot(p), (10.0, 10.5));
    }

    #[test]
    fn finds_quarter_hour_gap_between_blocks() {
        let allocator = SlotAllocator::new();
        let blocks = [block("a", 9.0, 9.25), block("b", 9.75, 11.0)];
        // 30 minutes fits exactly into [9.25, 9.75)
        assert_eq!(slot(allocator.place(&blocks, 9.0, 30)), (9.25, 9.75));
        // 45 minutes does not; next fit is after b
        assert_eq!(slot(allocator.place(&blocks, 9.0, 45)), (11.0, 11.75));
    }

    #[test]
    fn never_searches_backwards() {
        let allocator = SlotAllocator::new();
        let blocks = [block("a", 10.0, 11.0)];
        assert_eq!(slot(allocator.place(&blocks, 10.5, 60)), (11.0, 12.0));
    }

    #[test]
    fn block_may_end_exactly_at_midnight() {
        let allocator = SlotAllocator::new();
        let blocks = [block("a", 0.0, 23.0)];
        let p = allocator.place(&blocks, 20.0, 60);
        assert!(p.is_conflict_free());
        assert_eq!(slot(p), (23.0, 24.0));
    }

    #[test]
    fn full_day_falls_back_to_target() {
        let allocator = SlotAllocator::new();
        let blocks = [block("a", 0.0, 24.0)];
        let p = allocator.place(&blocks, 14.0, 60);
        assert!(!p.is_conflict_free());
        assert_eq!(slot(p), (14.0, 15.0));
    }

    #[test]
    fn fallback_truncates_at_midnight() {
        let allocator = SlotAllocator::new();
        let p = allocator.place(&[], 23.0, 120);
        assert_eq!(p, Placement::Fallback(TimeInterval::new(23.0, 24.0).unwrap()));
    }

    #[test]
    fn zero_duration_counts_as_one_step() {
        let allocator = SlotAllocator::new();
        assert_eq!(slot(allocator.place(&[], 8.0, 0)), (8.0, 8.25));
    }

    #[test]
    fn out_of_range_target_is_clamped() {
        let allocator = SlotAllocator::new();
        assert_eq!(slot(allocator.place(&[], -3.0, 60)), (0.0, 1.0));
        assert_eq!(slot(allocator.place(&[], 30.0, 15)), (23.75, 24.0));
        assert_eq!(slot(allocator.place(&[], f64::NAN, 15)), (0.0, 0.25));
    }

    #[test]
    fn custom_step_size() {
        let allocator = SlotAllocator::with_config(AllocatorConfig { step_minutes: 60 });
        let blocks = [block("a", 9.0, 9.5)];
        assert_eq!(slot(allocator.place(&blocks, 9.0, 30)), (10.0, 10.5));
    }

    #[test]
    fn find_slot_reads_only_the_requested_day() {
        let mut week = WeeklySchedule::empty();
        week.day_mut(DayOfWeek::MONDAY).push(block("m", 9.0, 10.0));
        let allocator = SlotAllocator::new();
        let tuesday = allocator.find_slot(&week, DayOfWeek::TUESDAY, 9.0, 30);
        assert_eq!((tuesday.start_hour(), tuesday.end_hour()), (9.0, 9.5));
        let monday = allocator.find_slot(&week, DayOfWeek::MONDAY, 9.0, 30);
        assert_eq!((monday.start_hour(), monday.end_hour()), (10.0, 10.5));
    }
}
