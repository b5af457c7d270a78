//! Schedule store: the single owner of the in-memory weekly schedule.
//!
//! Every mutation is scoped to one day and one block id and reports what it
//! did through [`StoreOutcome`]. Rejections and missing ids leave the
//! schedule untouched.
//!
//! Under the default [`OverlapPolicy::Allow`] the store performs no overlap
//! checks: overlap avoidance belongs to the slot allocator at drop time, and
//! direct inserts or editor updates may create overlapping blocks.
//! [`OverlapPolicy::Reject`] enforces the no-overlap rule on every mutation.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::schedule::{DayOfWeek, DayTemplate, TimeBlock, TimeInterval, WeeklySchedule};

/// How the store treats mutations that would overlap another block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Accept overlapping inserts and edits
    #[default]
    Allow,
    /// Reject any insert or edit that would overlap another block of the day
    Reject,
}

/// Why a mutation was not applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// New end is not strictly after new start
    InvalidRange { start: f64, end: f64 },
    /// Mutation would overlap `with` under [`OverlapPolicy::Reject`]
    Conflict { with: String },
}

/// Result of a store mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StoreOutcome {
    Applied,
    Rejected(RejectReason),
    NotFound,
}

impl StoreOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, StoreOutcome::Applied)
    }
}

/// Owns the weekly schedule and exposes its three mutations.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleStore {
    schedule: WeeklySchedule,
    policy: OverlapPolicy,
}

impl ScheduleStore {
    /// A store whose every day is a clone of `template`.
    pub fn new(template: &DayTemplate, policy: OverlapPolicy) -> Self {
        Self {
            schedule: WeeklySchedule::from_template(template),
            policy,
        }
    }

    /// A store with seven empty days.
    pub fn empty(policy: OverlapPolicy) -> Self {
        Self {
            schedule: WeeklySchedule::empty(),
            policy,
        }
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub fn blocks(&self, day: DayOfWeek) -> &[TimeBlock] {
        self.schedule.day(day)
    }

    pub fn get(&self, day: DayOfWeek, block_id: &str) -> Option<&TimeBlock> {
        self.schedule.find(day, block_id)
    }

    /// Append `block` to `day`.
    ///
    /// The block's `day` field is stamped with `day` so the block always
    /// agrees with the sequence that holds it.
    pub fn insert(&mut self, day: DayOfWeek, mut block: TimeBlock) -> StoreOutcome {
        if let Some(conflict) = self.policy_conflict(day, None, &block.interval) {
            warn!(%day, block_id = %block.id, with = %conflict, "insert rejected: overlap");
            return StoreOutcome::Rejected(RejectReason::Conflict { with: conflict });
        }

        if block.day.is_some_and(|d| d != day) {
            warn!(%day, block_id = %block.id, "block day disagrees with target day, restamping");
        }
        block.day = Some(day);

        info!(%day, block_id = %block.id, interval = %block.interval, "block inserted");
        self.schedule.day_mut(day).push(block);
        StoreOutcome::Applied
    }

    /// Retime (and optionally rename) a block in place.
    ///
    /// Identity, category, color and day are kept. An empty or absent
    /// `new_activity` keeps the current activity.
    pub fn update(
        &mut self,
        day: DayOfWeek,
        block_id: &str,
        new_start: f64,
        new_end: f64,
        new_activity: Option<&str>,
    ) -> StoreOutcome {
        let interval = match TimeInterval::new(new_start, new_end) {
            Ok(iv) => iv,
            Err(_) => {
                warn!(%day, block_id, new_start, new_end, "edit rejected: invalid range");
                return StoreOutcome::Rejected(RejectReason::InvalidRange {
                    start: new_start,
                    end: new_end,
                });
            }
        };

        if self.schedule.find(day, block_id).is_none() {
            return StoreOutcome::NotFound;
        }

        if let Some(conflict) = self.policy_conflict(day, Some(block_id), &interval) {
            warn!(%day, block_id, with = %conflict, "edit rejected: overlap");
            return StoreOutcome::Rejected(RejectReason::Conflict { with: conflict });
        }

        let Some(block) = self
            .schedule
            .day_mut(day)
            .iter_mut()
            .find(|b| b.id == block_id)
        else {
            return StoreOutcome::NotFound;
        };

        block.interval = interval;
        if let Some(activity) = new_activity.filter(|a| !a.is_empty()) {
            block.activity = activity.to_string();
        }
        info!(%day, block_id, %interval, "block updated");
        StoreOutcome::Applied
    }

    /// Delete a block. Removing an unknown id is a no-op.
    pub fn remove(&mut self, day: DayOfWeek, block_id: &str) -> StoreOutcome {
        let blocks = self.schedule.day_mut(day);
        let before = blocks.len();
        blocks.retain(|b| b.id != block_id);

        if blocks.len() == before {
            StoreOutcome::NotFound
        } else {
            info!(%day, block_id, "block removed");
            StoreOutcome::Applied
        }
    }

    /// Id of the first block that `interval` would overlap, when the policy
    /// forbids overlaps. `ignore` excludes the block being edited.
    fn policy_conflict(
        &self,
        day: DayOfWeek,
        ignore: Option<&str>,
        interval: &TimeInterval,
    ) -> Option<String> {
        if self.policy == OverlapPolicy::Allow {
            return None;
        }
        self.schedule
            .day(day)
            .iter()
            .filter(|b| Some(b.id.as_str()) != ignore)
            .find(|b| b.interval.overlaps(interval))
            .map(|b| b.id.clone())
    }
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new(&DayTemplate::standard(), OverlapPolicy::Allow)
    }
}
