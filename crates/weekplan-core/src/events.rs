use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::{DayOfWeek, TimeInterval};
use crate::store::RejectReason;

/// Every transition of the placement controller produces an Event.
/// Front ends render from these; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A template was picked up.
    DragStarted {
        template_id: String,
        day: DayOfWeek,
        at: DateTime<Utc>,
    },
    /// A drop created a new block.
    BlockPlaced {
        day: DayOfWeek,
        block_id: String,
        template_id: String,
        interval: TimeInterval,
        /// False when the allocator had to fall back to a possibly
        /// overlapping slot.
        conflict_free: bool,
        at: DateTime<Utc>,
    },
    /// A drop reached the store but the store refused the block.
    PlacementRejected {
        day: DayOfWeek,
        template_id: String,
        reason: RejectReason,
        at: DateTime<Utc>,
    },
    /// The drag ended without a valid drop target.
    DragCancelled {
        template_id: String,
        at: DateTime<Utc>,
    },
}
