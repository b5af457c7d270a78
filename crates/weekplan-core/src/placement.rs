//! Placement controller: the drag-and-drop protocol as a state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging -> Dropped -> Idle
//!            \-> (cancel) -> Idle
//! ```
//!
//! `Dropped` is transient: a drop immediately asks the allocator for a slot,
//! inserts the new block into the store, and returns to `Idle`. Hovering
//! over a cell never mutates anything.
//!
//! ## Usage
//!
//! ```ignore
//! let mut controller = PlacementController::new(DayOfWeek::MONDAY);
//! controller.begin_drag(template.clone());
//! let event = controller.drop_on(14, &mut store, &registry, &allocator);
//! ```

use chrono::Utc;
use tracing::{debug, info};

use crate::category::CategoryRegistry;
use crate::events::Event;
use crate::habit::HabitTemplate;
use crate::schedule::{DayOfWeek, TimeBlock};
use crate::scheduler::SlotAllocator;
use crate::store::{ScheduleStore, StoreOutcome};

/// Number of hour cells a template can be dropped on.
pub const HOUR_CELLS: u8 = 24;

#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Idle,
    /// A template has been picked up and is held until drop or cancel.
    Dragging(HabitTemplate),
    /// A drop is being applied.
    Dropped,
}

/// Bridges a drag source (template) and a drop target (hour cell).
#[derive(Debug, Clone)]
pub struct PlacementController {
    state: DragState,
    selected_day: DayOfWeek,
}

impl PlacementController {
    pub fn new(selected_day: DayOfWeek) -> Self {
        Self {
            state: DragState::Idle,
            selected_day,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn selected_day(&self) -> DayOfWeek {
        self.selected_day
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Whether dropping on `hour` right now would be accepted.
    ///
    /// Purely a hover affordance; never changes state.
    pub fn drag_over(&self, hour: u8) -> bool {
        self.is_dragging() && hour < HOUR_CELLS
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change the day that drops land on.
    pub fn select_day(&mut self, day: DayOfWeek) {
        self.selected_day = day;
    }

    /// Pick up a template. Replaces any template already being dragged.
    pub fn begin_drag(&mut self, template: HabitTemplate) -> Event {
        debug!(template_id = %template.id, day = %self.selected_day, "drag started");
        let event = Event::DragStarted {
            template_id: template.id.clone(),
            day: self.selected_day,
            at: Utc::now(),
        };
        self.state = DragState::Dragging(template);
        event
    }

    /// Drop the held template on `hour` of the selected day.
    ///
    /// Returns `None` when nothing is being dragged. A drop outside the
    /// 24 hour cells cancels the drag.
    pub fn drop_on(
        &mut self,
        hour: u8,
        store: &mut ScheduleStore,
        registry: &CategoryRegistry,
        allocator: &SlotAllocator,
    ) -> Option<Event> {
        if !self.is_dragging() {
            return None;
        }
        if hour >= HOUR_CELLS {
            return self.cancel();
        }

        let DragState::Dragging(template) = std::mem::replace(&mut self.state, DragState::Dropped)
        else {
            return None;
        };

        let day = self.selected_day;
        let placement = allocator.place(store.blocks(day), f64::from(hour), template.duration_minutes);
        let interval = placement.interval();

        let block = TimeBlock {
            id: format!("{}-{}", day.index(), uuid::Uuid::now_v7()),
            activity: template.name.clone(),
            category: template.category.clone(),
            color: registry.color_for(&template.category).to_string(),
            day: Some(day),
            interval,
        };
        let block_id = block.id.clone();

        let event = match store.insert(day, block) {
            StoreOutcome::Rejected(reason) => Event::PlacementRejected {
                day,
                template_id: template.id,
                reason,
                at: Utc::now(),
            },
            _ => {
                info!(%day, %block_id, %interval, conflict_free = placement.is_conflict_free(), "template placed");
                Event::BlockPlaced {
                    day,
                    block_id,
                    template_id: template.id,
                    interval,
                    conflict_free: placement.is_conflict_free(),
                    at: Utc::now(),
                }
            }
        };

        self.state = DragState::Idle;
        Some(event)
    }

    /// Abandon the drag without touching the schedule.
    pub fn cancel(&mut self) -> Option<Event> {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging(template) => {
                debug!(template_id = %template.id, "drag cancelled");
                Some(Event::DragCancelled {
                    template_id: template.id,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }
}

impl Default for PlacementController {
    fn default() -> Self {
        Self::new(DayOfWeek::MONDAY)
    }
}
