//! # Weekplan Core Library
//!
//! Core logic for a weekly time-block planner: a seven-day schedule of
//! labeled intervals, edited by dropping habit templates onto an hour grid
//! and by retiming blocks directly.
//!
//! ## Architecture
//!
//! - **Schedule**: Time intervals, blocks and the in-memory week
//! - **Slot Allocator**: Finds a conflict-free slot for a dropped template
//! - **Schedule Store**: Owns the week and applies inserts, edits and removals
//! - **Placement Controller**: The drag-and-drop state machine
//! - **Layout / Analytics**: Pure projections for rendering
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`SlotAllocator`]: Forward scan for a free slot
//! - [`ScheduleStore`]: Single owner of the weekly schedule
//! - [`PlacementController`]: Drag/drop protocol
//! - [`PlannerSession`]: Everything wired together from a [`Config`]

pub mod analytics;
pub mod category;
pub mod error;
pub mod events;
pub mod habit;
pub mod layout;
pub mod placement;
pub mod schedule;
pub mod scheduler;
pub mod session;
pub mod storage;
pub mod store;

pub use analytics::{AnalyticsAggregator, AnalyticsContext, CategoryBreakdown, PieGeometry, PieSlice};
pub use category::{CategoryRegistry, TimeCategory, FALLBACK_COLOR};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use habit::{Difficulty, Habit, HabitCatalog, HabitSummary, HabitTemplate, HabitTracker};
pub use layout::{GridCell, GridColumn, LayoutConfig, LayoutProjector};
pub use placement::{DragState, PlacementController};
pub use schedule::{
    format_clock, parse_clock, DayOfWeek, DayTemplate, TemplateBlock, TimeBlock, TimeInterval,
    WeeklySchedule,
};
pub use scheduler::{AllocatorConfig, Placement, SlotAllocator};
pub use session::PlannerSession;
pub use storage::Config;
pub use store::{OverlapPolicy, RejectReason, ScheduleStore, StoreOutcome};
