//! Habit templates and the completion tracker.
//!
//! Both are plain CRUD collaborators of the scheduler: templates are the
//! drag payload for placement, and the tracker counts completions per date.

mod catalog;
mod tracker;

pub use catalog::{Difficulty, HabitCatalog, HabitTemplate};
pub use tracker::{Habit, HabitSummary, HabitTracker};
