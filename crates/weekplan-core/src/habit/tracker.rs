//! Habit completion and streak tracking, keyed by calendar date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::catalog::HabitTemplate;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub streak: u32,
    pub completed_dates: Vec<NaiveDate>,
    pub is_active: bool,
    pub target: u32,
    pub unit: String,
}

impl Habit {
    fn new(name: String, description: String, category: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description,
            category,
            streak: 0,
            completed_dates: Vec::new(),
            is_active: true,
            target: 1,
            unit: "times".to_string(),
        }
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Percentage of days completed since the first completion, inclusive
    /// of both ends.
    pub fn completion_rate(&self, today: NaiveDate) -> u32 {
        let Some(first) = self.completed_dates.iter().min() else {
            return 0;
        };
        let days = ((today - *first).num_days() + 1).max(1) as f64;
        (self.completed_dates.len() as f64 / days * 100.0).round() as u32
    }
}

/// Aggregate counters for the tracker overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSummary {
    pub active: usize,
    pub completed_today: usize,
    pub longest_streak: u32,
    pub total_completions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitTracker {
    habits: Vec<Habit>,
}

impl HabitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Start tracking a habit based on a catalog template. Returns its id.
    pub fn add_from_template(&mut self, template: &HabitTemplate) -> String {
        self.push(Habit::new(
            template.name.clone(),
            template.description.clone(),
            template.category.clone(),
        ))
    }

    /// Start tracking a user-defined habit. Returns its id.
    pub fn add_custom(&mut self, name: &str, description: &str) -> String {
        self.push(Habit::new(name.to_string(), description.to_string(), "Custom".to_string()))
    }

    fn push(&mut self, habit: Habit) -> String {
        let id = habit.id.clone();
        info!(habit_id = %id, name = %habit.name, "habit added");
        self.habits.push(habit);
        id
    }

    /// Mark a habit done for `date`.
    ///
    /// Returns `Ok(false)` when it was already completed that day; the
    /// streak only grows once per date.
    pub fn complete(&mut self, id: &str, date: NaiveDate) -> Result<bool, ValidationError> {
        let habit = self
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| ValidationError::UnknownHabit(id.to_string()))?;

        if habit.is_completed_on(date) {
            return Ok(false);
        }
        habit.completed_dates.push(date);
        habit.streak += 1;
        Ok(true)
    }

    /// Stop tracking a habit. Unknown ids are ignored.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        self.habits.len() != before
    }

    /// Whether habit `id` was done on `date`. Unknown ids are never done.
    pub fn is_completed_on(&self, id: &str, date: NaiveDate) -> bool {
        self.get(id).is_some_and(|h| h.is_completed_on(date))
    }

    pub fn completion_rate(&self, id: &str, today: NaiveDate) -> Option<u32> {
        self.get(id).map(|h| h.completion_rate(today))
    }

    pub fn summary(&self, today: NaiveDate) -> HabitSummary {
        HabitSummary {
            active: self.habits.iter().filter(|h| h.is_active).count(),
            completed_today: self.habits.iter().filter(|h| h.is_completed_on(today)).count(),
            longest_streak: self.habits.iter().map(|h| h.streak).max().unwrap_or(0),
            total_completions: self.habits.iter().map(|h| h.completed_dates.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::HabitCatalog;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn complete_once_per_day() {
        let mut tracker = HabitTracker::new();
        let id = tracker.add_custom("Stretch", "Five minutes");
        let day = date(2024, 3, 1);

        assert_eq!(tracker.complete(&id, day), Ok(true));
        assert_eq!(tracker.complete(&id, day), Ok(false));
        assert_eq!(tracker.get(&id).unwrap().streak, 1);

        assert_eq!(tracker.complete(&id, date(2024, 3, 2)), Ok(true));
        assert_eq!(tracker.get(&id).unwrap().streak, 2);
    }

    #[test]
    fn complete_unknown_habit_errors() {
        let mut tracker = HabitTracker::new();
        assert_eq!(
            tracker.complete("missing", date(2024, 1, 1)),
            Err(ValidationError::UnknownHabit("missing".into()))
        );
    }

    #[test]
    fn completion_rate_counts_inclusive_days() {
        let mut tracker = HabitTracker::new();
        let id = tracker.add_custom("Read", "");
        assert_eq!(tracker.get(&id).unwrap().completion_rate(date(2024, 1, 1)), 0);

        tracker.complete(&id, date(2024, 1, 1)).unwrap();
        assert_eq!(tracker.get(&id).unwrap().completion_rate(date(2024, 1, 1)), 100);

        tracker.complete(&id, date(2024, 1, 3)).unwrap();
        // 2 of 4 days
        assert_eq!(tracker.get(&id).unwrap().completion_rate(date(2024, 1, 4)), 50);
    }

    #[test]
    fn template_habits_inherit_metadata() {
        let catalog = HabitCatalog::standard();
        let mut tracker = HabitTracker::new();
        let id = tracker.add_from_template(catalog.get("9").unwrap());
        let habit = tracker.get(&id).unwrap();
        assert_eq!(habit.name, "Gratitude journal");
        assert_eq!(habit.category, "Mindfulness");
        assert!(habit.is_active);
    }

    #[test]
    fn summary_and_remove() {
        let mut tracker = HabitTracker::new();
        let a = tracker.add_custom("A", "");
        let b = tracker.add_custom("B", "");
        let today = date(2024, 5, 10);
        tracker.complete(&a, date(2024, 5, 9)).unwrap();
        tracker.complete(&a, today).unwrap();
        tracker.complete(&b, today).unwrap();

        assert_eq!(
            tracker.summary(today),
            HabitSummary { active: 2, completed_today: 2, longest_streak: 2, total_completions: 3 }
        );

        assert!(tracker.is_completed_on(&a, date(2024, 5, 9)));
        assert!(!tracker.is_completed_on(&b, date(2024, 5, 9)));
        assert!(!tracker.is_completed_on("missing", today));
        assert_eq!(tracker.completion_rate(&a, today), Some(100));
        assert_eq!(tracker.completion_rate("missing", today), None);

        assert!(tracker.remove(&b));
        assert!(!tracker.remove(&b));
        assert_eq!(tracker.summary(today).active, 1);
    }
}
