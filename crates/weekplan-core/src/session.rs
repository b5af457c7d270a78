//! One planning session: every component wired together from [`Config`].
//!
//! Front ends talk to a [`PlannerSession`] instead of juggling the store,
//! allocator and controller themselves. All state is in memory and lives
//! as long as the session.

use chrono::NaiveDate;

use crate::analytics::{AnalyticsAggregator, AnalyticsContext, CategoryBreakdown};
use crate::category::CategoryRegistry;
use crate::error::ValidationError;
use crate::events::Event;
use crate::habit::{HabitCatalog, HabitTemplate, HabitTracker};
use crate::layout::{GridColumn, LayoutProjector};
use crate::placement::PlacementController;
use crate::schedule::{parse_clock, DayOfWeek, DayTemplate, TimeBlock};
use crate::scheduler::SlotAllocator;
use crate::storage::Config;
use crate::store::{ScheduleStore, StoreOutcome};

#[derive(Debug, Clone)]
pub struct PlannerSession {
    registry: CategoryRegistry,
    catalog: HabitCatalog,
    store: ScheduleStore,
    allocator: SlotAllocator,
    controller: PlacementController,
    layout: LayoutProjector,
    analytics: AnalyticsAggregator,
    tracker: HabitTracker,
}

impl PlannerSession {
    /// A fresh week seeded from the standard day template.
    pub fn new(config: &Config) -> Self {
        Self::with_template(config, &DayTemplate::standard())
    }

    pub fn with_template(config: &Config, template: &DayTemplate) -> Self {
        Self {
            registry: CategoryRegistry::standard(),
            catalog: HabitCatalog::standard(),
            store: ScheduleStore::new(template, config.overlap_policy()),
            allocator: SlotAllocator::with_config(config.allocator_config()),
            controller: PlacementController::new(config.default_day()),
            layout: LayoutProjector::new(config.layout_config()),
            analytics: AnalyticsAggregator::default(),
            tracker: HabitTracker::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &HabitCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn controller(&self) -> &PlacementController {
        &self.controller
    }

    pub fn tracker(&self) -> &HabitTracker {
        &self.tracker
    }

    pub fn selected_day(&self) -> DayOfWeek {
        self.controller.selected_day()
    }

    /// Blocks of the selected day.
    pub fn blocks(&self) -> &[TimeBlock] {
        self.store.blocks(self.selected_day())
    }

    /// Grid projection of the selected day.
    pub fn grid(&self) -> Vec<GridColumn> {
        self.layout.project_day(self.blocks())
    }

    pub fn drag_over(&self, hour: u8) -> bool {
        self.controller.drag_over(hour)
    }

    pub fn breakdown(&self, context: AnalyticsContext) -> CategoryBreakdown {
        self.analytics.breakdown(&self.registry, context)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn select_day(&mut self, day: DayOfWeek) {
        self.controller.select_day(day);
    }

    /// Pick up the catalog template `template_id`.
    pub fn begin_drag(&mut self, template_id: &str) -> Result<Event, ValidationError> {
        let template = self.template(template_id)?.clone();
        Ok(self.controller.begin_drag(template))
    }

    pub fn drop_on(&mut self, hour: u8) -> Option<Event> {
        self.controller
            .drop_on(hour, &mut self.store, &self.registry, &self.allocator)
    }

    pub fn cancel(&mut self) -> Option<Event> {
        self.controller.cancel()
    }

    /// Retime a block of the selected day from `HH:MM` strings.
    ///
    /// Malformed clock strings are an error; a well-formed but inverted
    /// range is reported by the store as a rejection.
    pub fn edit_block(
        &mut self,
        block_id: &str,
        start: &str,
        end: &str,
        activity: Option<&str>,
    ) -> Result<StoreOutcome, ValidationError> {
        let start = parse_clock(start)?;
        let end = parse_clock(end)?;
        let day = self.selected_day();
        Ok(self.store.update(day, block_id, start, end, activity))
    }

    pub fn remove_block(&mut self, block_id: &str) -> StoreOutcome {
        let day = self.selected_day();
        self.store.remove(day, block_id)
    }

    /// Change a template's duration. Affects later drops only.
    pub fn set_duration(&mut self, template_id: &str, minutes: u32) -> Result<(), ValidationError> {
        self.catalog.set_duration(template_id, minutes)
    }

    /// Start tracking the catalog template `template_id`. Returns the habit id.
    pub fn add_habit(&mut self, template_id: &str) -> Result<String, ValidationError> {
        let template = self.template(template_id)?.clone();
        Ok(self.tracker.add_from_template(&template))
    }

    pub fn complete_habit(&mut self, habit_id: &str, date: NaiveDate) -> Result<bool, ValidationError> {
        self.tracker.complete(habit_id, date)
    }

    fn template(&self, template_id: &str) -> Result<&HabitTemplate, ValidationError> {
        self.catalog
            .get(template_id)
            .ok_or_else(|| ValidationError::UnknownTemplate(template_id.to_string()))
    }
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::TimeInterval;
    use crate::store::{OverlapPolicy, RejectReason};

    fn empty_session(config: &Config) -> PlannerSession {
        PlannerSession::with_template(config, &DayTemplate { blocks: Vec::new() })
    }

    #[test]
    fn built_from_config() {
        let mut config = Config::default();
        config.set("planner.default_day", "5").unwrap();
        config.set("store.overlap_policy", "reject").unwrap();
        let session = PlannerSession::new(&config);
        assert_eq!(session.selected_day(), DayOfWeek::FRIDAY);
        assert_eq!(session.store().policy(), OverlapPolicy::Reject);
        assert_eq!(session.blocks().len(), 11);
    }

    #[test]
    fn drag_and_drop_through_the_session() {
        let mut session = empty_session(&Config::default());
        assert!(!session.drag_over(9));
        session.begin_drag("19").unwrap();
        assert!(session.drag_over(9));

        match session.drop_on(9) {
            Some(Event::BlockPlaced { interval, .. }) => {
                assert_eq!(interval, TimeInterval::new(9.0, 9.0 + 25.0 / 60.0).unwrap())
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(session.blocks().len(), 1);
        assert_eq!(session.blocks()[0].activity, "Pomodoro session");
    }

    #[test]
    fn unknown_template_is_an_error() {
        let mut session = PlannerSession::default();
        assert_eq!(
            session.begin_drag("nope").unwrap_err(),
            ValidationError::UnknownTemplate("nope".into())
        );
        assert!(!session.controller().is_dragging());
    }

    #[test]
    fn duration_change_applies_to_next_drop() {
        let mut session = empty_session(&Config::default());
        session.set_duration("19", 50).unwrap();
        session.begin_drag("19").unwrap();
        let Some(Event::BlockPlaced { interval, .. }) = session.drop_on(10) else {
            panic!("expected a placement");
        };
        assert_eq!(interval.duration_minutes().round(), 50.0);
        assert!(session.set_duration("19", 0).is_err());
    }

    #[test]
    fn edit_and_remove_target_selected_day() {
        let mut session = PlannerSession::default();
        session.select_day(DayOfWeek::SUNDAY);

        let outcome = session.edit_block("0-5", "12:30", "13:15", Some("Late lunch")).unwrap();
        assert!(outcome.is_applied());
        let lunch = session.store().get(DayOfWeek::SUNDAY, "0-5").unwrap();
        assert_eq!(lunch.activity, "Late lunch");
        assert_eq!(lunch.interval, TimeInterval::new(12.5, 13.25).unwrap());
        // other days are untouched
        assert_eq!(session.store().get(DayOfWeek::MONDAY, "1-5").unwrap().start_hour(), 12.0);

        let inverted = session.edit_block("0-5", "14:00", "13:00", None).unwrap();
        assert!(matches!(inverted, StoreOutcome::Rejected(RejectReason::InvalidRange { .. })));
        assert!(session.edit_block("0-5", "noon", "13:00", None).is_err());

        assert!(session.remove_block("0-5").is_applied());
        assert_eq!(session.remove_block("0-5"), StoreOutcome::NotFound);
        assert_eq!(session.blocks().len(), 10);
    }

    #[test]
    fn grid_follows_selected_day() {
        let mut session = empty_session(&Config::default());
        session.select_day(DayOfWeek::TUESDAY);
        session.begin_drag("1").unwrap();
        session.drop_on(6);

        assert_eq!(session.grid()[6].cells.len(), 1);
        session.select_day(DayOfWeek::WEDNESDAY);
        assert!(session.grid().iter().all(|c| c.cells.is_empty()));
    }

    #[test]
    fn habits_through_the_session() {
        let mut session = PlannerSession::default();
        let id = session.add_habit("9").unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(session.complete_habit(&id, day).unwrap());
        assert!(!session.complete_habit(&id, day).unwrap());
        assert_eq!(session.tracker().get(&id).unwrap().streak, 1);
        assert!(session.add_habit("99").is_err());
    }

    #[test]
    fn breakdown_uses_registry() {
        let session = PlannerSession::default();
        assert_eq!(session.breakdown(AnalyticsContext::Weekend).total_minutes, 1440);
    }
}
