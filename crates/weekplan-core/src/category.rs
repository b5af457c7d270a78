//! Static category registry.
//!
//! Holds the reference time budgets used by the analytics charts and the
//! display colors assigned to new blocks. The table is fixed when the
//! registry is built and is never derived from the live schedule.

use serde::{Deserialize, Serialize};

/// Color used for any category the registry does not know.
pub const FALLBACK_COLOR: &str = "#6B7280";

/// A time category with its reference daily allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeCategory {
    pub name: String,
    pub color: String,
    pub weekday_minutes: u32,
    pub weekend_minutes: u32,
}

impl TimeCategory {
    pub fn new(name: &str, color: &str, weekday_minutes: u32, weekend_minutes: u32) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            weekday_minutes,
            weekend_minutes,
        }
    }
}

/// Lookup from category name to color and reference budgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRegistry {
    categories: Vec<TimeCategory>,
    /// Colors for habit-template categories, consulted before `categories`.
    palette: Vec<(String, String)>,
}

impl CategoryRegistry {
    /// Build a registry from explicit tables.
    pub fn new(categories: Vec<TimeCategory>, palette: Vec<(String, String)>) -> Self {
        Self { categories, palette }
    }

    /// The built-in reference table.
    pub fn standard() -> Self {
        let categories = vec![
            TimeCategory::new("Work", "#3B82F6", 480, 0),
            TimeCategory::new("Study", "#10B981", 60, 120),
            TimeCategory::new("Exercise", "#F59E0B", 30, 60),
            TimeCategory::new("Rest", "#EF4444", 480, 540),
            TimeCategory::new("Meals", "#8B5CF6", 90, 120),
            TimeCategory::new("Commute", "#6B7280", 60, 0),
            TimeCategory::new("Leisure", "#EC4899", 120, 240),
            TimeCategory::new("Chores", "#14B8A6", 30, 60),
            TimeCategory::new("Other", "#9CA3AF", 180, 300),
        ];

        let palette = [
            ("Learning", "#10B981"),
            ("Health", "#F59E0B"),
            ("Mindfulness", "#8B5CF6"),
            ("Lifestyle", "#14B8A6"),
            ("Daily", "#9CA3AF"),
            ("Productivity", "#3B82F6"),
            ("Social", "#EC4899"),
        ]
        .into_iter()
        .map(|(name, color)| (name.to_string(), color.to_string()))
        .collect();

        Self::new(categories, palette)
    }

    /// Time categories in registry order.
    pub fn categories(&self) -> &[TimeCategory] {
        &self.categories
    }

    pub fn get(&self, name: &str) -> Option<&TimeCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Display color for `category`.
    ///
    /// Checks the template palette, then the time categories, then falls
    /// back to [`FALLBACK_COLOR`].
    pub fn color_for(&self, category: &str) -> &str {
        self.palette
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, color)| color.as_str())
            .or_else(|| self.get(category).map(|c| c.color.as_str()))
            .unwrap_or(FALLBACK_COLOR)
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_nine_categories_in_order() {
        let registry = CategoryRegistry::standard();
        let names: Vec<_> = registry.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["Work", "Study", "Exercise", "Rest", "Meals", "Commute", "Leisure", "Chores", "Other"]
        );
    }

    #[test]
    fn reference_budgets_cover_a_full_day() {
        let registry = CategoryRegistry::standard();
        let weekday: u32 = registry.categories().iter().map(|c| c.weekday_minutes).sum();
        let weekend: u32 = registry.categories().iter().map(|c| c.weekend_minutes).sum();
        assert_eq!(weekday, 1530);
        assert_eq!(weekend, 1440);
    }

    #[test]
    fn color_lookup_prefers_palette_then_categories() {
        let registry = CategoryRegistry::standard();
        assert_eq!(registry.color_for("Health"), "#F59E0B");
        assert_eq!(registry.color_for("Rest"), "#EF4444");
        assert_eq!(registry.color_for("Unknown"), FALLBACK_COLOR);
    }

    #[test]
    fn palette_shadows_category_of_same_name() {
        let registry = CategoryRegistry::new(
            vec![TimeCategory::new("Work", "#000000", 60, 0)],
            vec![("Work".into(), "#FFFFFF".into())],
        );
        assert_eq!(registry.color_for("Work"), "#FFFFFF");
    }
}
