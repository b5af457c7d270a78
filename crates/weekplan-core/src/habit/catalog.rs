//! Habit template catalog.
//!
//! Templates are the payload of a drag onto the day grid. The scheduler only
//! reads them; the one editable field is the duration.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A reusable activity that can be dropped onto a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub duration_minutes: u32,
}

impl HabitTemplate {
    /// Human-readable duration, e.g. `"25 min"` or `"1 h 30 min"`.
    pub fn time_required(&self) -> String {
        let (h, m) = (self.duration_minutes / 60, self.duration_minutes % 60);
        match (h, m) {
            (0, m) => format!("{m} min"),
            (h, 0) => format!("{h} h"),
            (h, m) => format!("{h} h {m} min"),
        }
    }
}

/// Ordered list of habit templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCatalog {
    templates: Vec<HabitTemplate>,
}

impl HabitCatalog {
    pub fn new(templates: Vec<HabitTemplate>) -> Self {
        Self { templates }
    }

    /// The built-in starter catalog.
    pub fn standard() -> Self {
        use Difficulty::{Easy, Medium};

        const ROWS: [(&str, &str, &str, Difficulty, u32); 22] = [
            ("Daily reading", "Read for fifteen minutes a day", "Learning", Easy, 15),
            ("Online course", "Follow thirty minutes of an online course", "Learning", Medium, 30),
            ("Writing practice", "Write for twenty minutes to sharpen expression", "Learning", Medium, 20),
            ("Language study", "Practice a foreign language", "Learning", Medium, 25),
            ("Morning workout", "Start the day with exercise", "Health", Medium, 30),
            ("Yoga stretch", "Loosen up with a short yoga routine", "Health", Easy, 15),
            ("Walk", "Take a twenty-minute walk", "Health", Easy, 20),
            ("Healthy eating", "Eat balanced meals", "Health", Medium, 60),
            ("Gratitude journal", "Write down three things you are grateful for", "Mindfulness", Easy, 5),
            ("Breathing meditation", "Calm the mind with deep breathing", "Mindfulness", Medium, 10),
            ("Mindfulness practice", "Pause and notice the present moment", "Mindfulness", Easy, 5),
            ("Tidy desk", "Clear the workspace at the end of the day", "Lifestyle", Easy, 5),
            ("Regular bedtime", "Go to bed at the same time every night", "Lifestyle", Medium, 480),
            ("Morning routine", "Follow a fixed start-of-day sequence", "Lifestyle", Medium, 30),
            ("Mealtime", "Keep regular meal times", "Daily", Easy, 90),
            ("Commute", "Travel to and from work", "Daily", Easy, 60),
            ("Housework", "Keep the home in order", "Daily", Easy, 15),
            ("Personal care", "Washing, dressing and grooming", "Daily", Easy, 30),
            ("Pomodoro session", "Focus for one twenty-five minute session", "Productivity", Medium, 25),
            ("Daily planning", "Plan the day's priorities", "Productivity", Easy, 10),
            ("Contact friends", "Reach out to a friend or relative", "Social", Easy, 15),
            ("Family time", "Spend undistracted time with family", "Social", Medium, 60),
        ];

        let templates = ROWS
            .iter()
            .enumerate()
            .map(|(i, &(name, description, category, difficulty, minutes))| HabitTemplate {
                id: (i + 1).to_string(),
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                difficulty,
                duration_minutes: minutes,
            })
            .collect();

        Self { templates }
    }

    pub fn all(&self) -> &[HabitTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&HabitTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Distinct template categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for t in &self.templates {
            if !seen.contains(&t.category.as_str()) {
                seen.push(&t.category);
            }
        }
        seen
    }

    /// Templates in `category`, or all templates for `None`.
    pub fn filter(&self, category: Option<&str>) -> Vec<&HabitTemplate> {
        self.templates
            .iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .collect()
    }

    /// Change a template's duration. Blocks already placed keep their length.
    pub fn set_duration(&mut self, id: &str, minutes: u32) -> Result<(), ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::InvalidDuration(minutes));
        }
        let template = self
            .templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ValidationError::UnknownTemplate(id.to_string()))?;
        template.duration_minutes = minutes;
        Ok(())
    }
}

impl Default for HabitCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_seven_categories() {
        let catalog = HabitCatalog::standard();
        assert_eq!(catalog.all().len(), 22);
        assert_eq!(
            catalog.categories(),
            ["Learning", "Health", "Mindfulness", "Lifestyle", "Daily", "Productivity", "Social"]
        );
    }

    #[test]
    fn filter_by_category() {
        let catalog = HabitCatalog::standard();
        assert_eq!(catalog.filter(None).len(), 22);
        let social: Vec<_> = catalog.filter(Some("Social")).iter().map(|t| t.name.as_str()).collect();
        assert_eq!(social, ["Contact friends", "Family time"]);
        assert!(catalog.filter(Some("Nope")).is_empty());
    }

    #[test]
    fn set_duration_validates() {
        let mut catalog = HabitCatalog::standard();
        catalog.set_duration("1", 45).unwrap();
        assert_eq!(catalog.get("1").unwrap().duration_minutes, 45);
        assert_eq!(catalog.set_duration("1", 0), Err(ValidationError::InvalidDuration(0)));
        assert_eq!(
            catalog.set_duration("99", 10),
            Err(ValidationError::UnknownTemplate("99".into()))
        );
    }

    #[test]
    fn time_required_label() {
        let mut t = HabitCatalog::standard().get("19").unwrap().clone();
        assert_eq!(t.time_required(), "25 min");
        t.duration_minutes = 90;
        assert_eq!(t.time_required(), "1 h 30 min");
        t.duration_minutes = 480;
        assert_eq!(t.time_required(), "8 h");
    }
}
