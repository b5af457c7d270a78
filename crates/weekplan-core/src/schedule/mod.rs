//! Time-unit model: intervals, blocks, days and the weekly schedule.
//!
//! All times are day-local fractional hours in `[0, 24]`; `8.5` is 08:30.
//! Intervals are half-open, so a block ending at 10 does not conflict with a
//! block starting at 10.

pub mod clock;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub use clock::{format_clock, parse_clock};

/// Hours in a day; the upper bound of every interval.
pub const HOURS_PER_DAY: f64 = 24.0;

/// A day of the week, 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const SUNDAY: Self = Self(0);
    pub const MONDAY: Self = Self(1);
    pub const TUESDAY: Self = Self(2);
    pub const WEDNESDAY: Self = Self(3);
    pub const THURSDAY: Self = Self(4);
    pub const FRIDAY: Self = Self(5);
    pub const SATURDAY: Self = Self(6);

    const NAMES: [&'static str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];

    /// Validate a raw day index.
    pub fn from_index(index: i64) -> Result<Self, ValidationError> {
        match u8::try_from(index) {
            Ok(i) if i < 7 => Ok(Self(i)),
            _ => Err(ValidationError::InvalidDay(index)),
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self.0 as usize]
    }

    pub fn is_weekend(self) -> bool {
        self == Self::SUNDAY || self == Self::SATURDAY
    }

    /// All seven days, Sunday first.
    pub fn all() -> impl Iterator<Item = DayOfWeek> {
        (0..7).map(DayOfWeek)
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(i64::from(value))
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> Self {
        day.0
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Deserialize)]
struct RawInterval {
    start_hour: f64,
    end_hour: f64,
}

/// A half-open interval `[start_hour, end_hour)` within one day.
///
/// Always satisfies `start_hour < end_hour`. Quarter-hour quantization is a
/// convention of the allocator and the editor, not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start_hour: f64,
    end_hour: f64,
}

impl TimeInterval {
    /// Create an interval, rejecting empty or inverted ranges.
    pub fn new(start_hour: f64, end_hour: f64) -> Result<Self, ValidationError> {
        // NaN fails this comparison too
        if !(end_hour > start_hour) {
            return Err(ValidationError::InvalidTimeRange {
                start: start_hour,
                end: end_hour,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    /// Construct from bounds the caller already knows are ordered.
    pub(crate) fn between(start_hour: f64, end_hour: f64) -> Self {
        debug_assert!(start_hour < end_hour, "empty interval {start_hour}..{end_hour}");
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn start_hour(&self) -> f64 {
        self.start_hour
    }

    pub fn end_hour(&self) -> f64 {
        self.end_hour
    }

    pub fn duration_hours(&self) -> f64 {
        self.end_hour - self.start_hour
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_hours() * 60.0
    }

    /// Whether this interval shares any sub-interval with `[start, end)`.
    pub fn overlaps_range(&self, start: f64, end: f64) -> bool {
        self.start_hour < end && self.end_hour > start
    }

    /// Whether two intervals conflict. Symmetric.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.overlaps_range(other.start_hour, other.end_hour)
    }

    /// Whether the interval touches the hour cell `[hour, hour + 1)`.
    pub fn intersects_hour(&self, hour: u8) -> bool {
        let h = f64::from(hour);
        self.overlaps_range(h, h + 1.0)
    }
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = ValidationError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Self::new(raw.start_hour, raw.end_hour)
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            format_clock(self.start_hour),
            format_clock(self.end_hour)
        )
    }
}

/// A labeled interval of one day assigned to an activity and category.
///
/// `color` is fixed when the block is created; later registry changes do
/// not recolor it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: String,
    pub activity: String,
    pub category: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<DayOfWeek>,
    pub interval: TimeInterval,
}

impl TimeBlock {
    pub fn start_hour(&self) -> f64 {
        self.interval.start_hour()
    }

    pub fn end_hour(&self) -> f64 {
        self.interval.end_hour()
    }
}

/// One entry of a day template before it is cloned into a concrete day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateBlock {
    pub id: String,
    pub activity: String,
    pub category: String,
    pub color: String,
    pub interval: TimeInterval,
}

/// Default day layout cloned into every day of a fresh week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTemplate {
    pub blocks: Vec<TemplateBlock>,
}

impl DayTemplate {
    /// The standard working-day template.
    pub fn standard() -> Self {
        const ROWS: [(&str, f64, f64, &str, &str); 11] = [
            ("Sleep", 0.0, 7.0, "Rest", "#EF4444"),
            ("Morning routine", 7.0, 8.0, "Daily", "#9CA3AF"),
            ("Commute", 8.0, 9.0, "Commute", "#6B7280"),
            ("Work", 9.0, 12.0, "Work", "#3B82F6"),
            ("Lunch", 12.0, 13.0, "Meals", "#8B5CF6"),
            ("Work", 13.0, 18.0, "Work", "#3B82F6"),
            ("Commute", 18.0, 19.0, "Commute", "#6B7280"),
            ("Exercise", 19.0, 20.0, "Exercise", "#F59E0B"),
            ("Dinner", 20.0, 21.0, "Meals", "#8B5CF6"),
            ("Study / reading", 21.0, 22.0, "Study", "#10B981"),
            ("Leisure", 22.0, 24.0, "Leisure", "#EC4899"),
        ];

        let blocks = ROWS
            .iter()
            .enumerate()
            .map(|(i, &(activity, start, end, category, color))| TemplateBlock {
                id: (i + 1).to_string(),
                activity: activity.to_string(),
                category: category.to_string(),
                color: color.to_string(),
                interval: TimeInterval::between(start, end),
            })
            .collect();

        Self { blocks }
    }

    /// Clone the template into `day`, giving each block a day-scoped id.
    pub fn instantiate(&self, day: DayOfWeek) -> Vec<TimeBlock> {
        self.blocks
            .iter()
            .map(|b| TimeBlock {
                id: format!("{}-{}", day.index(), b.id),
                activity: b.activity.clone(),
                category: b.category.clone(),
                color: b.color.clone(),
                day: Some(day),
                interval: b.interval,
            })
            .collect()
    }
}

impl Default for DayTemplate {
    fn default() -> Self {
        Self::standard()
    }
}

/// Per-day ordered block lists for a whole week.
///
/// Order within a day is insertion order and carries no meaning.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklySchedule {
    days: BTreeMap<DayOfWeek, Vec<TimeBlock>>,
}

impl WeeklySchedule {
    /// A week with seven empty days.
    pub fn empty() -> Self {
        Self {
            days: DayOfWeek::all().map(|d| (d, Vec::new())).collect(),
        }
    }

    /// A week with `template` cloned into all seven days.
    pub fn from_template(template: &DayTemplate) -> Self {
        Self {
            days: DayOfWeek::all()
                .map(|d| (d, template.instantiate(d)))
                .collect(),
        }
    }

    /// Blocks of one day, in insertion order.
    pub fn day(&self, day: DayOfWeek) -> &[TimeBlock] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn day_mut(&mut self, day: DayOfWeek) -> &mut Vec<TimeBlock> {
        self.days.entry(day).or_default()
    }

    pub fn find(&self, day: DayOfWeek, block_id: &str) -> Option<&TimeBlock> {
        self.day(day).iter().find(|b| b.id == block_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, &[TimeBlock])> {
        self.days.iter().map(|(d, blocks)| (*d, blocks.as_slice()))
    }

    pub fn total_blocks(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}
