//! Projection of a day's blocks onto a 24-column hour grid.
//!
//! Each column covers `[hour, hour + 1)`. A block spanning several hours
//! appears once in every column it touches, sized to the part of the hour
//! it covers. The projection is stateless and does no conflict detection:
//! overlapping blocks are emitted at the same coordinates.

use serde::{Deserialize, Serialize};

use crate::schedule::{format_clock, TimeBlock};

/// Number of hour columns in the grid.
pub const GRID_COLUMNS: u8 = 24;

/// Labels longer than this many characters are shortened.
const LABEL_MAX_CHARS: usize = 6;
const LABEL_KEEP_CHARS: usize = 4;

/// Fixed grid geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Pixel height representing one full hour
    pub track_height: f64,
    /// Pixels reserved above the track for hour labels
    pub top_margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            track_height: 200.0,
            top_margin: 20.0,
        }
    }
}

/// One block's slice within one hour column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub block_id: String,
    pub label: String,
    pub tooltip: String,
    pub color: String,
    pub visible_start: f64,
    pub visible_end: f64,
    pub top_px: f64,
    pub height_px: f64,
}

/// All cells rendered in one hour column, in block order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridColumn {
    pub hour: u8,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutProjector {
    config: LayoutConfig,
}

impl LayoutProjector {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Project `blocks` onto all 24 columns.
    pub fn project_day(&self, blocks: &[TimeBlock]) -> Vec<GridColumn> {
        (0..GRID_COLUMNS)
            .map(|hour| GridColumn {
                hour,
                cells: self.project_hour(blocks, hour),
            })
            .collect()
    }

    /// Cells for a single column.
    pub fn project_hour(&self, blocks: &[TimeBlock], hour: u8) -> Vec<GridCell> {
        let h = f64::from(hour);
        blocks
            .iter()
            .filter(|b| b.interval.intersects_hour(hour))
            .map(|b| {
                let visible_start = b.start_hour().max(h);
                let visible_end = b.end_hour().min(h + 1.0);
                let fraction = visible_end - visible_start;
                GridCell {
                    block_id: b.id.clone(),
                    label: short_label(&b.activity),
                    tooltip: format!(
                        "{} ({}-{})",
                        b.activity,
                        format_clock(b.start_hour()),
                        format_clock(b.end_hour())
                    ),
                    color: b.color.clone(),
                    visible_start,
                    visible_end,
                    top_px: (visible_start - h) * self.config.track_height + self.config.top_margin,
                    height_px: fraction * self.config.track_height,
                }
            })
            .collect()
    }
}

/// Shorten long activity names to fit a narrow column.
pub fn short_label(activity: &str) -> String {
    if activity.chars().count() > LABEL_MAX_CHARS {
        let head: String = activity.chars().take(LABEL_KEEP_CHARS).collect();
        format!("{head}...")
    } else {
        activity.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::TimeInterval;

    fn block(id: &str, activity: &str, start: f64, end: f64) -> TimeBlock {
        TimeBlock {
            id: id.to_string(),
            activity: activity.to_string(),
            category: "Work".to_string(),
            color: "#3B82F6".to_string(),
            day: None,
            interval: TimeInterval::new(start, end).unwrap(),
        }
    }

    #[test]
    fn always_emits_24_columns() {
        let grid = LayoutProjector::default().project_day(&[]);
        assert_eq!(grid.len(), 24);
        assert_eq!(grid[0].hour, 0);
        assert_eq!(grid[23].hour, 23);
        assert!(grid.iter().all(|c| c.cells.is_empty()));
    }

    #[test]
    fn full_hour_block_fills_track() {
        let grid = LayoutProjector::default().project_day(&[block("a", "Work", 9.0, 10.0)]);
        let cell = &grid[9].cells[0];
        assert_eq!(cell.top_px, 20.0);
        assert_eq!(cell.height_px, 200.0);
        assert!(grid[8].cells.is_empty());
        assert!(grid[10].cells.is_empty());
    }

    #[test]
    fn partial_hours_are_positioned_within_the_column() {
        let projector = LayoutProjector::default();
        let blocks = [block("a", "Read", 9.25, 10.5)];

        let first = &projector.project_hour(&blocks, 9)[0];
        assert_eq!((first.visible_start, first.visible_end), (9.25, 10.0));
        assert_eq!(first.top_px, 0.25 * 200.0 + 20.0);
        assert_eq!(first.height_px, 0.75 * 200.0);

        let second = &projector.project_hour(&blocks, 10)[0];
        assert_eq!((second.visible_start, second.visible_end), (10.0, 10.5));
        assert_eq!(second.top_px, 20.0);
        assert_eq!(second.height_px, 100.0);
    }

    #[test]
    fn multi_hour_block_appears_in_each_column() {
        let grid = LayoutProjector::default().project_day(&[block("s", "Sleep", 0.0, 7.0)]);
        let covered: Vec<u8> = grid.iter().filter(|c| !c.cells.is_empty()).map(|c| c.hour).collect();
        assert_eq!(covered, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn overlapping_blocks_are_stacked_not_resolved() {
        let blocks = [block("a", "A", 9.0, 10.0), block("b", "B", 9.0, 10.0)];
        let cells = LayoutProjector::default().project_hour(&blocks, 9);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].top_px, cells[1].top_px);
        assert_eq!(cells[0].height_px, cells[1].height_px);
    }

    #[test]
    fn custom_geometry() {
        let projector = LayoutProjector::new(LayoutConfig { track_height: 60.0, top_margin: 0.0 });
        let cell = &projector.project_hour(&[block("a", "A", 5.5, 6.0)], 5)[0];
        assert_eq!(cell.top_px, 30.0);
        assert_eq!(cell.height_px, 30.0);
    }

    #[test]
    fn labels_and_tooltips() {
        assert_eq!(short_label("Work"), "Work");
        assert_eq!(short_label("Dinner"), "Dinner");
        assert_eq!(short_label("Morning routine"), "Morn...");
        assert_eq!(short_label("晨間例行公事"), "晨間例行公事");
        assert_eq!(short_label("晨間例行公事啊"), "晨間例行...");

        let cell = &LayoutProjector::default().project_hour(&[block("a", "Lunch", 12.0, 13.25)], 13)[0];
        assert_eq!(cell.tooltip, "Lunch (12:00-13:15)");
    }
}
