pub mod analytics;
pub mod categories;
pub mod config;
pub mod day;
pub mod session;
pub mod templates;

use weekplan_core::{format_clock, DayOfWeek, GridColumn, TimeBlock};

/// Resolve an optional day argument, falling back to the configured default.
pub fn resolve_day(day: Option<i64>, fallback: DayOfWeek) -> Result<DayOfWeek, weekplan_core::ValidationError> {
    match day {
        Some(index) => DayOfWeek::from_index(index),
        None => Ok(fallback),
    }
}

pub fn print_blocks(day: DayOfWeek, blocks: &[TimeBlock]) {
    println!("{day}:");
    if blocks.is_empty() {
        println!("  (no blocks)");
    }
    for b in blocks {
        println!(
            "  {:<8} {}-{}  {:<20} [{}] {}",
            b.id,
            format_clock(b.start_hour()),
            format_clock(b.end_hour()),
            b.activity,
            b.category,
            b.color
        );
    }
}

pub fn print_grid(grid: &[GridColumn]) {
    for column in grid {
        let cells: Vec<String> = column
            .cells
            .iter()
            .map(|c| format!("{} @{:.0}px+{:.0}px", c.label, c.top_px, c.height_px))
            .collect();
        if cells.is_empty() {
            println!("{:02}:00  -", column.hour);
        } else {
            println!("{:02}:00  {}", column.hour, cells.join(" | "));
        }
    }
}
