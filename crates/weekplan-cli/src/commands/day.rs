//! Read-only views of the default week.

use clap::Subcommand;
use weekplan_core::{Config, PlannerSession};

use super::{print_blocks, print_grid, resolve_day};

#[derive(Subcommand)]
pub enum DayAction {
    /// List the blocks of a day
    Show {
        /// Day index, 0 (Sunday) to 6 (Saturday); defaults to planner.default_day
        day: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Project a day onto the 24-column hour grid
    Grid {
        /// Day index, 0 (Sunday) to 6 (Saturday); defaults to planner.default_day
        day: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: DayAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut session = PlannerSession::new(&config);

    match action {
        DayAction::Show { day, json } => {
            let day = resolve_day(day, config.default_day())?;
            session.select_day(day);
            if json {
                println!("{}", serde_json::to_string_pretty(session.blocks())?);
            } else {
                print_blocks(day, session.blocks());
            }
        }
        DayAction::Grid { day, json } => {
            let day = resolve_day(day, config.default_day())?;
            session.select_day(day);
            let grid = session.grid();
            if json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print_grid(&grid);
            }
        }
    }
    Ok(())
}
