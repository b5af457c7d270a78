//! Line-oriented planning session.
//!
//! Reads one command per line from stdin and applies it to a single
//! in-memory [`PlannerSession`]. Errors are reported on stderr and the
//! session continues with the next line.

use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate};
use tracing::debug;
use weekplan_core::{Config, DayOfWeek, Event, PlannerSession, RejectReason, StoreOutcome};

use super::{print_blocks, print_grid};

#[derive(Debug, Clone, PartialEq)]
enum SessionCommand {
    Day(DayOfWeek),
    Drag(String),
    Over(u8),
    Drop(u8),
    Cancel,
    Edit {
        block_id: String,
        start: String,
        end: String,
        activity: Option<String>,
    },
    Remove(String),
    Show,
    Grid,
    Duration { template_id: String, minutes: u32 },
    HabitAdd(String),
    HabitDone { habit_id: String, date: NaiveDate },
    Habits,
}

fn parse_line(line: &str) -> Result<SessionCommand, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = words.first() else {
        return Err("empty command".to_string());
    };
    let arg = |i: usize| {
        words
            .get(i)
            .copied()
            .ok_or_else(|| format!("missing argument for '{head}'"))
    };
    let hour = |s: &str| s.parse::<u8>().map_err(|_| format!("invalid hour '{s}'"));

    match head {
        "day" => {
            let index = arg(1)?
                .parse::<i64>()
                .map_err(|_| format!("invalid day '{}'", words[1]))?;
            DayOfWeek::from_index(index)
                .map(SessionCommand::Day)
                .map_err(|e| e.to_string())
        }
        "drag" => Ok(SessionCommand::Drag(arg(1)?.to_string())),
        "over" => Ok(SessionCommand::Over(hour(arg(1)?)?)),
        "drop" => Ok(SessionCommand::Drop(hour(arg(1)?)?)),
        "cancel" => Ok(SessionCommand::Cancel),
        "edit" => {
            let activity = words.get(4..).filter(|rest| !rest.is_empty()).map(|rest| rest.join(" "));
            Ok(SessionCommand::Edit {
                block_id: arg(1)?.to_string(),
                start: arg(2)?.to_string(),
                end: arg(3)?.to_string(),
                activity,
            })
        }
        "remove" => Ok(SessionCommand::Remove(arg(1)?.to_string())),
        "show" => Ok(SessionCommand::Show),
        "grid" => Ok(SessionCommand::Grid),
        "duration" => {
            let minutes = arg(2)?
                .parse::<u32>()
                .map_err(|_| format!("invalid minutes '{}'", words[2]))?;
            Ok(SessionCommand::Duration {
                template_id: arg(1)?.to_string(),
                minutes,
            })
        }
        "habit" => match arg(1)? {
            "add" => Ok(SessionCommand::HabitAdd(arg(2)?.to_string())),
            "done" => {
                let date = NaiveDate::parse_from_str(arg(3)?, "%Y-%m-%d")
                    .map_err(|_| format!("invalid date '{}': expected YYYY-MM-DD", words[3]))?;
                Ok(SessionCommand::HabitDone {
                    habit_id: arg(2)?.to_string(),
                    date,
                })
            }
            other => Err(format!("unknown habit command '{other}'")),
        },
        "habits" => Ok(SessionCommand::Habits),
        other => Err(format!("unknown command '{other}'")),
    }
}

fn describe_outcome(outcome: &StoreOutcome) -> String {
    match outcome {
        StoreOutcome::Applied => "ok".to_string(),
        StoreOutcome::NotFound => "not found".to_string(),
        StoreOutcome::Rejected(reason) => format!("rejected: {}", describe_reason(reason)),
    }
}

fn describe_reason(reason: &RejectReason) -> String {
    match reason {
        RejectReason::InvalidRange { .. } => "end must be after start".to_string(),
        RejectReason::Conflict { with } => format!("overlaps {with}"),
    }
}

fn describe_event(event: Option<Event>) -> String {
    match event {
        Some(Event::BlockPlaced {
            block_id,
            interval,
            conflict_free,
            ..
        }) => {
            if conflict_free {
                format!("placed {block_id} {interval}")
            } else {
                format!("placed {block_id} {interval} (overlaps)")
            }
        }
        Some(Event::PlacementRejected { reason, .. }) => {
            format!("rejected: {}", describe_reason(&reason))
        }
        Some(Event::DragCancelled { .. }) => "cancelled".to_string(),
        Some(Event::DragStarted { template_id, .. }) => format!("dragging {template_id}"),
        None => "not dragging".to_string(),
    }
}

fn apply(session: &mut PlannerSession, command: SessionCommand) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        SessionCommand::Day(day) => {
            session.select_day(day);
            println!("day: {day}");
        }
        SessionCommand::Drag(template_id) => {
            session.begin_drag(&template_id)?;
            println!("dragging {template_id}");
        }
        SessionCommand::Over(hour) => {
            println!("{}", if session.drag_over(hour) { "accept" } else { "reject" });
        }
        SessionCommand::Drop(hour) => println!("{}", describe_event(session.drop_on(hour))),
        SessionCommand::Cancel => println!("{}", describe_event(session.cancel())),
        SessionCommand::Edit {
            block_id,
            start,
            end,
            activity,
        } => {
            let outcome = session.edit_block(&block_id, &start, &end, activity.as_deref())?;
            println!("{}", describe_outcome(&outcome));
        }
        SessionCommand::Remove(block_id) => {
            println!("{}", describe_outcome(&session.remove_block(&block_id)));
        }
        SessionCommand::Show => print_blocks(session.selected_day(), session.blocks()),
        SessionCommand::Grid => print_grid(&session.grid()),
        SessionCommand::Duration { template_id, minutes } => {
            session.set_duration(&template_id, minutes)?;
            println!("ok");
        }
        SessionCommand::HabitAdd(template_id) => {
            let id = session.add_habit(&template_id)?;
            println!("habit {id}");
        }
        SessionCommand::HabitDone { habit_id, date } => {
            let newly = session.complete_habit(&habit_id, date)?;
            println!("{}", if newly { "done" } else { "already done" });
        }
        SessionCommand::Habits => {
            let today = Local::now().date_naive();
            for h in session.tracker().habits() {
                println!(
                    "{}  {:<24} streak {:>3}  {:>3}%",
                    h.id,
                    h.name,
                    h.streak,
                    h.completion_rate(today)
                );
            }
            let summary = session.tracker().summary(today);
            println!(
                "active {}  completed today {}  longest streak {}",
                summary.active, summary.completed_today, summary.longest_streak
            );
        }
    }
    Ok(())
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut session = PlannerSession::new(&config);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        debug!(command = line, "session command");
        let result = parse_line(line)
            .map_err(Into::into)
            .and_then(|command| apply(&mut session, command));
        if let Err(e) = result {
            eprintln!("error: {e}");
        }
        io::stdout().flush()?;
    }
    Ok(())
}
