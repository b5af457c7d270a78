use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "weekplan-cli", version, about = "Weekly time-block planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a day of the default week
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Habit template catalog
    Templates {
        #[command(subcommand)]
        action: commands::templates::TemplatesAction,
    },
    /// Category colors and reference budgets
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reference time-allocation pie chart
    Analytics {
        /// "weekday" or "weekend"
        context: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Interactive planning session driven by stdin commands
    Session,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("WEEKPLAN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Day { action } => commands::day::run(action),
        Commands::Templates { action } => commands::templates::run(action),
        Commands::Categories { json } => commands::categories::run(json),
        Commands::Analytics { context, json } => commands::analytics::run(&context, json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Session => commands::session::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
