//! Planner settings: grid geometry, allocator step, overlap policy and the
//! day a session starts on.

use clap::Subcommand;
use weekplan_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting
    Get {
        /// Dotted key, e.g. "allocator.step_minutes" or "store.overlap_policy"
        key: String,
    },
    /// Change one setting and save it
    Set {
        /// Dotted key, e.g. "planner.default_day"
        key: String,
        /// New value; checked before anything is written
        value: String,
    },
    /// Print every setting as it appears in config.toml
    List {
        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Print the location of config.toml
    Path,
    /// Restore the default settings
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config
                .get(&key)
                .ok_or_else(|| format!("unknown key: {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            // echo the stored form, e.g. "60" becomes "60.0" for pixel sizes
            if let Some(stored) = config.get(&key) {
                println!("{key} = {stored}");
            }
        }
        ConfigAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigAction::Path => println!("{}", Config::path()?.display()),
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("planner settings reset to defaults");
        }
    }
    Ok(())
}
