use clap::Subcommand;
use weekplan_core::HabitCatalog;

#[derive(Subcommand)]
pub enum TemplatesAction {
    /// List habit templates
    List {
        /// Only templates in this category (e.g. "Health")
        #[arg(long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TemplatesAction) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = HabitCatalog::standard();

    match action {
        TemplatesAction::List { category, json } => {
            let templates = catalog.filter(category.as_deref());
            if json {
                println!("{}", serde_json::to_string_pretty(&templates)?);
                return Ok(());
            }
            if templates.is_empty() {
                println!("No templates found.");
            }
            for t in templates {
                println!("{:>3}  {:<24} {:<13} {}", t.id, t.name, t.category, t.time_required());
            }
        }
    }
    Ok(())
}
