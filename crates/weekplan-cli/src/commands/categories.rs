use weekplan_core::CategoryRegistry;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = CategoryRegistry::standard();

    if json {
        println!("{}", serde_json::to_string_pretty(registry.categories())?);
        return Ok(());
    }

    println!("{:<10} {:<8} {:>8} {:>8}", "Category", "Color", "Weekday", "Weekend");
    for c in registry.categories() {
        println!(
            "{:<10} {:<8} {:>7}m {:>7}m",
            c.name, c.color, c.weekday_minutes, c.weekend_minutes
        );
    }
    Ok(())
}
