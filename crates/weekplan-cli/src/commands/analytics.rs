use weekplan_core::{AnalyticsAggregator, AnalyticsContext, CategoryRegistry};

pub fn run(context: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let context: AnalyticsContext = context.parse()?;
    let breakdown = AnalyticsAggregator::default().breakdown(&CategoryRegistry::standard(), context);

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    println!("{} ({} min)", breakdown.context, breakdown.total_minutes);
    for s in &breakdown.slices {
        println!(
            "  {:<10} {:>4} min {:>3}%  {:>7.2}°..{:>7.2}°",
            s.category, s.minutes, s.percentage, s.start_angle, s.end_angle
        );
    }
    Ok(())
}
