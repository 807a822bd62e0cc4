use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::Options;

pub fn run(opts: &Options<'_>) -> Result<(), String> {
    let engine = super::build_engine(opts)?;
    let scenarios = engine.scenarios();

    if scenarios.is_empty() {
        println!("  No scenarios found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Difficulty", "Description"]);

    for s in &scenarios {
        let desc = if s.description.chars().count() > 60 {
            format!("{}...", s.description.chars().take(57).collect::<String>())
        } else {
            s.description.clone()
        };
        table.add_row(vec![s.id.clone(), s.name.clone(), s.difficulty.to_string(), desc]);
    }

    println!("{table}");
    println!();
    println!("  {} scenarios", scenarios.len());
    println!("  {}", "Start one with `aw play <id>`.".dimmed());

    Ok(())
}
