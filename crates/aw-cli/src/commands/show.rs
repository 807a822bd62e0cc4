use colored::Colorize;

use super::Options;

pub fn run(opts: &Options<'_>, id: &str) -> Result<(), String> {
    let engine = super::build_engine(opts)?;
    let info = super::scenario_info(&engine, id)?;

    println!("  {} [{}]", info.name.bold(), info.id);
    println!("  Difficulty:    {}", info.difficulty);
    println!("  Optimal turns: {}", info.optimal_turns);
    match info.time_limit_secs {
        Some(secs) => println!("  Time limit:    {secs}s"),
        None => println!("  Time limit:    none"),
    }
    println!();
    println!("  {}", info.description);

    Ok(())
}
