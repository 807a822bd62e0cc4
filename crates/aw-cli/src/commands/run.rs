use std::fs;
use std::path::Path;

use colored::Colorize;
use serde_json::json;

use super::Options;

pub fn run(
    opts: &Options<'_>,
    scenario: &str,
    script: &Path,
    json: bool,
    agent: &str,
) -> Result<(), String> {
    let text = fs::read_to_string(script)
        .map_err(|e| format!("failed to read {}: {e}", script.display()))?;

    let engine = super::build_engine(opts)?;
    let game = engine
        .create_game(agent, scenario)
        .map_err(|e| e.to_string())?;
    let id = game.session_id;

    if json {
        emit(&json!({ "session_id": id, "initial_message": game.initial_message }))?;
    } else {
        println!("{}\n", game.initial_message);
    }

    let lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));

    for line in lines {
        let Some((verb, args)) = aw_core::split_command(line) else {
            continue;
        };
        let result = engine
            .execute_command(id, &verb, &args)
            .map_err(|e| e.to_string())?;

        if json {
            emit(&result)?;
        } else {
            println!("{} {line}", ">".cyan());
            super::print_result(&result);
        }

        if let Some(status) = result.game_status.filter(|s| s.is_terminal()) {
            if !json {
                super::print_outcome(status);
            }
            break;
        }
    }

    if json {
        if let Ok(stats) = engine.stats(id) {
            emit(&stats)?;
        }
    } else {
        let snapshot = engine.get_state(id).map_err(|e| e.to_string())?;
        println!("  {}", super::status_line(&snapshot.game, snapshot.elapsed_ms));
        if !snapshot.game.status.is_terminal() {
            println!("  {}", "Script ended with the game still in progress.".dimmed());
        }
    }

    Ok(())
}

fn emit(value: &impl serde::Serialize) -> Result<(), String> {
    let line = serde_json::to_string(value).map_err(|e| e.to_string())?;
    println!("{line}");
    Ok(())
}
