pub mod play;
pub mod run;
pub mod scenarios;
pub mod show;

use std::fs;
use std::path::Path;

use aw_core::{ActionResult, GameStatus, ScenarioCatalog, ScenarioInfo};
use aw_engine::{EngineConfig, GameEngine, GameState};
use colored::Colorize;
use tracing::info;

/// Global command-line options.
pub struct Options<'a> {
    pub config: Option<&'a Path>,
    pub scenarios: Option<&'a Path>,
}

/// Built-in scenarios plus any definitions from `--scenarios`.
fn load_catalog(extra: Option<&Path>) -> Result<ScenarioCatalog, String> {
    let mut catalog = aw_handlers::builtin_catalog().map_err(|e| e.to_string())?;
    if let Some(dir) = extra {
        for scenario in aw_handlers::load_dir(dir).map_err(|e| e.to_string())? {
            info!(scenario = scenario.id(), dir = %dir.display(), "loaded scenario");
            catalog.register(scenario).map_err(|e| e.to_string())?;
        }
    }
    Ok(catalog)
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, String> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    toml::from_str(&content).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

fn build_engine(opts: &Options<'_>) -> Result<GameEngine, String> {
    let config = load_config(opts.config)?;
    let catalog = load_catalog(opts.scenarios)?;
    Ok(GameEngine::new(catalog).with_config(config))
}

fn scenario_info(engine: &GameEngine, id: &str) -> Result<ScenarioInfo, String> {
    engine
        .catalog()
        .get(id)
        .map(|s| s.info().clone())
        .ok_or_else(|| format!("scenario '{id}' not found (try `aw scenarios`)"))
}

fn print_result(result: &ActionResult) {
    if result.success {
        println!("\n{}\n", format!("✓ {}", result.message).green());
    } else {
        println!("\n{}\n", format!("✗ {}", result.message).red());
    }
}

fn print_outcome(status: GameStatus) {
    match status {
        GameStatus::Completed => println!("{}", "🎉 Congratulations! You won!".bold().green()),
        GameStatus::Failed => println!("{}", "Game over! Time ran out.".bold().red()),
        GameStatus::InProgress => {}
    }
}

fn status_line(game: &GameState, elapsed_ms: i64) -> String {
    format!(
        "Status: {} | Turn: {} | Score: {} | Time: {:.1}s",
        game.status,
        game.turn_count,
        game.score,
        elapsed_ms as f64 / 1000.0
    )
}
