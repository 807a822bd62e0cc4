use std::io::{self, BufRead, Write};

use aw_engine::{GameEngine, SessionId};
use colored::Colorize;

use super::Options;

const META_COMMANDS: &[(&str, &str)] = &[
    ("start <scenario>", "Start a new game with the specified scenario"),
    ("scenarios, list", "List available scenarios"),
    ("status", "Show current game status"),
    ("help, h, ?", "Show this help message"),
    ("quit, exit, q", "Exit the game"),
];

struct Repl {
    engine: GameEngine,
    agent: String,
    session: Option<SessionId>,
}

pub fn run(opts: &Options<'_>, scenario: &str, agent: &str) -> Result<(), String> {
    let engine = super::build_engine(opts)?;
    super::scenario_info(&engine, scenario)?;

    let mut repl = Repl {
        engine,
        agent: agent.to_string(),
        session: None,
    };
    repl.start(scenario);
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("{} ", ">".cyan());
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let Some((verb, args)) = aw_core::split_command(&line) else {
            continue;
        };

        match verb.as_str() {
            "quit" | "exit" | "q" => break,
            "help" | "h" | "?" => repl.help(),
            "status" => repl.status(),
            "scenarios" | "list" => repl.list(),
            "start" => match args.first() {
                Some(id) => repl.start(id),
                None => println!("{}", "Usage: start <scenario_id>".red()),
            },
            _ => repl.send(&verb, &args),
        }
    }

    println!("{}", "Goodbye!".yellow());
    Ok(())
}

impl Repl {
    fn start(&mut self, scenario: &str) {
        match self.engine.create_game(&self.agent, scenario) {
            Ok(game) => {
                self.session = Some(game.session_id);
                let name = self
                    .engine
                    .catalog()
                    .get(scenario)
                    .map_or_else(|| scenario.to_string(), |s| s.info().name.clone());
                println!("\n  {} {}\n", "Starting".bold(), name.bold());
                println!("{}\n", game.initial_message);
            }
            Err(e) => println!("{}", format!("Failed to start game: {e}").red()),
        }
    }

    fn send(&mut self, verb: &str, args: &[String]) {
        let Some(id) = self.session else {
            println!("{}", format!("Unknown command: {verb}").red());
            println!("{}", "Type \"help\" for available commands".dimmed());
            return;
        };

        match self.engine.execute_command(id, verb, args) {
            Ok(result) => {
                super::print_result(&result);
                if let Some(status) = result.game_status.filter(|s| s.is_terminal()) {
                    super::print_outcome(status);
                    self.status();
                    println!(
                        "{}",
                        "Type 'start <scenario>' to play again or 'quit' to exit.".dimmed()
                    );
                }
            }
            Err(e) => println!("{}", format!("Error: {e}").yellow()),
        }
    }

    fn status(&self) {
        let Some(id) = self.session else {
            println!("{}", "No active game. Use 'start <scenario>'.".dimmed());
            return;
        };
        match self.engine.get_state(id) {
            Ok(snapshot) => println!("  {}", super::status_line(&snapshot.game, snapshot.elapsed_ms)),
            Err(e) => println!("{}", format!("Error: {e}").yellow()),
        }
    }

    fn help(&self) {
        println!("\n{}\n", "Available Commands:".bold());
        for (cmd, desc) in META_COMMANDS {
            println!("  {} {}", format!("{cmd:<25}").cyan(), desc.dimmed());
        }
        if let Some(help) = self.session.and_then(|id| self.engine.get_help(id).ok()) {
            println!("\n{}\n", "Game Commands:".bold());
            println!("{help}");
        }
        println!();
    }

    fn list(&self) {
        println!("\n{}\n", "Available Scenarios:".bold());
        for s in self.engine.scenarios() {
            println!("  {:<20} {:<8} {}", s.id.cyan(), s.difficulty, s.name.dimmed());
            println!("    {}", s.description.dimmed());
        }
        println!();
    }
}
