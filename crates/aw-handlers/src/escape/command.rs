//! Verb parsing for the escape-room handler.

use aw_core::Direction;
use strsim::jaro_winkler;

/// Minimum similarity for a "did you mean" suggestion (0.0-1.0).
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Every verb the escape-room handler understands.
pub const KNOWN_VERBS: &[&str] = &[
    "move", "go", "n", "s", "e", "w", "north", "south", "east", "west", "look", "l", "examine",
    "x", "take", "get", "pickup", "use", "inventory", "i", "inv", "solve", "hint", "help", "h",
    "?",
];

/// A parsed escape-room command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscapeCommand {
    /// Move one room over.
    Move {
        /// The direction to move.
        direction: Direction,
    },
    /// `move`/`go` with a missing or unrecognised direction.
    BadDirection {
        /// What the player typed, empty if nothing.
        input: String,
    },
    /// Describe the current room.
    Look,
    /// Examine a target, or the room when absent.
    Examine {
        /// What to examine.
        target: Option<String>,
    },
    /// Pick up an object.
    Take {
        /// Object id or name; may be empty.
        target: String,
    },
    /// Use an object.
    Use {
        /// Object id or name; may be empty.
        target: String,
    },
    /// List carried objects.
    Inventory,
    /// Submit an answer.
    Solve {
        /// Challenge id; may be empty.
        challenge: String,
        /// Proposed solution; may be empty.
        answer: String,
    },
    /// Ask for a hint.
    Hint {
        /// Challenge id; may be empty.
        challenge: String,
    },
    /// Show the command reference.
    Help,
    /// Anything else.
    Unknown {
        /// The unrecognised verb.
        verb: String,
    },
}

/// Parse a verb and its arguments.
pub fn parse_command(command: &str, args: &[String]) -> EscapeCommand {
    let verb = command.trim().to_lowercase();
    let rest = args.join(" ");

    if let Some(direction) = Direction::parse(&verb) {
        return EscapeCommand::Move { direction };
    }

    match verb.as_str() {
        "move" | "go" => match args.first().and_then(|a| Direction::parse(a)) {
            Some(direction) => EscapeCommand::Move { direction },
            None => EscapeCommand::BadDirection { input: rest },
        },
        "look" | "l" => EscapeCommand::Look,
        "examine" | "x" => EscapeCommand::Examine {
            target: if rest.is_empty() { None } else { Some(rest) },
        },
        "take" | "get" | "pickup" => EscapeCommand::Take { target: rest },
        "use" => EscapeCommand::Use { target: rest },
        "inventory" | "i" | "inv" => EscapeCommand::Inventory,
        "solve" => EscapeCommand::Solve {
            challenge: args.first().cloned().unwrap_or_default(),
            answer: args.get(1..).map(|a| a.join(" ")).unwrap_or_default(),
        },
        "hint" => EscapeCommand::Hint {
            challenge: args.first().cloned().unwrap_or_default(),
        },
        "help" | "h" | "?" => EscapeCommand::Help,
        _ => EscapeCommand::Unknown { verb },
    }
}

/// The closest known verb to `verb`, if any is close enough.
pub fn suggest_verb(verb: &str) -> Option<&'static str> {
    let verb = verb.to_lowercase();
    KNOWN_VERBS
        .iter()
        .filter(|known| known.len() > 1)
        .map(|known| (*known, jaro_winkler(&verb, known)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(known, _)| known)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn bare_directions() {
        assert_eq!(
            parse_command("n", &[]),
            EscapeCommand::Move {
                direction: Direction::North
            }
        );
        assert_eq!(
            parse_command("West", &[]),
            EscapeCommand::Move {
                direction: Direction::West
            }
        );
    }

    #[test]
    fn move_with_direction() {
        assert_eq!(
            parse_command("go", &args(&["east"])),
            EscapeCommand::Move {
                direction: Direction::East
            }
        );
        assert_eq!(
            parse_command("move", &args(&["up"])),
            EscapeCommand::BadDirection {
                input: "up".to_string()
            }
        );
        assert_eq!(
            parse_command("move", &[]),
            EscapeCommand::BadDirection {
                input: String::new()
            }
        );
    }

    #[test]
    fn examine_joins_words() {
        assert_eq!(
            parse_command("x", &args(&["cipher", "book"])),
            EscapeCommand::Examine {
                target: Some("cipher book".to_string())
            }
        );
        assert_eq!(
            parse_command("examine", &[]),
            EscapeCommand::Examine { target: None }
        );
    }

    #[test]
    fn solve_splits_id_and_answer() {
        assert_eq!(
            parse_command("solve", &args(&["cipher_puzzle", "HELLO", "WORLD"])),
            EscapeCommand::Solve {
                challenge: "cipher_puzzle".to_string(),
                answer: "HELLO WORLD".to_string()
            }
        );
        assert_eq!(
            parse_command("solve", &[]),
            EscapeCommand::Solve {
                challenge: String::new(),
                answer: String::new()
            }
        );
    }

    #[test]
    fn take_aliases() {
        for verb in ["take", "get", "pickup"] {
            assert_eq!(
                parse_command(verb, &args(&["key"])),
                EscapeCommand::Take {
                    target: "key".to_string()
                }
            );
        }
    }

    #[test]
    fn unknown_verb() {
        assert_eq!(
            parse_command("fly", &[]),
            EscapeCommand::Unknown {
                verb: "fly".to_string()
            }
        );
    }

    #[test]
    fn suggestions() {
        assert_eq!(suggest_verb("exmaine"), Some("examine"));
        assert_eq!(suggest_verb("inventroy"), Some("inventory"));
        assert_eq!(suggest_verb("zzz"), None);
    }
}
