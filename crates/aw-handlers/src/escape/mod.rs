//! Room-graph escape-room rules.
//!
//! Each handler owns a private copy of the scenario's rooms, so unlocking a
//! door or picking up an object never leaks into the catalog or into other
//! sessions playing the same scenario.

/// Verb parsing.
pub mod command;

use std::sync::Arc;

use aw_core::scenario::neighbor_index;
use aw_core::{
    ActionResult, Clock, Direction, EscapeRoomData, GameObject, HandlerFactory, Room,
    ScenarioHandler, WinCheck,
};
use serde_json::json;
use tracing::debug;

use self::command::{EscapeCommand, parse_command, suggest_verb};

/// Exploration bonus per distinct room visited.
const ROOM_BONUS: i64 = 10;
/// Bonus per solved challenge.
const CHALLENGE_BONUS: i64 = 100;
/// Penalty per hint requested.
const HINT_PENALTY: i64 = 50;

/// Factory for escape-room handlers over one layout.
#[derive(Debug, Clone)]
pub struct EscapeRoomScenario {
    data: Arc<EscapeRoomData>,
}

impl EscapeRoomScenario {
    /// Wrap a layout.
    pub fn new(data: EscapeRoomData) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    /// The shared layout.
    pub fn data(&self) -> &EscapeRoomData {
        &self.data
    }
}

impl HandlerFactory for EscapeRoomScenario {
    fn create_handler(&self, _clock: Arc<dyn Clock>) -> Box<dyn ScenarioHandler> {
        Box::new(EscapeRoomHandler::new(Arc::clone(&self.data)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interaction {
    Take,
    Use,
}

/// Per-session escape-room state machine.
#[derive(Debug, Clone)]
pub struct EscapeRoomHandler {
    /// Catalog layout, never mutated.
    data: Arc<EscapeRoomData>,
    /// Session copy of the rooms; locks and objects change here.
    rooms: Vec<Room>,
    current_room: String,
    inventory: Vec<String>,
    challenges_completed: Vec<String>,
    rooms_visited: Vec<String>,
    hints_used: u32,
}

impl EscapeRoomHandler {
    /// Start a fresh run of `data`.
    pub fn new(data: Arc<EscapeRoomData>) -> Self {
        let rooms = data.rooms.clone();
        let start = data.starting_room.clone();
        Self {
            data,
            rooms,
            current_room: start.clone(),
            inventory: Vec::new(),
            challenges_completed: Vec::new(),
            rooms_visited: vec![start],
            hints_used: 0,
        }
    }

    /// Id of the room the player is in.
    pub fn current_room(&self) -> &str {
        &self.current_room
    }

    /// Carried object ids, in pickup order.
    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    /// Solved challenge ids, in solve order.
    pub fn challenges_completed(&self) -> &[String] {
        &self.challenges_completed
    }

    /// Visited room ids, in first-visit order.
    pub fn rooms_visited(&self) -> &[String] {
        &self.rooms_visited
    }

    /// Number of hints requested.
    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    /// This session's view of a room.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    fn room_index(&self, id: &str) -> Option<usize> {
        self.rooms.iter().position(|r| r.id == id)
    }

    fn is_carried(&self, id: &str) -> bool {
        self.inventory.iter().any(|i| i == id)
    }

    fn is_completed(&self, id: &str) -> bool {
        self.challenges_completed.iter().any(|c| c == id)
    }

    /// An unlock requirement is met by a carried object or a solved challenge.
    fn satisfies(&self, requirement: &str) -> bool {
        self.is_carried(requirement) || self.is_completed(requirement)
    }

    /// A carried object, looked up in the catalog rooms it came from.
    /// Matches by id first, then by case-insensitive name.
    fn carried_object(&self, target: &str) -> Option<&GameObject> {
        let carried = || {
            self.data
                .rooms
                .iter()
                .flat_map(|r| r.objects.iter())
                .filter(|o| self.is_carried(&o.id))
        };
        let needle = target.to_lowercase();
        carried()
            .find(|o| o.id.to_lowercase() == needle)
            .or_else(|| carried().find(|o| o.name.to_lowercase() == needle))
    }

    fn do_move(&mut self, direction: Direction) -> ActionResult {
        let Some(here) = self.room_index(&self.current_room) else {
            return ActionResult::fail("Current room not found.");
        };
        let Some(dest) = neighbor_index(&self.rooms, &self.rooms[here], direction) else {
            return ActionResult::fail(format!("No exit to the {direction} from this room."));
        };

        if self.rooms[dest].locked {
            let opened = self.rooms[dest]
                .unlock_requires
                .as_deref()
                .is_some_and(|req| self.satisfies(req));
            if !opened {
                return ActionResult::fail(format!(
                    "The door to the {direction} is locked. You need to find a way to unlock it."
                ));
            }
            self.rooms[dest].locked = false;
            debug!(room = %self.rooms[dest].id, "door unlocked");
        }

        let room = &self.rooms[dest];
        self.current_room = room.id.clone();
        if !self.rooms_visited.contains(&room.id) {
            self.rooms_visited.push(room.id.clone());
        }

        ActionResult::ok(format!("You enter the {}.", room.name))
    }

    fn do_look(&self) -> ActionResult {
        let Some(room) = self.room(&self.current_room) else {
            return ActionResult::fail("Current room not found.");
        };

        let mut text = room.description.clone();

        if !room.exits.is_empty() {
            text.push_str(&format!("\n\nExits: {}", room.exit_list()));
        }
        if !room.objects.is_empty() {
            text.push_str(&format!("\n\nObjects: {}", room.object_list()));
        }

        let challenges: Vec<String> = room
            .challenges
            .iter()
            .map(|id| {
                let glyph = if self.is_completed(id) { '✓' } else { '⚡' };
                let title = self.data.challenge(id).map_or("?", |c| c.title.as_str());
                format!("{glyph} {title} [{id}]")
            })
            .collect();
        if !challenges.is_empty() {
            text.push_str(&format!("\n\nChallenges: {}", challenges.join(", ")));
        }

        ActionResult::ok(text)
    }

    fn do_examine(&self, target: Option<&str>) -> ActionResult {
        let Some(target) = target else {
            return self.do_look();
        };
        let Some(room) = self.room(&self.current_room) else {
            return ActionResult::fail("Current room not found.");
        };

        let needle = target.to_lowercase();
        let challenge = room
            .challenges
            .iter()
            .filter_map(|id| self.data.challenge(id))
            .find(|c| c.id == target || c.title.to_lowercase().contains(&needle));

        if let Some(challenge) = challenge {
            let mut message = format!(
                "{} [{}]\n\n{}",
                challenge.title, challenge.id, challenge.description
            );
            if self.is_completed(&challenge.id) {
                message = format!("✓ {message}\n\nThis challenge is already completed!");
            } else {
                let missing = challenge.missing_items(&self.inventory);
                if !missing.is_empty() {
                    message.push_str(&format!(
                        "\n\nRequired items: {}\nYou are missing: {}",
                        challenge.required_items.join(", "),
                        missing.join(", ")
                    ));
                }
            }
            return ActionResult::ok(message);
        }

        let object = room
            .objects
            .iter()
            .find(|o| o.matches(target))
            .or_else(|| self.carried_object(target));

        match object {
            Some(object) if self.is_carried(&object.id) => {
                ActionResult::ok(format!("{} (in your inventory)", object.description))
            }
            Some(object) => ActionResult::ok(object.description.clone()),
            None => ActionResult::fail(format!(
                "You don't see \"{target}\" here or in your inventory."
            )),
        }
    }

    fn do_interact(&mut self, target: &str, action: Interaction) -> ActionResult {
        if target.is_empty() {
            return ActionResult::fail(match action {
                Interaction::Take => "What do you want to take?",
                Interaction::Use => "What do you want to use?",
            });
        }
        let Some(here) = self.room_index(&self.current_room) else {
            return ActionResult::fail("Current room not found.");
        };

        let Some(index) = self.rooms[here].find_object(target) else {
            return match self.carried_object(target).map(|o| o.name.clone()) {
                None => ActionResult::fail(format!("You don't see \"{target}\" here.")),
                Some(name) => match action {
                    Interaction::Take => {
                        ActionResult::fail(format!("You already have the {name}."))
                    }
                    Interaction::Use => ActionResult::ok(format!("You use the {name}.")),
                },
            };
        };

        let name = self.rooms[here].objects[index].name.clone();
        match action {
            Interaction::Use => ActionResult::ok(format!("You use the {name}.")),
            Interaction::Take if !self.rooms[here].objects[index].takeable => {
                ActionResult::fail(format!("You can't take the {name}."))
            }
            Interaction::Take => {
                let object = self.rooms[here].objects.remove(index);
                if !self.is_carried(&object.id) {
                    self.inventory.push(object.id);
                }
                ActionResult::ok(format!("You picked up the {name}."))
            }
        }
    }

    fn do_inventory(&self) -> ActionResult {
        let mut lines = vec!["Inventory:".to_string()];
        if self.inventory.is_empty() {
            lines.push("  (empty)".to_string());
        } else {
            for id in &self.inventory {
                match self.carried_object(id) {
                    Some(object) => lines.push(format!("  • {id} ({})", object.name)),
                    None => lines.push(format!("  • {id}")),
                }
            }
            lines.push(String::new());
            lines.push("Tip: Use \"examine <item>\" to read items in your inventory".to_string());
        }
        ActionResult::ok(lines.join("\n"))
    }

    fn do_solve(&mut self, challenge_id: &str, answer: &str) -> ActionResult {
        if challenge_id.is_empty() || answer.trim().is_empty() {
            return ActionResult::fail("Usage: solve <challenge_id> <solution>");
        }
        let data = Arc::clone(&self.data);
        let Some(challenge) = data.challenge(challenge_id) else {
            return ActionResult::fail(format!("Challenge {challenge_id} not found."));
        };
        if self.is_completed(challenge_id) {
            return ActionResult::fail("You have already completed this challenge.");
        }
        if !challenge.missing_items(&self.inventory).is_empty() {
            return ActionResult::fail("You need specific items to attempt this challenge.");
        }
        if !challenge.accepts(answer) {
            return ActionResult::fail("Incorrect solution. Try again.");
        }

        self.challenges_completed.push(challenge.id.clone());
        debug!(challenge = %challenge.id, "challenge solved");

        if let Some(target) = &challenge.unlocks {
            if let Some(index) = self.room_index(target) {
                self.rooms[index].locked = false;
                debug!(room = %target, "door unlocked");
            }
        }

        match &challenge.reward {
            Some(reward) => ActionResult::ok(reward.clone()),
            None => ActionResult::ok("Challenge completed! You hear a click as something unlocks."),
        }
    }

    fn do_hint(&mut self, challenge_id: &str) -> ActionResult {
        if challenge_id.is_empty() {
            return ActionResult::fail("Usage: hint <challenge_id>");
        }
        let data = Arc::clone(&self.data);
        let Some(challenge) = data.challenge(challenge_id) else {
            return ActionResult::fail(format!("Challenge {challenge_id} not found."));
        };

        self.hints_used += 1;
        let hint = challenge
            .hint(self.hints_used)
            .unwrap_or("There are no hints for this challenge.");
        ActionResult::ok(format!("💡 Hint: {hint} (-{HINT_PENALTY} points)"))
    }
}

impl ScenarioHandler for EscapeRoomHandler {
    fn initial_message(&self) -> String {
        let Some(room) = self.room(&self.current_room) else {
            return "Error: starting room not found".to_string();
        };

        let mut lines = vec![room.name.clone(), room.description.clone()];
        if !room.exits.is_empty() {
            lines.push(String::new());
            lines.push(format!("Exits: {}", room.exit_list()));
        }
        if !room.objects.is_empty() {
            lines.push(format!("Objects: {}", room.object_list()));
        }
        lines.join("\n")
    }

    fn help(&self) -> String {
        [
            "  move <dir>, go <dir>      Move in a direction (north/south/east/west)",
            "  n, s, e, w                Shorthand for move north/south/east/west",
            "  look, l                   Look around the current room",
            "  examine <target>, x       Examine object, challenge, or inventory item",
            "  take <object>, get        Pick up an object",
            "  use <object>              Use an object",
            "  inventory, i              Check your inventory",
            "",
            "  solve <challenge_id> <answer>  Submit solution (use examine to see ID)",
            "  hint <challenge_id>       Get a hint for a challenge (penalty)",
        ]
        .join("\n")
    }

    fn execute_command(&mut self, command: &str, args: &[String]) -> ActionResult {
        match parse_command(command, args) {
            EscapeCommand::Move { direction } => self.do_move(direction),
            EscapeCommand::BadDirection { input } if input.is_empty() => {
                ActionResult::fail("Move where? Try north, south, east or west.")
            }
            EscapeCommand::BadDirection { input } => ActionResult::fail(format!(
                "Unknown direction: {input}. Try north, south, east or west."
            )),
            EscapeCommand::Look => self.do_look(),
            EscapeCommand::Examine { target } => self.do_examine(target.as_deref()),
            EscapeCommand::Take { target } => self.do_interact(&target, Interaction::Take),
            EscapeCommand::Use { target } => self.do_interact(&target, Interaction::Use),
            EscapeCommand::Inventory => self.do_inventory(),
            EscapeCommand::Solve { challenge, answer } => self.do_solve(&challenge, &answer),
            EscapeCommand::Hint { challenge } => self.do_hint(&challenge),
            EscapeCommand::Help => ActionResult::ok(self.help()),
            EscapeCommand::Unknown { verb } => {
                let mut message = format!("Unknown command: {verb}");
                if let Some(suggestion) = suggest_verb(&verb) {
                    message.push_str(&format!(". Did you mean '{suggestion}'?"));
                }
                ActionResult::fail(message)
            }
        }
    }

    fn check_win_condition(&self) -> WinCheck {
        match self.room(&self.current_room) {
            Some(room) if room.is_exit => WinCheck::won("You escaped!"),
            _ => WinCheck::pending(),
        }
    }

    fn state(&self) -> serde_json::Value {
        json!({
            "current_room": self.current_room,
            "current_room_data": self.room(&self.current_room),
            "all_rooms": self.rooms,
            "inventory": self.inventory,
            "challenges_completed": self.challenges_completed,
            "rooms_visited": self.rooms_visited,
            "hints_used": self.hints_used,
        })
    }

    fn score_adjustment(&self) -> i64 {
        let visited = i64::try_from(self.rooms_visited.len()).unwrap_or(i64::MAX);
        let solved = i64::try_from(self.challenges_completed.len()).unwrap_or(i64::MAX);
        visited * ROOM_BONUS + solved * CHALLENGE_BONUS - i64::from(self.hints_used) * HINT_PENALTY
    }
}
