//! Rooms, objects, and compass geometry.
//!
//! Rooms are placed on an integer grid. Moving in a [`Direction`] resolves to
//! whichever room sits one unit away along that direction; a room's exit list
//! only says which directions are *allowed*, never where they lead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards smaller `y`.
    North,
    /// Towards larger `y`.
    South,
    /// Towards larger `x`.
    East,
    /// Towards smaller `x`.
    West,
}

impl Direction {
    /// All directions in display order.
    pub const ALL: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Parse a direction from a full name or single-letter abbreviation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "s" | "south" => Some(Self::South),
            "e" | "east" => Some(Self::East),
            "w" | "west" => Some(Self::West),
            _ => None,
        }
    }

    /// Get the display name for this direction.
    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }

    /// The direction leading back.
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Grid offset of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A room's coordinate on the map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row; grows southwards.
    pub y: i32,
}

impl Position {
    /// Create a position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position one step away in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An object lying in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObject {
    /// Stable identifier used by commands.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Text shown on examine.
    pub description: String,
    /// Whether the player can pick it up.
    #[serde(default)]
    pub takeable: bool,
}

impl GameObject {
    /// Whether `target` names this object, by id or case-insensitive name.
    pub fn matches(&self, target: &str) -> bool {
        self.id == target || self.name.to_lowercase() == target.to_lowercase()
    }
}

/// A room in an escape-room layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Text shown on look.
    pub description: String,
    /// Directions the player may try to leave by.
    #[serde(default)]
    pub exits: Vec<Direction>,
    /// Objects currently in the room.
    #[serde(default)]
    pub objects: Vec<GameObject>,
    /// Ids of challenges placed here.
    #[serde(default)]
    pub challenges: Vec<String>,
    /// Entering this room wins the game.
    #[serde(default)]
    pub is_exit: bool,
    /// Whether entry is currently blocked.
    #[serde(default)]
    pub locked: bool,
    /// Object or challenge id that opens the lock.
    #[serde(default)]
    pub unlock_requires: Option<String>,
    /// Grid coordinate.
    pub position: Position,
}

impl Room {
    /// Whether the exit list allows leaving in `direction`.
    pub fn has_exit(&self, direction: Direction) -> bool {
        self.exits.contains(&direction)
    }

    /// Index of the object named by `target` in this room.
    pub fn find_object(&self, target: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.matches(target))
    }

    /// Comma-separated exit names.
    pub fn exit_list(&self) -> String {
        self.exits
            .iter()
            .map(|d| d.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Comma-separated object names.
    pub fn object_list(&self) -> String {
        self.objects
            .iter()
            .map(|o| o.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
