//! Challenge definitions.
//!
//! A challenge is shared, immutable catalog data. Whether it has been solved
//! is tracked by each session, never on the challenge itself.

use serde::{Deserialize, Serialize};

/// Broad category of a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeType {
    /// Deduction or decoding.
    Logic,
    /// Programming puzzle.
    Code,
    /// Word riddle.
    Riddle,
    /// Ordering puzzle.
    Sequence,
}

/// A puzzle placed in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Stable identifier used by `solve` and `hint`.
    pub id: String,
    /// Puzzle category.
    #[serde(rename = "type")]
    pub kind: ChallengeType,
    /// Display title.
    pub title: String,
    /// Full puzzle text.
    pub description: String,
    /// Canonical answer.
    pub solution: String,
    /// Hints in the order they are handed out.
    #[serde(default)]
    pub hints: Vec<String>,
    /// Objects the player must carry to attempt it.
    #[serde(default)]
    pub required_items: Vec<String>,
    /// Message shown on success.
    #[serde(default)]
    pub reward: Option<String>,
    /// Room whose lock is cleared on success.
    #[serde(default)]
    pub unlocks: Option<String>,
}

impl Challenge {
    /// Whether `answer` matches the solution, ignoring case and surrounding whitespace.
    pub fn accepts(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.solution.trim().to_lowercase()
    }

    /// Required items not present in `inventory`.
    pub fn missing_items<'a>(&'a self, inventory: &[String]) -> Vec<&'a str> {
        self.required_items
            .iter()
            .filter(|item| !inventory.contains(item))
            .map(String::as_str)
            .collect()
    }

    /// The hint to hand out when `hints_used` hints have been requested so far,
    /// counting this one. The last hint repeats once the list runs out.
    pub fn hint(&self, hints_used: u32) -> Option<&str> {
        let last = self.hints.len().checked_sub(1)?;
        let wanted = usize::try_from(hints_used.saturating_sub(1)).unwrap_or(usize::MAX);
        self.hints.get(wanted.min(last)).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> Challenge {
        Challenge {
            id: "cipher".to_string(),
            kind: ChallengeType::Logic,
            title: "The Cipher Door".to_string(),
            description: "URYYB JBEYQ".to_string(),
            solution: "HELLO WORLD".to_string(),
            hints: vec!["one".to_string(), "two".to_string()],
            required_items: vec!["book".to_string()],
            reward: None,
            unlocks: None,
        }
    }

    #[test]
    fn answers_ignore_case_and_padding() {
        let c = cipher();
        assert!(c.accepts("  hello world "));
        assert!(c.accepts("HELLO WORLD"));
        assert!(!c.accepts("hello  world"));
    }

    #[test]
    fn last_hint_repeats() {
        let c = cipher();
        assert_eq!(c.hint(1), Some("one"));
        assert_eq!(c.hint(2), Some("two"));
        assert_eq!(c.hint(7), Some("two"));
    }

    #[test]
    fn no_hints_yields_none() {
        let mut c = cipher();
        c.hints.clear();
        assert_eq!(c.hint(1), None);
    }

    #[test]
    fn missing_items_listed() {
        let c = cipher();
        assert_eq!(c.missing_items(&[]), vec!["book"]);
        assert!(c.missing_items(&["book".to_string()]).is_empty());
    }

    #[test]
    fn type_field_is_renamed() {
        let json = serde_json::to_value(cipher()).unwrap();
        assert_eq!(json["type"], "logic");
    }
}
