//! Scenario definition files.
//!
//! One JSON document per scenario: the shared metadata plus a `kind` tag
//! selecting the rules, with the rule payload inline.
//!
//! ```json
//! { "id": "bell_timer", "name": "The Bell Timer", "difficulty": "easy",
//!   "description": "...", "optimal_turns": 4, "time_limit_secs": 60,
//!   "kind": "bell_timer" }
//! ```

use std::fs;
use std::path::Path;

use aw_core::{CatalogError, CatalogResult, EscapeRoomData, Scenario, ScenarioInfo};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::escape::EscapeRoomScenario;
use crate::timer::BellTimerScenario;

/// Rules selected by a definition's `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioRules {
    /// Room-graph escape room.
    EscapeRoom(EscapeRoomData),
    /// Two rings, ten seconds apart.
    BellTimer,
}

/// A parsed scenario definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Metadata shown in listings and used for scoring.
    #[serde(flatten)]
    pub info: ScenarioInfo,
    /// Variant-specific rules.
    #[serde(flatten)]
    pub rules: ScenarioRules,
}

impl ScenarioDefinition {
    /// Parse a definition; `origin` names the source in errors.
    pub fn from_json(origin: &str, text: &str) -> CatalogResult<Self> {
        serde_json::from_str(text).map_err(|source| CatalogError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Read and parse a definition file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&path.display().to_string(), &text)
    }

    /// Check the definition for internal consistency.
    pub fn validate(&self) -> CatalogResult<()> {
        let id = &self.info.id;
        if id.trim().is_empty() {
            return Err(CatalogError::invalid(id, "scenario id is empty"));
        }
        match &self.rules {
            ScenarioRules::EscapeRoom(data) => data.validate(id),
            ScenarioRules::BellTimer => Ok(()),
        }
    }

    /// Validate and bind the rules to a handler factory.
    pub fn into_scenario(self) -> CatalogResult<Scenario> {
        self.validate()?;
        let scenario = match self.rules {
            ScenarioRules::EscapeRoom(data) => {
                Scenario::new(self.info, EscapeRoomScenario::new(data))
            }
            ScenarioRules::BellTimer => Scenario::new(self.info, BellTimerScenario),
        };
        Ok(scenario)
    }
}

/// Load every `*.json` definition in `dir`, in file-name order.
pub fn load_dir(dir: &Path) -> CatalogResult<Vec<Scenario>> {
    let io_error = |source| CatalogError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| {
            debug!(path = %path.display(), "loading scenario definition");
            ScenarioDefinition::load(path)?.into_scenario()
        })
        .collect()
}
