//! Scenario catalog: the read-only registry of playable scenarios.
//!
//! The catalog is filled once at startup and shared (behind an `Arc`) for the
//! lifetime of the process. Nothing in it changes after registration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::clock::Clock;
use crate::error::{CatalogError, CatalogResult};
use crate::handler::{HandlerFactory, ScenarioHandler};
use crate::scenario::{ScenarioInfo, ScenarioSummary};

/// A playable scenario: metadata plus the factory for its rules.
pub struct Scenario {
    info: ScenarioInfo,
    factory: Arc<dyn HandlerFactory>,
}

impl Scenario {
    /// Pair scenario metadata with a handler factory.
    pub fn new(info: ScenarioInfo, factory: impl HandlerFactory + 'static) -> Self {
        Self {
            info,
            factory: Arc::new(factory),
        }
    }

    /// Scenario metadata.
    pub fn info(&self) -> &ScenarioInfo {
        &self.info
    }

    /// Scenario id.
    pub fn id(&self) -> &str {
        &self.info.id
    }

    /// Build a handler with fresh per-session state.
    pub fn create_handler(&self, clock: Arc<dyn Clock>) -> Box<dyn ScenarioHandler> {
        self.factory.create_handler(clock)
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

/// Registry of scenarios, in registration order.
#[derive(Debug, Default)]
pub struct ScenarioCatalog {
    scenarios: Vec<Arc<Scenario>>,
    by_id: HashMap<String, usize>,
}

impl ScenarioCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scenario. Ids must be unique.
    pub fn register(&mut self, scenario: Scenario) -> CatalogResult<()> {
        if self.by_id.contains_key(scenario.id()) {
            return Err(CatalogError::DuplicateScenario(scenario.id().to_string()));
        }
        self.by_id
            .insert(scenario.id().to_string(), self.scenarios.len());
        self.scenarios.push(Arc::new(scenario));
        Ok(())
    }

    /// Look up a scenario by id.
    pub fn get(&self, id: &str) -> Option<Arc<Scenario>> {
        self.by_id.get(id).map(|&i| Arc::clone(&self.scenarios[i]))
    }

    /// Whether a scenario with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Discovery listing of all scenarios.
    pub fn list(&self) -> Vec<ScenarioSummary> {
        self.scenarios.iter().map(|s| s.info().summary()).collect()
    }

    /// Iterate over all scenarios.
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().map(Arc::as_ref)
    }

    /// Number of registered scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
