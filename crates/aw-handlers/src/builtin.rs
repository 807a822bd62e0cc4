//! Scenarios shipped with the crate.

use aw_core::{CatalogResult, Scenario, ScenarioCatalog};

use crate::definition::ScenarioDefinition;

/// Embedded definitions, in listing order.
pub(crate) const BUILTIN: &[(&str, &str)] = &[
    (
        "library_escape.json",
        include_str!("../scenarios/library_escape.json"),
    ),
    ("bell_timer.json", include_str!("../scenarios/bell_timer.json")),
    (
        "cellar_escape.json",
        include_str!("../scenarios/cellar_escape.json"),
    ),
];

/// Parse and validate the embedded scenarios.
pub fn builtin_scenarios() -> CatalogResult<Vec<Scenario>> {
    BUILTIN
        .iter()
        .map(|(origin, text)| ScenarioDefinition::from_json(origin, text)?.into_scenario())
        .collect()
}

/// A catalog holding every embedded scenario.
pub fn builtin_catalog() -> CatalogResult<ScenarioCatalog> {
    let mut catalog = ScenarioCatalog::new();
    for scenario in builtin_scenarios()? {
        catalog.register(scenario)?;
    }
    Ok(catalog)
}
