//! Command implementations

pub mod assign;
pub mod classify;
pub mod completions;
pub mod config;
pub mod resolve;
pub mod suggest;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use zonemap::requirements::Requirements;
use zonemap::{Classifier, MatchTables};

use crate::config::RuntimeContext;
use crate::output::read_input;

/// Load the extractor's requirements document
pub(crate) fn load_requirements(path: &Path) -> Result<Requirements> {
    let text = read_input(path)?;
    Requirements::from_json(&text)
        .with_context(|| format!("parsing requirements from {}", path.display()))
}

/// Classifier over the configured rules with per-class temperatures
pub(crate) fn classifier<'a>(
    ctx: &RuntimeContext,
    tables: &'a MatchTables,
    temperatures: BTreeMap<String, f64>,
) -> Classifier<'a> {
    log::debug!("{} class temperatures from requirements", temperatures.len());
    Classifier::new(&tables.rules)
        .with_default_temperature(ctx.config.defaults.temperature)
        .with_class_temperatures(temperatures)
}

/// Class temperatures of an optional requirements document. Unreadable
/// values are logged by the adapter and left out.
pub(crate) fn class_temperatures(requirements: Option<&Requirements>) -> BTreeMap<String, f64> {
    requirements
        .map(|requirements| requirements.class_temperatures().0)
        .unwrap_or_default()
}

/// Placeholder cell for absent values in tables
pub(crate) fn cell<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_temperatures_skip_unreadable_values() {
        let requirements =
            Requirements::from_json(r#"{"room_temperatures": {"Офис": "тепло", "Коридор": 16}}"#)
                .unwrap();

        let temperatures = class_temperatures(Some(&requirements));
        assert_eq!(temperatures, BTreeMap::from([("Коридор".to_string(), 16.0)]));

        // The skipped value is still reported by the adapter
        assert_eq!(requirements.class_temperatures().1.len(), 1);
    }

    #[test]
    fn test_class_temperatures_without_requirements() {
        assert!(class_temperatures(None).is_empty());
    }

    #[test]
    fn test_cell() {
        assert_eq!(cell(Some(21.5)), "21.5");
        assert_eq!(cell(None::<&str>), "-");
    }
}
