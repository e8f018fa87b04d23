//! Match report and stub assembly
//!
//! Runs containment matching for every space, asks the fuzzy matcher for a
//! suggestion where containment found nothing, and collects the outcome
//! into an auditable report plus the placement stubs for matched spaces.

use serde::{Deserialize, Serialize};

use crate::classify::Classifier;
use crate::containment::{find_spec, MatchedBy};
use crate::fuzzy::{
    assign, similarity, suggest, Assignment, DEFAULT_ASSIGN_CUTOFF, DEFAULT_SUGGEST_CUTOFF,
};
use crate::model::{Space, ZoneSpec};
use crate::requirements::ProjectParams;
use crate::stub::{plan_stubs, PlacementStub, StubDefaults};
use crate::tables::MatchTables;

/// A space resolved to a zone spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPair {
    pub space: Space,
    /// The zone spec, after class and temperature defaults were applied
    pub zone: ZoneSpec,
    pub matched_by: MatchedBy,
    /// Similarity score, for matches made by scoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

/// A space no zone spec could be resolved for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedSpace {
    pub id: String,
    pub name: String,
    /// Advisory best guess among the zone names, never applied
    pub suggested_match: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion_score: Option<u8>,
}

/// A zone spec no space resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedZone {
    pub name: String,
    /// Highest similarity of the zone name to any space name, 0 without
    /// spaces. Tells a near miss from a zone with no candidate at all.
    pub best_score: u8,
}

/// Final audit artifact of a resolution run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// One entry per resolved space, in space order
    pub matched: Vec<MatchPair>,
    /// Zones no space resolved to, in zone order
    pub unmatched_zones: Vec<UnmatchedZone>,
    /// Unresolved spaces, in space order
    pub unmatched_spaces: Vec<UnmatchedSpace>,
}

impl MatchReport {
    pub fn is_complete(&self) -> bool {
        self.unmatched_zones.is_empty() && self.unmatched_spaces.is_empty()
    }
}

/// Report plus the stubs derived from its matched pairs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub stubs: Vec<PlacementStub>,
    pub report: MatchReport,
}

/// Result of the fuzzy-only entry point over spaces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceAssignment {
    pub assignment: Assignment,
    pub stubs: Vec<PlacementStub>,
}

/// Matching run configuration: tables, classifier and defaults
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    tables: &'a MatchTables,
    classifier: Classifier<'a>,
    suggest_cutoff: u8,
    defaults: StubDefaults,
    project: ProjectParams,
}

impl<'a> Resolver<'a> {
    pub fn new(tables: &'a MatchTables) -> Self {
        Self {
            tables,
            classifier: Classifier::new(&tables.rules),
            suggest_cutoff: DEFAULT_SUGGEST_CUTOFF,
            defaults: StubDefaults::default(),
            project: ProjectParams::default(),
        }
    }

    /// Replace the classifier, e.g. one carrying per-class temperatures.
    /// It should be built over `tables.rules`.
    pub fn with_classifier(mut self, classifier: Classifier<'a>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_suggest_cutoff(mut self, cutoff: u8) -> Self {
        self.suggest_cutoff = cutoff;
        self
    }

    pub fn with_defaults(mut self, defaults: StubDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_project(mut self, project: ProjectParams) -> Self {
        self.project = project;
        self
    }

    pub fn classifier(&self) -> &Classifier<'a> {
        &self.classifier
    }

    /// Resolve every space against `specs` by containment, suggesting a
    /// zone name for the spaces that stay unresolved.
    pub fn resolve(&self, spaces: &[Space], specs: &[ZoneSpec]) -> Resolution {
        let specs = self.enrich(specs);
        let candidates: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        let mut zone_resolved = vec![false; specs.len()];
        let mut resolution = Resolution::default();

        for space in spaces {
            match find_spec(&space.name, &specs, &self.tables.synonyms) {
                Some(hit) => {
                    log::debug!(
                        "space '{}' ({}) -> zone '{}' via {:?}",
                        space.name,
                        space.id,
                        hit.spec.name,
                        hit.matched_by
                    );
                    zone_resolved[hit.index] = true;
                    resolution.stubs.push(PlacementStub::derive(
                        space,
                        hit.spec,
                        &self.project,
                        &self.defaults,
                    ));
                    resolution.report.matched.push(MatchPair {
                        space: space.clone(),
                        zone: hit.spec.clone(),
                        matched_by: hit.matched_by,
                        score: None,
                    });
                }
                None => {
                    let suggestion = suggest(&space.name, &candidates, self.suggest_cutoff);
                    log::debug!(
                        "space '{}' ({}) unresolved, suggestion: {:?}",
                        space.name,
                        space.id,
                        suggestion.map(|s| s.candidate)
                    );
                    resolution.report.unmatched_spaces.push(UnmatchedSpace {
                        id: space.id.clone(),
                        name: space.name.clone(),
                        suggested_match: suggestion.map(|s| s.candidate.to_string()),
                        suggestion_score: suggestion.map(|s| s.score),
                    });
                }
            }
        }

        resolution.report.unmatched_zones = specs
            .iter()
            .zip(&zone_resolved)
            .filter(|(_, resolved)| !**resolved)
            .map(|(spec, _)| UnmatchedZone {
                name: spec.name.clone(),
                best_score: spaces
                    .iter()
                    .map(|space| similarity(&spec.name, &space.name))
                    .max()
                    .unwrap_or(0),
            })
            .collect();

        log::info!(
            "resolved {} of {} spaces, {} zones without a space",
            resolution.report.matched.len(),
            spaces.len(),
            resolution.report.unmatched_zones.len()
        );

        resolution
    }

    /// Fuzzy-only matching: assign zone specs to spaces one-to-one by name
    /// score and derive stubs for the assigned pairs.
    pub fn assign_spaces(&self, specs: &[ZoneSpec], spaces: &[Space], cutoff: u8) -> SpaceAssignment {
        let specs = self.enrich(specs);
        let zone_names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        let room_names: Vec<&str> = spaces.iter().map(|s| s.name.as_str()).collect();

        let assignment = assign(&zone_names, &room_names, cutoff);
        let stubs = plan_stubs(&specs, &assignment, spaces, &self.project, &self.defaults);

        SpaceAssignment { assignment, stubs }
    }

    fn enrich(&self, specs: &[ZoneSpec]) -> Vec<ZoneSpec> {
        specs
            .iter()
            .cloned()
            .map(|mut spec| {
                self.classifier.enrich(&mut spec);
                spec
            })
            .collect()
    }
}

/// Resolve spaces against zone specs with default settings.
pub fn build_report(spaces: &[Space], specs: &[ZoneSpec], tables: &MatchTables) -> Resolution {
    Resolver::new(tables).resolve(spaces, specs)
}

/// Assign zone specs to spaces by name score with default settings.
pub fn assign_spaces(specs: &[ZoneSpec], spaces: &[Space], tables: &MatchTables) -> SpaceAssignment {
    Resolver::new(tables).assign_spaces(specs, spaces, DEFAULT_ASSIGN_CUTOFF)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::model::Point3;

    fn spaces() -> Vec<Space> {
        vec![
            Space::new("s1", "Офис 101").at(Point3::new(1.0, 1.0, 0.0)),
            Space::new("s2", "Холл 1 этажа").on_storey("1"),
            Space::new("s3", "Серверная"),
            Space::new("s4", "Кабинет 12"),
            Space::new("s5", "Коридор секции"),
        ]
    }

    fn specs() -> Vec<ZoneSpec> {
        vec![
            ZoneSpec::new("Офис").with_temperature(21.0),
            ZoneSpec::new("Коридор"),
            ZoneSpec::new("Веранда"),
        ]
    }

    #[test]
    fn test_resolve_matches_names_and_synonyms() {
        let tables = MatchTables::defaults();
        let resolution = build_report(&spaces(), &specs(), &tables);
        let report = &resolution.report;

        let matched: Vec<(&str, &str)> = report
            .matched
            .iter()
            .map(|m| (m.space.id.as_str(), m.zone.name.as_str()))
            .collect();
        assert_eq!(
            matched,
            [("s1", "Офис"), ("s2", "Коридор"), ("s4", "Офис"), ("s5", "Коридор")]
        );
        assert_eq!(report.matched[1].matched_by, MatchedBy::Synonym("холл".to_string()));
        assert_eq!(report.matched[3].matched_by, MatchedBy::Name("Коридор".to_string()));

        assert_eq!(report.unmatched_spaces.len(), 1);
        assert_eq!(report.unmatched_spaces[0].id, "s3");
        assert_eq!(
            report.unmatched_zones,
            vec![UnmatchedZone {
                name: "Веранда".to_string(),
                best_score: 62,
            }]
        );
        assert!(!report.is_complete());
    }

    #[test]
    fn test_resolve_every_entry_accounted_for() {
        let tables = MatchTables::defaults();
        let spaces = spaces();
        let specs = specs();
        let report = build_report(&spaces, &specs, &tables).report;

        assert_eq!(report.matched.len() + report.unmatched_spaces.len(), spaces.len());
        for spec in &specs {
            let matched = report.matched.iter().any(|m| m.zone.name == spec.name);
            let unmatched = report.unmatched_zones.iter().any(|z| z.name == spec.name);
            assert!(matched != unmatched, "zone {} accounted for twice or never", spec.name);
        }
    }

    #[test]
    fn test_resolve_stubs_follow_matches() {
        let tables = MatchTables::defaults();
        let resolution = build_report(&spaces(), &specs(), &tables);

        assert_eq!(resolution.stubs.len(), resolution.report.matched.len());
        let office = &resolution.stubs[0];
        assert_eq!(office.id, "s1");
        assert_eq!(office.params.temperature, 21.0);
        assert_eq!(office.params.class.as_deref(), Some("Офис"));
        assert_eq!(office.coordinates, Point3::new(1.0, 1.0, 0.0));

        // No temperature in the requirement and no class temperature known
        let corridor = &resolution.stubs[1];
        assert_eq!(corridor.params.temperature, 22.0);
    }

    #[test]
    fn test_class_temperatures_fill_gaps() {
        let tables = MatchTables::defaults();
        let classifier = Classifier::new(&tables.rules)
            .with_class_temperatures(BTreeMap::from([("Коридор".to_string(), 16.0)]));
        let resolution = Resolver::new(&tables)
            .with_classifier(classifier)
            .resolve(&spaces(), &specs());

        assert_eq!(resolution.stubs[1].params.temperature, 16.0);
        assert_eq!(resolution.report.matched[1].zone.temperature, Some(16.0));
    }

    #[test]
    fn test_unmatched_space_gets_suggestion() {
        let tables = MatchTables::new(vec![], vec![], "Room").unwrap();
        let spaces = vec![Space::new("k", "kitchen area"), Space::new("x", "Zone X")];
        let specs = vec![ZoneSpec::new("Kitchen Main"), ZoneSpec::new("Bathroom")];
        let report = build_report(&spaces, &specs, &tables).report;

        assert!(report.matched.is_empty());
        assert_eq!(
            report.unmatched_spaces[0].suggested_match.as_deref(),
            Some("Kitchen Main")
        );
        assert_eq!(report.unmatched_spaces[1].suggested_match, None);

        let best: Vec<(&str, u8)> = report
            .unmatched_zones
            .iter()
            .map(|z| (z.name.as_str(), z.best_score))
            .collect();
        assert_eq!(best, [("Kitchen Main", 75), ("Bathroom", 30)]);
    }

    #[test]
    fn test_suggestion_cutoff_is_configurable() {
        let tables = MatchTables::new(vec![], vec![], "Room").unwrap();
        let spaces = vec![Space::new("k", "kitchen area")];
        let specs = vec![ZoneSpec::new("Kitchen Main")];
        let report = Resolver::new(&tables)
            .with_suggest_cutoff(101)
            .resolve(&spaces, &specs)
            .report;
        assert_eq!(report.unmatched_spaces[0].suggested_match, None);
    }

    #[test]
    fn test_empty_inputs() {
        let tables = MatchTables::defaults();

        let resolution = build_report(&[], &specs(), &tables);
        assert!(resolution.report.matched.is_empty());
        assert_eq!(resolution.report.unmatched_zones.len(), 3);
        assert!(resolution
            .report
            .unmatched_zones
            .iter()
            .all(|z| z.best_score == 0));

        let resolution = build_report(&spaces(), &[], &tables);
        assert!(resolution.report.matched.is_empty());
        assert!(resolution.report.unmatched_zones.is_empty());
        assert_eq!(resolution.report.unmatched_spaces.len(), 5);
        assert!(resolution
            .report
            .unmatched_spaces
            .iter()
            .all(|s| s.suggested_match.is_none()));
    }

    #[test]
    fn test_unmatched_zone_serializes_best_score() {
        let tables = MatchTables::defaults();
        let spaces = vec![Space::new("s3", "Серверная")];
        let specs = vec![ZoneSpec::new("Веранда")];
        let report = build_report(&spaces, &specs, &tables).report;

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json["unmatched_zones"],
            serde_json::json!([{"name": "Веранда", "best_score": 62}])
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let tables = MatchTables::defaults();
        let first = serde_json::to_string(&build_report(&spaces(), &specs(), &tables)).unwrap();
        let second = serde_json::to_string(&build_report(&spaces(), &specs(), &tables)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_assign_spaces() {
        let tables = MatchTables::defaults();
        let specs = vec![ZoneSpec::new("Room A"), ZoneSpec::new("Room B")];
        let spaces = vec![
            Space::new("1", "Room A1"),
            Space::new("2", "Room C"),
            Space::new("3", "Room B2"),
        ];
        let result = assign_spaces(&specs, &spaces, &tables);

        assert_eq!(result.stubs.len(), 2);
        assert_eq!(result.stubs[0].id, "1");
        assert_eq!(result.stubs[1].id, "3");
        assert_eq!(result.stubs[1].params.temperature, 22.0);
        assert_eq!(
            result.assignment.report.unmatched_rooms,
            vec!["Room C".to_string()]
        );
    }
}
