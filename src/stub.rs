//! Placement stubs for the equipment-placement collaborator
//!
//! A stub is the minimal record needed to instantiate one piece of
//! equipment in a space: where it goes and which parameters it carries.
//! Parameters are merged from the matched zone spec, the project-wide
//! parameters, and defaults for anything still missing.

use serde::{Deserialize, Serialize};

use crate::classify::DEFAULT_TEMPERATURE_C;
use crate::fuzzy::Assignment;
use crate::model::{Point3, Space, ZoneSpec};
use crate::requirements::ProjectParams;

pub const DEFAULT_CATEGORY: &str = "heating";
pub const DEFAULT_EQUIPMENT_TYPE: &str = "POC_RADIATOR";
pub const DEFAULT_SYSTEM_TYPE: &str = "отопление";

/// Values used for stub fields absent from the matched zone spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StubDefaults {
    pub temperature: f64,
    pub category: String,
    pub equipment_type: String,
    pub system_type: String,
}

impl Default for StubDefaults {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE_C,
            category: DEFAULT_CATEGORY.to_string(),
            equipment_type: DEFAULT_EQUIPMENT_TYPE.to_string(),
            system_type: DEFAULT_SYSTEM_TYPE.to_string(),
        }
    }
}

/// Equipment parameters merged from the zone spec and the project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentParams {
    /// Target air temperature in °C
    pub temperature: f64,
    pub class: Option<String>,
    pub t_in: Option<i32>,
    pub t_out: Option<i32>,
    pub system_type: String,
    pub heat_source: Option<String>,
    pub schedule: Option<String>,
}

/// One piece of equipment to place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementStub {
    /// Space id from the building model
    pub id: String,
    /// Resolved zone name
    pub name: String,
    /// Space display name
    pub room_name: String,
    /// Equipment category, e.g. "heating"
    pub system: String,
    #[serde(rename = "radiator_type", alias = "equipment_type")]
    pub equipment_type: String,
    pub coordinates: Point3,
    #[serde(flatten)]
    pub params: EquipmentParams,
}

impl PlacementStub {
    pub fn derive(
        space: &Space,
        spec: &ZoneSpec,
        project: &ProjectParams,
        defaults: &StubDefaults,
    ) -> Self {
        Self {
            id: space.id.clone(),
            name: spec.name.clone(),
            room_name: space.name.clone(),
            system: defaults.category.clone(),
            equipment_type: spec
                .equipment_type
                .clone()
                .unwrap_or_else(|| defaults.equipment_type.clone()),
            coordinates: space.coordinates,
            params: EquipmentParams {
                temperature: spec.temperature.unwrap_or(defaults.temperature),
                class: spec.class.clone(),
                t_in: spec.t_in,
                t_out: spec.t_out,
                system_type: project
                    .system_type
                    .clone()
                    .unwrap_or_else(|| defaults.system_type.clone()),
                heat_source: project.heat_source.clone(),
                schedule: project.schedule.clone(),
            },
        }
    }
}

/// Stubs for the matched pairs of an assignment run.
///
/// `specs` must be the zone specs whose names were passed to
/// [`assign`](crate::fuzzy::assign), in the same order, and `spaces` the
/// spaces whose names were the rooms.
pub fn plan_stubs(
    specs: &[ZoneSpec],
    assignment: &Assignment,
    spaces: &[Space],
    project: &ProjectParams,
    defaults: &StubDefaults,
) -> Vec<PlacementStub> {
    specs
        .iter()
        .zip(&assignment.report.pairs)
        .filter_map(|(spec, pair)| {
            let space = spaces.get(pair.room_index?)?;
            Some(PlacementStub::derive(space, spec, project, defaults))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::assign;

    #[test]
    fn test_missing_temperature_uses_default() {
        let space = Space::new("2O2Fr$t4X7Zf8NOew3FLOH", "Офис 101").at(Point3::new(1.0, 2.0, 0.5));
        let spec = ZoneSpec::new("Офис");
        let stub = PlacementStub::derive(
            &space,
            &spec,
            &ProjectParams::default(),
            &StubDefaults::default(),
        );

        assert_eq!(stub.params.temperature, 22.0);
        assert_eq!(stub.id, "2O2Fr$t4X7Zf8NOew3FLOH");
        assert_eq!(stub.name, "Офис");
        assert_eq!(stub.room_name, "Офис 101");
        assert_eq!(stub.system, DEFAULT_CATEGORY);
        assert_eq!(stub.equipment_type, DEFAULT_EQUIPMENT_TYPE);
        assert_eq!(stub.params.system_type, DEFAULT_SYSTEM_TYPE);
        assert_eq!(stub.coordinates, Point3::new(1.0, 2.0, 0.5));
    }

    #[test]
    fn test_spec_values_win_over_defaults() {
        let space = Space::new("s1", "Коридор");
        let spec = ZoneSpec {
            name: "Коридор".to_string(),
            class: Some("Коридор".to_string()),
            temperature: Some(16.0),
            t_in: Some(80),
            t_out: Some(60),
            equipment_type: Some("конвектор".to_string()),
        };
        let project = ProjectParams {
            system_type: Some("водяное отопление".to_string()),
            heat_source: Some("ИТП".to_string()),
            ..ProjectParams::default()
        };
        let stub = PlacementStub::derive(&space, &spec, &project, &StubDefaults::default());

        assert_eq!(stub.params.temperature, 16.0);
        assert_eq!(stub.params.t_in, Some(80));
        assert_eq!(stub.equipment_type, "конвектор");
        assert_eq!(stub.params.system_type, "водяное отопление");
        assert_eq!(stub.params.heat_source.as_deref(), Some("ИТП"));
    }

    #[test]
    fn test_stub_json_is_flat() {
        let stub = PlacementStub::derive(
            &Space::new("a", "Холл").at(Point3::new(3.0, 4.0, 0.0)),
            &ZoneSpec::new("Коридор").with_temperature(18.0),
            &ProjectParams::default(),
            &StubDefaults::default(),
        );
        let json = serde_json::to_value(&stub).unwrap();

        assert_eq!(json["id"], "a");
        assert_eq!(json["temperature"], 18.0);
        assert_eq!(json["radiator_type"], DEFAULT_EQUIPMENT_TYPE);
        assert_eq!(json["coordinates"], serde_json::json!([3.0, 4.0, 0.0]));
    }

    #[test]
    fn test_plan_stubs_follows_assignment() {
        let specs = vec![ZoneSpec::new("Room A"), ZoneSpec::new("Zone X")];
        let spaces = vec![
            Space::new("s1", "Totally Unrelated"),
            Space::new("s2", "Room A1").at(Point3::new(5.0, 5.0, 0.0)),
        ];
        let zone_names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        let room_names: Vec<&str> = spaces.iter().map(|s| s.name.as_str()).collect();
        let assignment = assign(&zone_names, &room_names, 65);

        let stubs = plan_stubs(
            &specs,
            &assignment,
            &spaces,
            &ProjectParams::default(),
            &StubDefaults::default(),
        );
        assert_eq!(stubs.len(), 1);
        assert_eq!(stubs[0].id, "s2");
        assert_eq!(stubs[0].name, "Room A");
        assert_eq!(stubs[0].coordinates, Point3::new(5.0, 5.0, 0.0));
    }
}
