//! Input entities: spaces from the building model and zone specifications
//! from the requirements document

use serde::{Deserialize, Serialize};

/// A point in model coordinates (meters)
///
/// Serialized as `[x, y, z]`, the layout the geometry reader emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

/// A named space of the building model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    /// Display name; empty when the model carries none
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub storey: Option<String>,
    /// Centroid; the origin when the model has no usable geometry
    #[serde(default)]
    pub coordinates: Point3,
}

impl Space {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            storey: None,
            coordinates: Point3::ORIGIN,
        }
    }

    pub fn at(mut self, coordinates: Point3) -> Self {
        self.coordinates = coordinates;
        self
    }

    pub fn on_storey(mut self, storey: impl Into<String>) -> Self {
        self.storey = Some(storey.into());
        self
    }
}

/// Spaces as written by the geometry reader: either `{"spaces": [...]}` or a
/// bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SpaceList {
    Wrapped { spaces: Vec<Space> },
    Bare(Vec<Space>),
}

impl SpaceList {
    pub fn into_spaces(self) -> Vec<Space> {
        match self {
            SpaceList::Wrapped { spaces } => spaces,
            SpaceList::Bare(spaces) => spaces,
        }
    }
}

/// A zone requirement: a functional area and its desired conditions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    /// Canonical zone name as written in the requirements
    pub name: String,
    /// Room class label, e.g. "Офис"
    #[serde(default)]
    pub class: Option<String>,
    /// Target air temperature in °C
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Supply water temperature in °C
    #[serde(default)]
    pub t_in: Option<i32>,
    /// Return water temperature in °C
    #[serde(default)]
    pub t_out: Option<i32>,
    #[serde(default, alias = "radiator_type")]
    pub equipment_type: Option<String>,
}

impl ZoneSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_list_wrapped_and_bare() {
        let wrapped = r#"{"spaces": [{"id": "a", "name": "Офис 1", "storey": "1", "coordinates": [1.0, 2.0, 3.0]}]}"#;
        let bare = r#"[{"id": "b", "name": "Холл"}]"#;

        let spaces = serde_json::from_str::<SpaceList>(wrapped)
            .unwrap()
            .into_spaces();
        assert_eq!(spaces.len(), 1);
        assert_eq!(spaces[0].coordinates, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(spaces[0].storey.as_deref(), Some("1"));

        let spaces = serde_json::from_str::<SpaceList>(bare).unwrap().into_spaces();
        assert_eq!(spaces[0].id, "b");
        assert_eq!(spaces[0].coordinates, Point3::ORIGIN);
    }

    #[test]
    fn test_space_without_name() {
        let space: Space = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(space.name, "");
    }

    #[test]
    fn test_point_serializes_as_array() {
        let json = serde_json::to_string(&Point3::new(1.5, 0.0, -2.0)).unwrap();
        assert_eq!(json, "[1.5,0.0,-2.0]");
    }

    #[test]
    fn test_zone_spec_accepts_radiator_type() {
        let spec: ZoneSpec =
            serde_json::from_str(r#"{"name": "Офис", "radiator_type": "панельный"}"#).unwrap();
        assert_eq!(spec.equipment_type.as_deref(), Some("панельный"));
        assert_eq!(spec.temperature, None);
    }
}
