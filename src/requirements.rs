//! Zone specifications from the requirements extractor's JSON output
//!
//! The extractor writes one document per project. The parts read here:
//!
//! ```json
//! {
//!   "project_name": "Офисное здание",
//!   "room_temperatures": {"Офис": "21,5", "Коридор": "18"},
//!   "heating_system": {
//!     "system_name": "отопление",
//!     "temperature": "80/60",
//!     "radiator_type": "панельный",
//!     "heat_source": "ИТП"
//!   }
//! }
//! ```
//!
//! `room_temperatures` may also be a list of `{"name", "temperature"}`
//! records. Fields the extractor could not find hold the placeholder
//! [`NO_DATA`] and are treated as absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::{coerce_decimal, coerce_integer};
use crate::error::FieldCoercionError;
use crate::model::ZoneSpec;

/// Placeholder the extractor writes for values it could not find
pub const NO_DATA: &str = "Нет данных";

const PROJECT_ENTRY: &str = "project";

/// Requirements document as produced by the extractor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub room_temperatures: Option<RoomTemperatures>,
    #[serde(default)]
    pub heating_system: Option<HeatingSystem>,
    #[serde(default)]
    pub t_in: Option<Value>,
    #[serde(default)]
    pub t_out: Option<Value>,
    #[serde(default)]
    pub temperature_schedule: Option<String>,
    #[serde(default)]
    pub schedule: Option<String>,
}

/// Per-room target temperatures in either of the extractor's layouts
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RoomTemperatures {
    /// `{"Офис": "21,5"}`, in document order
    Map(serde_json::Map<String, Value>),
    /// `[{"name": "Офис", "temperature": 21.5}]`; records without a name
    /// are skipped
    List(Vec<Value>),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeatingSystem {
    #[serde(default)]
    pub system_name: Option<String>,
    #[serde(default)]
    pub heat_source: Option<String>,
    /// Supply/return schedule, e.g. "80/60"
    #[serde(default)]
    pub temperature: Option<String>,
    #[serde(default)]
    pub radiator_type: Option<String>,
}

/// Project-wide parameters carried into every placement stub
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectParams {
    pub name: Option<String>,
    pub system_type: Option<String>,
    pub heat_source: Option<String>,
    pub schedule: Option<String>,
}

/// Zone specs read from a document, with the fields that failed to coerce
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneSpecBatch {
    pub specs: Vec<ZoneSpec>,
    pub errors: Vec<FieldCoercionError>,
}

impl ZoneSpecBatch {
    /// Target temperature per zone name, for the specs that have one.
    ///
    /// Same keys and values as [`Requirements::class_temperatures`] on the
    /// document the batch was read from, without coercing twice.
    pub fn class_temperatures(&self) -> BTreeMap<String, f64> {
        self.specs
            .iter()
            .filter_map(|spec| Some((spec.name.clone(), spec.temperature?)))
            .collect()
    }
}

impl Requirements {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// One zone spec per `room_temperatures` entry, in document order.
    ///
    /// Supply/return temperatures and the equipment type are project-wide
    /// and copied onto every spec. A value that fails to coerce leaves its
    /// field empty and is reported in `errors`.
    pub fn zone_specs(&self) -> ZoneSpecBatch {
        let mut batch = ZoneSpecBatch::default();

        let (t_in, t_out) = self.supply_return(&mut batch.errors);
        let equipment_type = self
            .heating_system
            .as_ref()
            .and_then(|h| present(h.radiator_type.as_deref()))
            .map(str::to_string);

        for (name, raw) in self.temperature_entries() {
            let temperature = match coerce_decimal(&name, "temperature", &raw) {
                Ok(t) => t,
                Err(err) => {
                    log::warn!("{err}");
                    batch.errors.push(err);
                    None
                }
            };
            batch.specs.push(ZoneSpec {
                name,
                class: None,
                temperature,
                t_in,
                t_out,
                equipment_type: equipment_type.clone(),
            });
        }

        batch
    }

    /// Target temperature per room class, for classifying spaces that have
    /// no requirement of their own. Keys are trimmed.
    pub fn class_temperatures(&self) -> (BTreeMap<String, f64>, Vec<FieldCoercionError>) {
        let mut temperatures = BTreeMap::new();
        let mut errors = Vec::new();
        for (name, raw) in self.temperature_entries() {
            match coerce_decimal(&name, "temperature", &raw) {
                Ok(Some(t)) => {
                    temperatures.insert(name.trim().to_string(), t);
                }
                Ok(None) => {}
                Err(err) => {
                    log::warn!("{err}");
                    errors.push(err);
                }
            }
        }
        (temperatures, errors)
    }

    pub fn project(&self) -> ProjectParams {
        let heating = self.heating_system.as_ref();
        ProjectParams {
            name: present(self.project_name.as_deref()).map(str::to_string),
            system_type: heating
                .and_then(|h| present(h.system_name.as_deref()))
                .map(str::to_string),
            heat_source: heating
                .and_then(|h| present(h.heat_source.as_deref()))
                .map(str::to_string),
            schedule: self.schedule_text().map(str::to_string),
        }
    }

    /// Explicit `t_in`/`t_out`, each falling back to the schedule string.
    fn supply_return(&self, errors: &mut Vec<FieldCoercionError>) -> (Option<i32>, Option<i32>) {
        let mut explicit = |field: &str, value: Option<&Value>| {
            let value = value.filter(|v| !is_placeholder(v))?;
            coerce_integer(PROJECT_ENTRY, field, value)
                .unwrap_or_else(|err| {
                    log::warn!("{err}");
                    errors.push(err);
                    None
                })
        };
        let mut t_in = explicit("t_in", self.t_in.as_ref());
        let mut t_out = explicit("t_out", self.t_out.as_ref());

        if t_in.is_none() || t_out.is_none() {
            if let Some((supply, ret)) = self.schedule_text().and_then(parse_schedule) {
                t_in = t_in.or(Some(supply));
                t_out = t_out.or(Some(ret));
            }
        }

        (t_in, t_out)
    }

    fn schedule_text(&self) -> Option<&str> {
        present(self.temperature_schedule.as_deref())
            .or_else(|| present(self.schedule.as_deref()))
            .or_else(|| {
                self.heating_system
                    .as_ref()
                    .and_then(|h| present(h.temperature.as_deref()))
            })
    }

    /// `(name, raw temperature)` pairs, skipping placeholder and unnamed
    /// entries. Placeholder temperatures become `Null`.
    fn temperature_entries(&self) -> Vec<(String, Value)> {
        let entries: Vec<(String, Value)> = match &self.room_temperatures {
            None => Vec::new(),
            Some(RoomTemperatures::Map(map)) => map
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            Some(RoomTemperatures::List(items)) => items
                .iter()
                .filter_map(|item| {
                    let name = item.get("name")?.as_str()?;
                    let value = item.get("temperature").cloned().unwrap_or(Value::Null);
                    Some((name.to_string(), value))
                })
                .collect(),
        };

        entries
            .into_iter()
            .filter(|(name, _)| {
                let keep = present(Some(name.as_str())).is_some();
                if !keep {
                    log::debug!("skipping room temperature entry {name:?}");
                }
                keep
            })
            .map(|(name, value)| {
                let value = if is_placeholder(&value) {
                    Value::Null
                } else {
                    value
                };
                (name.trim().to_string(), value)
            })
            .collect()
    }
}

/// First two digit runs of a schedule such as "80/60" or "95-70 °C"
pub fn parse_schedule(text: &str) -> Option<(i32, i32)> {
    let mut runs = text
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse::<i32>().ok());

    let supply = runs.next()??;
    let ret = runs.next()??;
    Some((supply, ret))
}

/// The text, unless it is blank or the extractor placeholder
fn present(text: Option<&str>) -> Option<&str> {
    text.map(str::trim)
        .filter(|t| !t.is_empty() && *t != NO_DATA)
}

fn is_placeholder(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.trim() == NO_DATA)
}
