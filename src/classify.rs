//! Room classification
//!
//! Maps a room name to a canonical class label with an ordered list of
//! substring rules. The order of the list is part of the contract: when
//! two patterns occur in the same name, the rule listed first wins.
//!
//! Also owns the defaulting and numeric coercion applied to zone
//! specifications before they reach the matchers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FieldCoercionError, TableError};
use crate::model::ZoneSpec;

/// Target temperature used when neither the zone nor its class has one
pub const DEFAULT_TEMPERATURE_C: f64 = 22.0;

/// Label returned when no rule matches
pub const DEFAULT_CLASS_LABEL: &str = "Офис";

/// One `(substring, label)` classification rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRule {
    pub pattern: String,
    pub label: String,
}

impl ClassRule {
    pub fn new(pattern: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            label: label.into(),
        }
    }
}

/// Ordered classification rules with a fallback label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRules {
    rules: Vec<ClassRule>,
    /// Lowercased patterns, index-aligned with `rules`
    patterns: Vec<String>,
    default_label: String,
}

impl ClassRules {
    pub fn new(rules: Vec<ClassRule>, default_label: impl Into<String>) -> Result<Self, TableError> {
        let default_label = default_label.into();
        if default_label.trim().is_empty() {
            return Err(TableError::EmptyDefaultLabel);
        }

        let mut patterns = Vec::with_capacity(rules.len());
        for (index, rule) in rules.iter().enumerate() {
            let pattern = rule.pattern.to_lowercase();
            if pattern.trim().is_empty() {
                return Err(TableError::EmptyPattern { index });
            }
            if rule.label.trim().is_empty() {
                return Err(TableError::EmptyLabel { index });
            }
            patterns.push(pattern);
        }

        Ok(Self {
            rules,
            patterns,
            default_label,
        })
    }

    /// Built-in rules for the vocabulary of Russian project documents
    pub fn defaults() -> Self {
        let rules = default_rules();
        let patterns = rules.iter().map(|r| r.pattern.to_lowercase()).collect();
        Self {
            rules,
            patterns,
            default_label: DEFAULT_CLASS_LABEL.to_string(),
        }
    }

    /// Label of the first rule whose pattern occurs in the lowercased name
    pub fn classify(&self, name: &str) -> &str {
        let lowered = name.to_lowercase();
        self.patterns
            .iter()
            .position(|pattern| lowered.contains(pattern.as_str()))
            .map(|index| self.rules[index].label.as_str())
            .unwrap_or(&self.default_label)
    }

    pub fn rules(&self) -> &[ClassRule] {
        &self.rules
    }

    pub fn default_label(&self) -> &str {
        &self.default_label
    }
}

impl Default for ClassRules {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Default rule list, highest priority first
pub fn default_rules() -> Vec<ClassRule> {
    [
        ("офис", "Офис"),
        ("кабинет", "Офис"),
        ("коридор", "Коридор"),
        ("вестибюль", "Коридор"),
        ("холл", "Коридор"),
        ("лестниц", "Лестница"),
        ("веранд", "Веранда"),
    ]
    .into_iter()
    .map(|(pattern, label)| ClassRule::new(pattern, label))
    .collect()
}

/// Fills in class labels and target temperatures missing from zone specs
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    rules: &'a ClassRules,
    /// Target temperature per class label
    class_temperatures: BTreeMap<String, f64>,
    default_temperature: f64,
}

impl<'a> Classifier<'a> {
    pub fn new(rules: &'a ClassRules) -> Self {
        Self {
            rules,
            class_temperatures: BTreeMap::new(),
            default_temperature: DEFAULT_TEMPERATURE_C,
        }
    }

    pub fn with_class_temperatures(mut self, temperatures: BTreeMap<String, f64>) -> Self {
        self.class_temperatures = temperatures
            .into_iter()
            .map(|(label, t)| (label.trim().to_string(), t))
            .collect();
        self
    }

    pub fn with_default_temperature(mut self, temperature: f64) -> Self {
        self.default_temperature = temperature;
        self
    }

    pub fn classify(&self, name: &str) -> &str {
        self.rules.classify(name)
    }

    /// Temperature for a class label, falling back to the default
    pub fn temperature_for(&self, label: &str) -> f64 {
        self.class_temperatures
            .get(label)
            .copied()
            .unwrap_or(self.default_temperature)
    }

    /// Fill `class` and `temperature` where the extractor left them empty.
    pub fn enrich(&self, spec: &mut ZoneSpec) {
        if spec.class.is_none() {
            spec.class = Some(self.classify(&spec.name).to_string());
        }
        if spec.temperature.is_none() {
            let t = spec
                .class
                .as_deref()
                .map(|label| self.temperature_for(label))
                .unwrap_or(self.default_temperature);
            log::trace!("zone '{}' has no temperature, using {t}", spec.name);
            spec.temperature = Some(t);
        }
    }

    /// A zone spec for a space that has no written requirement, derived
    /// from its name alone.
    pub fn spec_for_space_name(&self, name: &str) -> ZoneSpec {
        let label = self.classify(name);
        ZoneSpec {
            name: name.to_string(),
            class: Some(label.to_string()),
            temperature: Some(self.temperature_for(label)),
            ..ZoneSpec::default()
        }
    }
}

/// Read a decimal that may use a comma separator ("21,5").
///
/// `Null` and blank text mean "absent". Anything else that is not a number
/// is a coercion error for this field only.
pub fn coerce_decimal(entry: &str, field: &str, value: &Value) -> Result<Option<f64>, FieldCoercionError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| FieldCoercionError::new(entry, field, n.to_string())),
        Value::String(text) => parse_decimal_text(text)
            .map_err(|_| FieldCoercionError::new(entry, field, text.clone())),
        other => Err(FieldCoercionError::new(entry, field, other.to_string())),
    }
}

/// Like [`coerce_decimal`] but the value must be a whole number.
pub fn coerce_integer(entry: &str, field: &str, value: &Value) -> Result<Option<i32>, FieldCoercionError> {
    let raw = || match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    match coerce_decimal(entry, field, value)? {
        None => Ok(None),
        Some(v) if v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 => {
            Ok(Some(v as i32))
        }
        Some(_) => Err(FieldCoercionError::new(entry, field, raw())),
    }
}

/// `Ok(None)` for blank text, `Err(())` for text that is not a finite number
fn parse_decimal_text(text: &str) -> Result<Option<f64>, ()> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.replace(',', ".").parse::<f64>() {
        // "inf" and "NaN" parse, but are not temperatures
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(()),
    }
}
