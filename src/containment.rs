//! Containment matching of space names against zone specifications
//!
//! A space resolves to the first zone spec whose normalized name, or one of
//! its registered synonyms, occurs inside the normalized space name. This
//! is first-acceptable matching: candidates are never compared with each
//! other, so list order decides between specs that would both fit.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::model::ZoneSpec;
use crate::normalize::{contains_normalized, normalize};

/// Alternate terms registered for one canonical zone term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    /// Canonical term; looked up by its normalized form
    pub term: String,
    /// Alternates, tried in this order
    #[serde(default)]
    pub alternates: Vec<String>,
}

impl SynonymEntry {
    pub fn new<I, S>(term: impl Into<String>, alternates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            term: term.into(),
            alternates: alternates.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered synonym lookup: normalized canonical term → alternates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    entries: Vec<SynonymEntry>,
    /// Normalized terms, index-aligned with `entries`
    keys: Vec<String>,
}

impl SynonymTable {
    pub fn new(entries: Vec<SynonymEntry>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        let mut keys = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let key = normalize(&entry.term);
            if key.is_empty() {
                return Err(TableError::EmptyTerm { index });
            }
            if !seen.insert(key.clone()) {
                return Err(TableError::DuplicateTerm {
                    term: entry.term.clone(),
                });
            }
            keys.push(key);
        }
        Ok(Self { entries, keys })
    }

    /// Built-in synonyms for Russian room names
    pub fn defaults() -> Self {
        let entries = default_synonyms();
        let keys = entries.iter().map(|e| normalize(&e.term)).collect();
        Self { entries, keys }
    }

    /// Alternates registered for an already normalized term
    pub fn lookup(&self, normalized_term: &str) -> &[String] {
        self.keys
            .iter()
            .position(|key| key == normalized_term)
            .map(|index| self.entries[index].alternates.as_slice())
            .unwrap_or(&[])
    }

    pub fn entries(&self) -> &[SynonymEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Default synonym list
pub fn default_synonyms() -> Vec<SynonymEntry> {
    vec![
        SynonymEntry::new("Офис", ["кабинет", "офисное помещение", "рабочее помещение"]),
        SynonymEntry::new("Коридор", ["холл", "вестибюль", "проход"]),
        SynonymEntry::new("Лестница", ["лестничная клетка", "лестничный марш"]),
        SynonymEntry::new("Веранда", ["терраса"]),
        SynonymEntry::new("Санузел", ["туалет", "с/у", "уборная"]),
    ]
}

/// Which term produced a containment match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "term", rename_all = "snake_case")]
pub enum MatchedBy {
    /// The spec's own name
    Name(String),
    /// One of the spec's synonyms
    Synonym(String),
}

impl MatchedBy {
    /// The literal term that matched
    pub fn term(&self) -> &str {
        match self {
            MatchedBy::Name(term) | MatchedBy::Synonym(term) => term,
        }
    }
}

/// A successful containment match
#[derive(Debug, Clone, PartialEq)]
pub struct Containment<'a> {
    pub spec: &'a ZoneSpec,
    /// Position of `spec` in the list it was found in
    pub index: usize,
    pub matched_by: MatchedBy,
}

/// Find the first spec whose name or synonym occurs in `space_name`.
///
/// Specs are tried in input order; for each spec its own name is tried
/// before its synonyms, which are tried in table order.
pub fn find_spec<'a>(
    space_name: &str,
    specs: &'a [ZoneSpec],
    synonyms: &SynonymTable,
) -> Option<Containment<'a>> {
    let haystack = normalize(space_name);
    if haystack.is_empty() {
        return None;
    }

    for (index, spec) in specs.iter().enumerate() {
        let base = normalize(&spec.name);
        if contains_normalized(&haystack, &base) {
            return Some(Containment {
                spec,
                index,
                matched_by: MatchedBy::Name(spec.name.clone()),
            });
        }

        for synonym in synonyms.lookup(&base) {
            if contains_normalized(&haystack, &normalize(synonym)) {
                return Some(Containment {
                    spec,
                    index,
                    matched_by: MatchedBy::Synonym(synonym.clone()),
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(names: &[&str]) -> Vec<ZoneSpec> {
        names.iter().map(|n| ZoneSpec::new(*n)).collect()
    }

    #[test]
    fn test_direct_name_match() {
        let specs = specs(&["Офис", "Коридор"]);
        let hit = find_spec("Коридор 2 этажа", &specs, &SynonymTable::default()).unwrap();
        assert_eq!(hit.spec.name, "Коридор");
        assert_eq!(hit.index, 1);
        assert_eq!(hit.matched_by, MatchedBy::Name("Коридор".to_string()));
    }

    #[test]
    fn test_list_order_decides_not_specificity() {
        let synonyms = SynonymTable::default();

        let office_first = specs(&["Office", "Open Office"]);
        let hit = find_spec("open office #3", &office_first, &synonyms).unwrap();
        assert_eq!(hit.spec.name, "Office");

        let open_first = specs(&["Open Office", "Office"]);
        let hit = find_spec("open office #3", &open_first, &synonyms).unwrap();
        assert_eq!(hit.spec.name, "Open Office");
    }

    #[test]
    fn test_synonym_match_reports_synonym() {
        let specs = specs(&["Коридор"]);
        let hit = find_spec("Холл 101", &specs, &SynonymTable::defaults()).unwrap();
        assert_eq!(hit.spec.name, "Коридор");
        assert_eq!(hit.matched_by, MatchedBy::Synonym("холл".to_string()));
        assert_eq!(hit.matched_by.term(), "холл");
    }

    #[test]
    fn test_earlier_spec_synonym_beats_later_spec_name() {
        let table = SynonymTable::new(vec![SynonymEntry::new("Lobby", ["hall"])]).unwrap();
        let specs = specs(&["Lobby", "Hall"]);
        let hit = find_spec("Main Hall", &specs, &table).unwrap();
        assert_eq!(hit.spec.name, "Lobby");
        assert_eq!(hit.matched_by, MatchedBy::Synonym("hall".to_string()));
    }

    #[test]
    fn test_synonyms_tried_in_table_order() {
        let table =
            SynonymTable::new(vec![SynonymEntry::new("Office", ["work", "workroom"])]).unwrap();
        let specs = specs(&["Office"]);
        let hit = find_spec("Workroom 2", &specs, &table).unwrap();
        assert_eq!(hit.matched_by.term(), "work");
    }

    #[test]
    fn test_empty_names_never_match() {
        let blank = specs(&["", "12", "  "]);
        assert!(find_spec("Office 1", &blank, &SynonymTable::default()).is_none());

        let named = specs(&["Office"]);
        assert!(find_spec("", &named, &SynonymTable::default()).is_none());
        assert!(find_spec("42", &named, &SynonymTable::default()).is_none());
    }

    #[test]
    fn test_empty_synonym_never_matches() {
        let table = SynonymTable::new(vec![SynonymEntry::new("Office", ["", "7"])]).unwrap();
        assert!(find_spec("Kitchen", &specs(&["Office"]), &table).is_none());
    }

    #[test]
    fn test_no_match() {
        let specs = specs(&["Офис"]);
        assert!(find_spec("Серверная", &specs, &SynonymTable::defaults()).is_none());
        assert!(find_spec("Серверная", &[], &SynonymTable::defaults()).is_none());
    }

    #[test]
    fn test_table_validation() {
        let err = SynonymTable::new(vec![SynonymEntry::new("12", ["x"])]).unwrap_err();
        assert_eq!(err, TableError::EmptyTerm { index: 0 });

        let err = SynonymTable::new(vec![
            SynonymEntry::new("Office", ["a"]),
            SynonymEntry::new("office 2", ["b"]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            TableError::DuplicateTerm {
                term: "office 2".to_string()
            }
        );
    }

    #[test]
    fn test_lookup_unknown_term() {
        assert!(SynonymTable::defaults().lookup("склад").is_empty());
    }
}
