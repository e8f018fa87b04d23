//! Static lookup data used during matching
//!
//! Synonyms and classification rules are explicit ordered lists. They are
//! validated once when the tables are built and read-only afterwards.

use crate::classify::{ClassRule, ClassRules};
use crate::containment::{SynonymEntry, SynonymTable};
use crate::error::TableError;

/// Synonym table and classification rules for one matching run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTables {
    pub synonyms: SynonymTable,
    pub rules: ClassRules,
}

impl MatchTables {
    /// Build and validate tables from configuration lists.
    pub fn new(
        synonyms: Vec<SynonymEntry>,
        rules: Vec<ClassRule>,
        default_label: impl Into<String>,
    ) -> Result<Self, TableError> {
        Ok(Self {
            synonyms: SynonymTable::new(synonyms)?,
            rules: ClassRules::new(rules, default_label)?,
        })
    }

    /// Built-in tables
    pub fn defaults() -> Self {
        Self {
            synonyms: SynonymTable::defaults(),
            rules: ClassRules::defaults(),
        }
    }
}

impl Default for MatchTables {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{default_rules, DEFAULT_CLASS_LABEL};
    use crate::containment::default_synonyms;

    #[test]
    fn test_defaults_pass_validation() {
        let built = MatchTables::new(default_synonyms(), default_rules(), DEFAULT_CLASS_LABEL)
            .unwrap();
        assert_eq!(built, MatchTables::defaults());
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let err = MatchTables::new(vec![], vec![ClassRule::new("", "Офис")], "Офис").unwrap_err();
        assert_eq!(err, TableError::EmptyPattern { index: 0 });
    }
}
