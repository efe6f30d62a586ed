//! Symptom catalog: display names, feature positions and search.
//!
//! A catalog is derived from the feature column names of the training data.
//! The position of a name in the catalog is its column in the feature
//! matrix, so the catalog is never reordered once built.

use ahash::AHashMap;

use crate::error::{Result, SympredictError};

/// Turn a raw column name such as `skin_rash` into `Skin Rash`.
///
/// Underscores become spaces, then every letter that follows a non-letter
/// is upper-cased and every other letter lower-cased.
pub fn display_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_is_letter = false;
    for c in raw.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Ordered symptom names plus the name to column index.
#[derive(Debug, Clone)]
pub struct SymptomCatalog {
    names: Vec<String>,
    index: AHashMap<String, usize>,
}

impl SymptomCatalog {
    /// Build a catalog from raw feature column names, keeping their order.
    pub fn from_feature_names<S: AsRef<str>>(columns: &[S]) -> Result<Self> {
        let mut names = Vec::with_capacity(columns.len());
        let mut index = AHashMap::with_capacity(columns.len());

        for (position, column) in columns.iter().enumerate() {
            let name = display_name(column.as_ref());
            if let Some(previous) = index.insert(name.clone(), position) {
                return Err(SympredictError::data_load(format!(
                    "columns {previous} and {position} both map to symptom '{name}'"
                )));
            }
            names.push(name);
        }

        Ok(Self { names, index })
    }

    /// Feature column of `name`, if it is a known symptom.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All symptom names in feature order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names containing `query`, compared case-insensitively, in catalog
    /// order. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return self.names.iter().map(String::as_str).collect();
        }

        self.names
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SymptomCatalog {
        SymptomCatalog::from_feature_names(&[
            "itching",
            "skin_rash",
            "nodal_skin_eruptions",
            "continuous_sneezing",
            "shivering",
        ])
        .unwrap()
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("itching"), "Itching");
        assert_eq!(display_name("skin_rash"), "Skin Rash");
        assert_eq!(display_name("spotting_ urination"), "Spotting  Urination");
        assert_eq!(display_name("foul_smell_of urine"), "Foul Smell Of Urine");
        assert_eq!(display_name("toxic_look_(typhos)"), "Toxic Look (Typhos)");
        assert_eq!(display_name("HIGH_FEVER"), "High Fever");
    }

    #[test]
    fn test_index_follows_column_order() {
        let catalog = catalog();

        assert_eq!(catalog.len(), 5);
        for (position, name) in catalog.names().iter().enumerate() {
            assert_eq!(catalog.index_of(name), Some(position));
        }
        assert_eq!(catalog.index_of("Skin Rash"), Some(1));
        assert_eq!(catalog.index_of("skin_rash"), None);
        assert!(!catalog.contains("Headache"));
    }

    #[test]
    fn test_colliding_names_are_rejected() {
        let err = SymptomCatalog::from_feature_names(&["skin_rash", "Skin_Rash"]).unwrap_err();
        assert!(matches!(err, SympredictError::DataLoad(_)));
    }

    #[test]
    fn test_search_empty_returns_everything_in_order() {
        let catalog = catalog();
        assert_eq!(catalog.search(""), catalog.names());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = catalog();

        assert_eq!(catalog.search("SKIN"), vec!["Skin Rash", "Nodal Skin Eruptions"]);
        assert_eq!(catalog.search("ing"), vec!["Itching", "Continuous Sneezing", "Shivering"]);
        assert!(catalog.search("headache").is_empty());
    }

    #[test]
    fn test_search_is_idempotent() {
        let catalog = catalog();
        let first = catalog.search("s");
        let second = catalog.search("s");
        assert_eq!(first, second);
    }
}
