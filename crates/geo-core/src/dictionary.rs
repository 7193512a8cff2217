//! The gazetteer dictionary (§3.4, §4.2, §6.2).
//!
//! Built once by an external collaborator (gazetteer acquisition is out of
//! scope, PURPOSE & SCOPE), then consulted read-only for the lifetime of
//! the engine. Two indexes: by uppercase ID (unique) and by lower-cased
//! label (many-to-many, deterministic order).

use crate::error::{GeoError, Result};
use crate::location::Location;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Dictionary {
    by_id: HashMap<String, Location>,
    by_label: HashMap<String, Vec<String>>, // label -> ids, insertion order
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a location, indexing it by ID and by every one of its
    /// `labels`. Later insertions under the same ID replace the earlier
    /// one but preserve label-index insertion order for the new ID.
    pub fn insert(&mut self, location: Location) {
        let id = location.id.clone();
        for label in &location.labels {
            let ids = self.by_label.entry(label.clone()).or_default();
            if !ids.contains(&id) {
                ids.push(id.clone());
            }
        }
        self.by_id.insert(id, location);
    }

    pub fn from_locations(locations: impl IntoIterator<Item = Location>) -> Self {
        let mut dict = Self::new();
        for loc in locations {
            dict.insert(loc);
        }
        dict
    }

    /// Case-insensitive lookup by ID.
    pub fn get_by_id(&self, id: &str) -> Option<&Location> {
        self.by_id.get(&id.to_ascii_uppercase())
    }

    /// Case-insensitive lookup by label. Returns `None` if there is no
    /// match at all (as opposed to an empty `Vec`), per §6.2.
    pub fn get_by_label(&self, label: &str) -> Option<Vec<&Location>> {
        let key = crate::text::normalize(label);
        let ids = self.by_label.get(&key)?;
        Some(ids.iter().filter_map(|id| self.by_id.get(id)).collect())
    }

    /// Like [`Dictionary::get_by_id`], but fails with `LocationNotFound`
    /// when absent. Used only where presence is a dictionary invariant,
    /// e.g. walking `parentsIds`.
    pub fn require_by_id(&self, id: &str) -> Result<&Location> {
        self.get_by_id(id)
            .ok_or_else(|| GeoError::LocationNotFound { id: id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationRecord;
    use std::collections::HashMap as Map;

    fn loc(id: &str, name: &str) -> Location {
        Location::from_raw(LocationRecord {
            id: id.to_string(),
            name: name.to_string(),
            unlocode: None,
            country_code: None,
            sub_type: None,
            translations: Map::new(),
            other_names: Vec::new(),
            demonym: None,
            coordinates: None,
            borders: Vec::new(),
            is_capital: None,
            area_km2: None,
            population: None,
            languages: Vec::new(),
            admin_divisions: Vec::new(),
        })
        .unwrap()
    }

    #[test]
    fn get_by_id_is_case_insensitive() {
        let mut d = Dictionary::new();
        d.insert(loc("1000000000000", "Europe"));
        assert!(d.get_by_id("1000000000000").is_some());
        assert!(d.get_by_id("1000000000000".to_lowercase().as_str()).is_some());
    }

    #[test]
    fn get_by_label_returns_none_when_absent() {
        let d = Dictionary::new();
        assert!(d.get_by_label("nowhere").is_none());
    }

    #[test]
    fn get_by_label_matches_case_insensitively() {
        let mut d = Dictionary::new();
        d.insert(loc("1000000000000", "Europe"));
        let hits = d.get_by_label("EUROPE").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1000000000000");
    }

    #[test]
    fn require_by_id_fails_on_miss() {
        let d = Dictionary::new();
        assert!(matches!(
            d.require_by_id("1000000000000"),
            Err(GeoError::LocationNotFound { .. })
        ));
    }
}
