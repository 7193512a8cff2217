//! Candidate expansion (§4.3), the first pipeline stage.

use crate::candidate::CandidateEntity;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::extended::ExtendedLocation;
use crate::location::Location;
use crate::pipeline::WorkingSet;
use std::collections::{HashMap, HashSet};

/// Looks up every candidate by its normalized label, groups the results by
/// location, and builds the initial working set keyed by location ID.
///
/// Candidates whose normalized name is empty, or that match nothing in the
/// dictionary, are silently dropped (§7).
pub fn expand(dictionary: &Dictionary, candidates: &[CandidateEntity]) -> Result<WorkingSet> {
    let mut originators: HashMap<String, (Location, HashSet<CandidateEntity>)> = HashMap::new();

    for candidate in candidates {
        let norm = candidate.norm_name();
        if norm.is_empty() {
            continue;
        }
        let matches = match dictionary.get_by_label(&norm) {
            Some(m) => m,
            None => continue,
        };
        for location in matches {
            let entry = originators
                .entry(location.id.clone())
                .or_insert_with(|| (location.clone(), HashSet::new()));
            entry.1.insert(candidate.clone());
        }
    }

    let mut ids: Vec<String> = originators.keys().cloned().collect();
    ids.sort();

    let mut working = WorkingSet::new();
    for id in ids {
        let (location, entities) = originators.remove(&id).expect("id came from its own key set");
        let mut parents = Vec::with_capacity(location.parents_ids.len());
        for pid in &location.parents_ids {
            parents.push(dictionary.require_by_id(pid)?.clone());
        }
        let mut candidate_entities: Vec<CandidateEntity> = entities.into_iter().collect();
        candidate_entities.sort_by(|a, b| a.norm_name().cmp(&b.norm_name()));
        working.insert(id, ExtendedLocation::new(location, parents, candidate_entities));
    }
    Ok(working)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationRecord;
    use std::collections::HashMap as Map;

    fn record(id: &str, name: &str) -> LocationRecord {
        LocationRecord {
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
        }
    }

    fn dictionary() -> Dictionary {
        let mut d = Dictionary::new();
        d.insert(Location::from_raw(record("5000000000000", "North America")).unwrap());
        d.insert(Location::from_raw(record("5118000000000", "United States")).unwrap());
        d.insert(Location::from_raw(record("51180C0000000", "D.C. Metro")).unwrap());
        d.insert(Location::from_raw(record("51180C0260000", "District of Columbia")).unwrap());
        d.insert(Location::from_raw(record("51180C026000A", "Washington")).unwrap());
        d
    }

    #[test]
    fn distinct_candidates_matching_the_same_location_share_one_extended_location() {
        let dict = dictionary();
        let candidates = vec![
            CandidateEntity::new("Washington", 0.4),
            CandidateEntity::new("washington", 0.8),
        ];
        let working = expand(&dict, &candidates).unwrap();
        assert_eq!(working.len(), 1);
        let ext = working.get("51180C026000A").unwrap();
        assert_eq!(ext.candidate_entities.len(), 1);
        assert!((ext.init_score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn unmatched_candidate_produces_no_entry() {
        let dict = dictionary();
        let candidates = vec![CandidateEntity::new("Nowhere", 0.5)];
        let working = expand(&dict, &candidates).unwrap();
        assert!(working.is_empty());
    }

    #[test]
    fn resolved_parents_are_populated() {
        let dict = dictionary();
        let candidates = vec![CandidateEntity::new("Washington", 0.5)];
        let working = expand(&dict, &candidates).unwrap();
        let ext = working.get("51180C026000A").unwrap();
        assert_eq!(ext.parents.len(), 4);
        assert_eq!(ext.parents[0].id, "51180C0260000");
        assert_eq!(ext.parents[1].id, "51180C0000000");
        assert_eq!(ext.parents[2].id, "5118000000000");
        assert_eq!(ext.parents[3].id, "5000000000000");
    }
}
