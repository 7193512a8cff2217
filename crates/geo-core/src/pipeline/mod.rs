//! The disambiguation pipeline (§2, §6.3): the seven stages wired together
//! behind a single entry point, [`find_locations`].

pub mod adding_entities;
pub mod ambiguity;
pub mod confidence;
pub mod coordinates;
pub mod expand;
pub mod propagate;
pub mod select;
pub mod stats;

use crate::candidate::CandidateEntity;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::extended::ExtendedLocation;
use std::collections::HashMap;

pub use stats::{Moments, Statistics};

/// The mutable working graph: every surviving extended location, keyed by
/// its location ID (§9, "Mutable working graph").
pub type WorkingSet = HashMap<String, ExtendedLocation>;

/// The engine's output: the ranked best locations plus run-wide statistics.
/// `statistics` is `None` for a zero-candidate input (§6.3).
#[derive(Debug, Clone, Default)]
pub struct FindLocationsResult {
    pub locations: Vec<ExtendedLocation>,
    pub statistics: Option<Statistics>,
}

/// `findLocations` (§6.3): disambiguates `candidate_entities` against
/// `dictionary`, using `text_tokens` for adding-entity detection,
/// `coordinate_entities_groups` to amplify sibling boosts, and
/// `ambiguity_groups` to collapse overlapping mentions.
pub fn find_locations(
    dictionary: &Dictionary,
    text_tokens: &[String],
    candidate_entities: &[CandidateEntity],
    coordinate_entities_groups: &[Vec<String>],
    ambiguity_groups: &[Vec<String>],
) -> Result<FindLocationsResult> {
    if candidate_entities.is_empty() {
        return Ok(FindLocationsResult::default());
    }

    let span = tracing::debug_span!("find_locations", candidates = candidate_entities.len());
    let _enter = span.enter();

    let mut working = {
        let _span = tracing::debug_span!("expand").entered();
        expand::expand(dictionary, candidate_entities)?
    };
    tracing::trace!(locations = working.len(), "expanded candidates");

    {
        let _span = tracing::debug_span!("resolve_ambiguity").entered();
        ambiguity::resolve_ambiguity(&mut working, ambiguity_groups);
    }
    tracing::trace!(locations = working.len(), "resolved ambiguity");

    let adding_entities = {
        let _span = tracing::debug_span!("detect_adding_entities").entered();
        adding_entities::detect_adding_entities(&working, dictionary, text_tokens)?
    };
    tracing::trace!(count = adding_entities.len(), "detected adding entities");

    {
        let _span = tracing::debug_span!("propagate").entered();
        let coord_index = coordinates::CoordinateIndex::build(coordinate_entities_groups);
        propagate::propagate(&mut working, dictionary, &coord_index, &adding_entities)?;
    }

    let mut best = {
        let _span = tracing::debug_span!("select").entered();
        let winners = select::select(&working);
        select::materialize_best_locations(&working, &winners)
    };
    tracing::trace!(selected = best.len(), "selected best locations");

    {
        let _span = tracing::debug_span!("calibrate_confidence").entered();
        confidence::calibrate_confidence(&mut best);
    }

    let statistics = {
        let _span = tracing::debug_span!("normalize").entered();
        stats::finalize(&mut best)
    };

    Ok(FindLocationsResult {
        locations: best,
        statistics: Some(statistics),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Location, LocationRecord};
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

    #[test]
    fn zero_candidates_is_not_an_error_and_has_no_statistics() {
        let dict = Dictionary::new();
        let result = find_locations(&dict, &[], &[], &[], &[]).unwrap();
        assert!(result.locations.is_empty());
        assert!(result.statistics.is_none());
    }

    #[test]
    fn single_unambiguous_candidate_is_selected_with_statistics() {
        let mut dict = Dictionary::new();
        dict.insert(Location::from_raw(record("5000000000000", "North America")).unwrap());
        dict.insert(Location::from_raw(record("5118000000000", "United States")).unwrap());

        let candidates = vec![CandidateEntity::new("United States", 0.6)];
        let result = find_locations(&dict, &[], &candidates, &[], &[]).unwrap();
        assert_eq!(result.locations.len(), 1);
        assert_eq!(result.locations[0].id(), "5118000000000");
        assert!(result.statistics.is_some());
        assert!((result.locations[0].score - 1.0).abs() < 1e-9);
    }
}
