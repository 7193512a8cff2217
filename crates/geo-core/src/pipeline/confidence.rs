//! Confidence calibration (§4.8), the sixth pipeline stage.
//!
//! Runs strictly on the post-selection `BestLocations` set (§9, "Confidence
//! uses post-selection data only").

use crate::constants::CONFIDENCE_CONTRIBUTIONS;
use crate::extended::ExtendedLocation;
use crate::id::LocationType;
use std::collections::{HashMap, HashSet};

/// One location's facts needed by the helper, captured up front so the main
/// loop can mutate `confidence` without fighting the borrow checker.
struct Facts {
    id: String,
    loc_type: LocationType,
    parent_ids: Vec<String>,
    parent_types: HashMap<String, LocationType>,
    country_id: Option<String>,
    sub_type: Option<String>,
    immediate_parent_id: Option<String>,
    borders: Vec<String>,
    is_country: bool,
}

fn are_brothers(a: &Facts, b: &Facts) -> bool {
    if a.id == b.id || a.loc_type != b.loc_type {
        return false;
    }
    if let (Some(ap), Some(bp)) = (&a.immediate_parent_id, &b.immediate_parent_id) {
        if ap == bp {
            return true;
        }
    }
    if a.loc_type == LocationType::City {
        if let (Some(ac), Some(bc)) = (&a.country_id, &b.country_id) {
            if ac == bc && a.sub_type.is_some() && a.sub_type == b.sub_type {
                return true;
            }
        }
    }
    false
}

/// Same `countryId`, distinct ids (§9 open question i).
fn is_relative(a: &Facts, b: &Facts) -> bool {
    a.id != b.id && a.country_id.is_some() && a.country_id == b.country_id
}

pub fn calibrate_confidence(best: &mut [ExtendedLocation]) {
    if best.is_empty() {
        return;
    }

    let facts: Vec<Facts> = best
        .iter()
        .map(|ext| Facts {
            id: ext.id().to_string(),
            loc_type: ext.location.loc_type,
            parent_ids: ext.location.parents_ids.clone(),
            parent_types: ext
                .parents
                .iter()
                .map(|p| (p.id.clone(), p.loc_type))
                .collect(),
            country_id: ext.location.country_id.clone(),
            sub_type: ext.location.sub_type.clone(),
            immediate_parent_id: ext.location.parents_ids.first().cloned(),
            borders: ext.location.borders.clone(),
            is_country: ext.location.is_country(),
        })
        .collect();

    let best_ids: HashSet<&str> = facts.iter().map(|f| f.id.as_str()).collect();

    let mut count_by_type: HashMap<LocationType, usize> = HashMap::new();
    for f in &facts {
        *count_by_type.entry(f.loc_type).or_insert(0) += 1;
    }

    let mut sub_level_count: HashMap<&str, usize> = HashMap::new();
    let mut sub_level_types: HashMap<&str, HashSet<LocationType>> = HashMap::new();
    for f in &facts {
        for pid in &f.parent_ids {
            if let Some(&bid) = best_ids.get(pid.as_str()) {
                *sub_level_count.entry(bid).or_insert(0) += 1;
                sub_level_types.entry(bid).or_default().insert(f.loc_type);
            }
        }
    }

    for (idx, ext) in best.iter_mut().enumerate() {
        let f = &facts[idx];
        let mut total = 0.0_f64;

        // 1. Parents.
        let bp: Vec<&String> = f
            .parent_ids
            .iter()
            .filter(|pid| best_ids.contains(pid.as_str()))
            .collect();
        if !bp.is_empty() {
            let bpt: HashSet<LocationType> = bp
                .iter()
                .filter_map(|pid| f.parent_types.get(pid.as_str()))
                .cloned()
                .collect();
            let s: usize = bpt.iter().map(|t| *count_by_type.get(t).unwrap_or(&0)).sum();
            if s > 0 {
                total += bp.len() as f64 / s as f64;
            }
        }

        // 2. Sub-levels.
        if let Some(st) = sub_level_types.get(f.id.as_str()) {
            let s: usize = st.iter().map(|t| *count_by_type.get(t).unwrap_or(&0)).sum();
            if s > 0 {
                let count = *sub_level_count.get(f.id.as_str()).unwrap_or(&0);
                total += count as f64 / s as f64;
            }
        }

        // 3. Brothers.
        let same_type = *count_by_type.get(&f.loc_type).unwrap_or(&0);
        if same_type > 1 {
            let bb = facts.iter().filter(|other| are_brothers(f, other)).count();
            total += bb as f64 / (same_type - 1) as f64;
        }

        // 4. Other relatives.
        let possible = facts
            .iter()
            .zip(best.iter().map(|e| e.location.is_inside_country))
            .filter(|(_, inside)| *inside)
            .count();
        if possible > 0 {
            let relatives = facts.iter().filter(|other| is_relative(f, other)).count();
            total += relatives as f64 / possible as f64;
        }

        // 5. Borders (countries only).
        if f.is_country {
            let bc = *count_by_type.get(&LocationType::Country).unwrap_or(&0);
            if bc > 1 {
                let shared = f
                    .borders
                    .iter()
                    .filter(|bid| best_ids.contains(bid.as_str()))
                    .count();
                total += shared as f64 / (bc - 1) as f64;
            }
        }

        ext.confidence = (total / CONFIDENCE_CONTRIBUTIONS).cbrt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::CandidateEntity;
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
    fn isolated_location_gets_zero_confidence() {
        let loc = Location::from_raw(record("1000000000000", "Europe")).unwrap();
        let mut best = vec![ExtendedLocation::new(
            loc,
            vec![],
            vec![CandidateEntity::new("Europe", 0.5)],
        )];
        calibrate_confidence(&mut best);
        assert_eq!(best[0].confidence, 0.0);
    }

    #[test]
    fn two_bordering_countries_each_receive_a_borders_contribution() {
        let mut france = record("2200000000000", "France");
        france.borders.push("2300000000000".to_string());
        let mut germany = record("2300000000000", "Germany");
        germany.borders.push("2200000000000".to_string());

        let mut best = vec![
            ExtendedLocation::new(
                Location::from_raw(france).unwrap(),
                vec![],
                vec![CandidateEntity::new("France", 0.5)],
            ),
            ExtendedLocation::new(
                Location::from_raw(germany).unwrap(),
                vec![],
                vec![CandidateEntity::new("Germany", 0.5)],
            ),
        ];
        calibrate_confidence(&mut best);
        let expected = (1.0_f64 / CONFIDENCE_CONTRIBUTIONS).cbrt();
        assert!((best[0].confidence - expected).abs() < 1e-9);
        assert!((best[1].confidence - expected).abs() < 1e-9);
    }

    #[test]
    fn city_and_its_country_contribute_to_each_other() {
        let country = Location::from_raw(record("5118000000000", "United States")).unwrap();
        let city = Location::from_raw(record("51180C026000A", "Washington")).unwrap();
        let mut best = vec![
            ExtendedLocation::new(
                country.clone(),
                vec![],
                vec![CandidateEntity::new("United States", 0.5)],
            ),
            ExtendedLocation::new(
                city,
                vec![country],
                vec![CandidateEntity::new("Washington", 0.5)],
            ),
        ];
        calibrate_confidence(&mut best);
        assert!(best[0].confidence > 0.0);
        assert!(best[1].confidence > 0.0);
    }
}
