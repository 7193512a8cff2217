//! End-to-end scenarios from §8's concrete seeds.

use geo_core::prelude::*;
use std::collections::HashMap;

fn record(id: &str, name: &str) -> LocationRecord {
    LocationRecord {
        id: id.to_string(),
        name: name.to_string(),
        unlocode: None,
        country_code: None,
        sub_type: None,
        translations: HashMap::new(),
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
fn location_typing_by_id() {
    let washington = Location::from_raw(record("51180C026000A", "Washington")).unwrap();
    assert_eq!(washington.loc_type, LocationType::City);
    assert_eq!(washington.admin_area1_id.as_deref(), Some("51180C0260000"));
    assert_eq!(washington.admin_area2_id.as_deref(), Some("51180C0000000"));
    assert_eq!(washington.country_id.as_deref(), Some("5118000000000"));
    assert_eq!(washington.region_id.as_deref(), Some("0100000000000"));
    assert_eq!(washington.continent_id.as_deref(), Some("5000000000000"));
    assert!(washington.is_inside_admin_area1);
    assert!(washington.is_inside_admin_area2);
    assert!(washington.is_inside_country);
    assert!(washington.is_inside_region);
    assert!(washington.is_inside_continent);
}

#[test]
fn incomplete_hierarchy_shoreditch() {
    let shoreditch = Location::from_raw(record("1308020000001", "Shoreditch")).unwrap();
    assert_eq!(shoreditch.loc_type, LocationType::City);
    assert!(shoreditch.admin_area1_id.is_none());
    assert_eq!(shoreditch.admin_area2_id.as_deref(), Some("1308020000000"));
    assert_eq!(shoreditch.country_id.as_deref(), Some("1308000000000"));
    assert!(!shoreditch.is_inside_admin_area1);
    assert!(shoreditch.is_inside_admin_area2);
    assert!(shoreditch.is_inside_country);
}

/// §8 scenario 5: the Los Angeles / New York / Philadelphia walkthrough.
#[test]
fn los_angeles_new_york_philadelphia_end_to_end() {
    let mut dict = Dictionary::new();
    dict.insert(Location::from_raw(record("5000000000000", "North America")).unwrap());
    dict.insert(Location::from_raw(record("5118000000000", "United States")).unwrap());
    // Zero admin digits: each city's only ancestors are the country and
    // continent above, both present in this dictionary.
    dict.insert(Location::from_raw(record("5118000000001", "Los Angeles")).unwrap());
    dict.insert(Location::from_raw(record("5118000000002", "New York")).unwrap());
    dict.insert(Location::from_raw(record("5118000000003", "York")).unwrap());
    dict.insert(Location::from_raw(record("5118000000004", "Philadelphia")).unwrap());

    let text = "The crime rate is very high in the following cities of the United States of \
                America: Los Angeles, New York and Philadelphia.";
    let tokens: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect();

    let candidates = vec![
        CandidateEntity::new("Los Angeles", 0.4),
        CandidateEntity::new("New York", 0.6),
        CandidateEntity::new("York", 0.6),
        CandidateEntity::new("Philadelphia", 0.1),
        CandidateEntity::new("rate", 0.2),
        CandidateEntity::new("United States of America", 0.3),
        CandidateEntity::new("United States", 0.3),
        CandidateEntity::new("America", 0.3),
    ];
    let coordinate_groups = vec![vec![
        "Los Angeles".to_string(),
        "New York".to_string(),
        "Philadelphia".to_string(),
    ]];
    let ambiguity_groups = vec![
        vec![
            "United States of America".to_string(),
            "United States".to_string(),
            "America".to_string(),
        ],
        vec!["New York".to_string(), "York".to_string()],
    ];

    let result =
        find_locations(&dict, &tokens, &candidates, &coordinate_groups, &ambiguity_groups).unwrap();

    let mentioned: Vec<&str> = result
        .locations
        .iter()
        .flat_map(|l| l.assigned_mentions.iter())
        .map(|s| s.as_str())
        .collect();

    assert!(mentioned.contains(&"los angeles"));
    assert!(mentioned.contains(&"philadelphia"));
    assert!(
        mentioned.contains(&"new york") || mentioned.contains(&"york"),
        "exactly one of New York / York should survive ambiguity resolution"
    );
    assert!(!mentioned.contains(&"new york") || !mentioned.contains(&"york"));
    assert!(
        mentioned.contains(&"united states of america")
            || mentioned.contains(&"united states")
            || mentioned.contains(&"america")
    );
    assert!(
        !mentioned.contains(&"rate"),
        "\"rate\" must not match any location"
    );

    let stats = result.statistics.unwrap();
    assert!((result.locations.iter().map(|l| l.score).sum::<f64>() - 1.0).abs() < 1e-9);
    assert!(stats.score.avg > 0.0);
}

/// §8 scenario 6: two bordering, selected countries each get a borders
/// contribution before averaging/cube-rooting.
#[test]
fn bordering_countries_receive_a_confidence_contribution() {
    let mut france = record("2200000000000", "France");
    france.borders.push("2300000000000".to_string());
    let mut germany = record("2300000000000", "Germany");
    germany.borders.push("2200000000000".to_string());

    let mut dict = Dictionary::new();
    dict.insert(Location::from_raw(record("2000000000000", "Europe")).unwrap());
    dict.insert(Location::from_raw(france).unwrap());
    dict.insert(Location::from_raw(germany).unwrap());

    let candidates = vec![
        CandidateEntity::new("France", 0.7),
        CandidateEntity::new("Germany", 0.7),
    ];
    let result = find_locations(&dict, &[], &candidates, &[], &[]).unwrap();

    assert_eq!(result.locations.len(), 2);
    for location in &result.locations {
        assert!(location.confidence > 0.0);
    }
}
