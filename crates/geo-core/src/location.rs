//! The immutable `Location` record (§3.1).

use crate::constants::BIG_CITY_POPULATION_THRESHOLD;
use crate::id::{
    self, admin_area1_id_of, admin_area2_id_of, continent_id_of, country_id_of, derive_type,
    is_inside_admin_area1, is_inside_admin_area2, is_inside_continent, is_inside_country,
    is_inside_region, normalize_id, parents_ids_of, region_id_of, LocationType,
};
use crate::error::Result;
use crate::text::normalize;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One alternative administrative division: `(type, name, level)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminDivision {
    pub kind: String,
    pub name: String,
    pub level: i32,
}

/// Caller-supplied attributes for a single gazetteer entry.
///
/// Gazetteer acquisition (parsing the source JSON lines, validation,
/// filtering) is out of scope for this crate; a loader builds one of these
/// per surviving record and passes it to [`Location::from_raw`]. Records
/// with `sub_type` of `"hamlet"`/`"village"` or a null name are expected to
/// already have been excluded by that loader. Derives `Deserialize` so a
/// dictionary-snapshot loader (e.g. `geo-cli`) can read these directly off
/// a JSON array without a bespoke DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub unlocode: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub translations: HashMap<String, String>,
    #[serde(default)]
    pub other_names: Vec<String>,
    #[serde(default)]
    pub demonym: Option<String>,
    #[serde(default)]
    pub coordinates: Option<(f64, f64)>,
    #[serde(default)]
    pub borders: Vec<String>,
    #[serde(default)]
    pub is_capital: Option<bool>,
    #[serde(default)]
    pub area_km2: Option<i64>,
    #[serde(default)]
    pub population: Option<i64>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub admin_divisions: Vec<AdminDivision>,
}

/// An immutable gazetteer entry, with derived properties computed once at
/// construction and cached so the hot disambiguation path stays
/// allocation-free (§9, "Derived-property caching").
#[derive(Debug, Clone)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub unlocode: Option<String>,
    pub country_code: Option<String>,
    pub sub_type: Option<String>,
    pub translations: HashMap<String, String>,
    pub other_names: Vec<String>,
    pub demonym: Option<String>,
    pub coordinates: Option<(f64, f64)>,
    pub borders: Vec<String>,
    pub is_capital: Option<bool>,
    pub area_km2: Option<i64>,
    pub population: Option<i64>,
    pub languages: Vec<String>,
    pub admin_divisions: Vec<AdminDivision>,

    // --- derived, computed once in from_raw ---
    pub loc_type: LocationType,
    pub labels: HashSet<String>,
    pub parents_ids: Vec<String>,
    pub is_inside_continent: bool,
    pub is_inside_region: bool,
    pub is_inside_country: bool,
    pub is_inside_admin_area2: bool,
    pub is_inside_admin_area1: bool,
    pub continent_id: Option<String>,
    pub region_id: Option<String>,
    pub country_id: Option<String>,
    pub admin_area2_id: Option<String>,
    pub admin_area1_id: Option<String>,
}

impl Location {
    /// Validates the ID, derives the type and every cached property, and
    /// returns the finished, immutable `Location`.
    pub fn from_raw(raw: LocationRecord) -> Result<Self> {
        let id = normalize_id(&raw.id)?;
        let loc_type = derive_type(&id);

        let is_inside_continent = is_inside_continent(loc_type);
        let is_inside_region = is_inside_region(loc_type);
        let is_inside_country = is_inside_country(loc_type);
        let is_inside_admin_area2 = is_inside_admin_area2(loc_type, &id);
        let is_inside_admin_area1 = is_inside_admin_area1(loc_type, &id);

        let continent_id = is_inside_continent.then(|| continent_id_of(&id));
        let region_id = is_inside_region.then(|| region_id_of(&id));
        let country_id = is_inside_country.then(|| country_id_of(&id));
        let admin_area2_id = is_inside_admin_area2.then(|| admin_area2_id_of(&id));
        let admin_area1_id = is_inside_admin_area1.then(|| admin_area1_id_of(&id));

        let parents_ids = parents_ids_of(
            &id,
            &admin_area1_id,
            &admin_area2_id,
            &country_id,
            &continent_id,
        );

        let mut labels: HashSet<String> = HashSet::new();
        labels.insert(normalize(&raw.name));
        for translated in raw.translations.values() {
            let n = normalize(translated);
            if !n.is_empty() {
                labels.insert(n);
            }
        }
        for other in &raw.other_names {
            let n = normalize(other);
            if !n.is_empty() {
                labels.insert(n);
            }
        }

        Ok(Location {
            id,
            name: raw.name,
            unlocode: raw.unlocode,
            country_code: raw.country_code,
            sub_type: raw.sub_type,
            translations: raw.translations,
            other_names: raw.other_names,
            demonym: raw.demonym,
            coordinates: raw.coordinates,
            borders: raw.borders,
            is_capital: raw.is_capital,
            area_km2: raw.area_km2,
            population: raw.population,
            languages: raw.languages,
            admin_divisions: raw.admin_divisions,

            loc_type,
            labels,
            parents_ids,
            is_inside_continent,
            is_inside_region,
            is_inside_country,
            is_inside_admin_area2,
            is_inside_admin_area1,
            continent_id,
            region_id,
            country_id,
            admin_area2_id,
            admin_area1_id,
        })
    }

    /// Whether this city counts as a "BigCity" for the §4.1 dominance
    /// order: capitals always qualify, otherwise population at or above
    /// [`BIG_CITY_POPULATION_THRESHOLD`].
    pub fn is_big_city(&self) -> bool {
        self.loc_type == LocationType::City
            && (self.is_capital == Some(true)
                || self.population.unwrap_or(0) >= BIG_CITY_POPULATION_THRESHOLD)
    }

    pub fn dominance_tier(&self) -> u8 {
        id::dominance_tier(self.loc_type, self.is_big_city())
    }

    pub fn is_country(&self) -> bool {
        self.loc_type == LocationType::Country
    }
}
