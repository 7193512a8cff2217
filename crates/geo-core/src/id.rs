//! The hierarchy ID algebra (§4.1, §6.1).
//!
//! A location ID is 13 uppercase hex digits packing five levels of
//! containment:
//!
//! ```text
//! pos:   0    1    2..4   4..6   6..9    9..13
//! level: cont region country admin2 admin1  city
//! ```
//!
//! Every derived property on [`crate::location::Location`] is computed from
//! this module's functions. Keep it allocation-light: it runs once per
//! location at dictionary-build time.

use crate::error::{GeoError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const ID_LEN: usize = 13;

/// The six location types, derived from which digit ranges are all zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationType {
    Continent,
    Region,
    Country,
    AdminArea2,
    AdminArea1,
    City,
}

/// Validates the 13-hex-digit rule and returns the canonical uppercase form.
pub fn normalize_id(id: &str) -> Result<String> {
    if id.len() != ID_LEN || !id.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(GeoError::MalformedId { id: id.to_string() });
    }
    Ok(id.to_ascii_uppercase())
}

fn all_zero(digits: &str) -> bool {
    digits.chars().all(|c| c == '0')
}

/// Derives the location type from a canonical (validated, uppercase) ID.
///
/// Checked from the top: the first range from the top that is non-zero and
/// whose own sub-ranges are all zero determines the type; otherwise `City`.
pub fn derive_type(id: &str) -> LocationType {
    debug_assert_eq!(id.len(), ID_LEN);
    if all_zero(&id[1..13]) {
        LocationType::Continent
    } else if all_zero(&id[2..13]) {
        LocationType::Region
    } else if all_zero(&id[4..13]) {
        LocationType::Country
    } else if all_zero(&id[6..13]) {
        LocationType::AdminArea2
    } else if all_zero(&id[9..13]) {
        LocationType::AdminArea1
    } else {
        LocationType::City
    }
}

pub fn is_inside_continent(t: LocationType) -> bool {
    !matches!(t, LocationType::Continent | LocationType::Region)
}

/// Same boolean as [`is_inside_continent`] — region and continent are
/// siblings on a separate axis, so whether a location is inside *a* region
/// tracks exactly whether it is inside *a* continent.
pub fn is_inside_region(t: LocationType) -> bool {
    is_inside_continent(t)
}

pub fn is_inside_country(t: LocationType) -> bool {
    is_inside_continent(t) && t != LocationType::Country
}

pub fn is_inside_admin_area2(t: LocationType, id: &str) -> bool {
    matches!(t, LocationType::City | LocationType::AdminArea1) && &id[4..6] != "00"
}

pub fn is_inside_admin_area1(t: LocationType, id: &str) -> bool {
    t == LocationType::City && &id[6..9] != "000"
}

/// Continent-level ID: the continent digit, all else zeroed.
pub fn continent_id_of(id: &str) -> String {
    format!("{}{}", &id[0..1], "0".repeat(12))
}

/// Region-level ID: `"0" + region digit (read from position 1) + zeros`.
pub fn region_id_of(id: &str) -> String {
    format!("0{}{}", &id[1..2], "0".repeat(11))
}

pub fn country_id_of(id: &str) -> String {
    format!("{}{}", &id[0..4], "0".repeat(9))
}

pub fn admin_area2_id_of(id: &str) -> String {
    format!("{}{}", &id[0..6], "0".repeat(7))
}

pub fn admin_area1_id_of(id: &str) -> String {
    format!("{}{}", &id[0..9], "0".repeat(4))
}

/// The ordered list of containing-location IDs up to the continent,
/// excluding the region, nearest parent first.
///
/// Built generically from the per-level `Option<...Id>` derivation: a
/// level's ID is only `Some` when this location is actually inside it, so
/// flattening `[admin1, admin2, country, continent]` in that fixed order
/// yields exactly the §3.1 definition for every location type.
pub fn parents_ids_of(
    id: &str,
    admin_area1_id: &Option<String>,
    admin_area2_id: &Option<String>,
    country_id: &Option<String>,
    continent_id: &Option<String>,
) -> Vec<String> {
    let _ = id;
    [admin_area1_id, admin_area2_id, country_id, continent_id]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
}

/// The §4.1 dominance tier used to break score ties.
///
/// `Country` and a "BigCity" (capital, or population at/above the
/// threshold) share the top tier and are only distinguished by population;
/// `AdminArea1` sits below them; a "LittleCity" sits below that. The
/// remaining three types never appear in the spec's worked tie-break
/// examples; they are slotted in by containment breadth as a documented
/// extension (see `DESIGN.md`).
pub fn dominance_tier(t: LocationType, is_big_city: bool) -> u8 {
    match t {
        LocationType::Continent => 6,
        LocationType::Region => 5,
        LocationType::Country => 4,
        LocationType::AdminArea2 => 3,
        LocationType::AdminArea1 => 2,
        LocationType::City => {
            if is_big_city {
                4
            } else {
                1
            }
        }
    }
}

/// Compares two `(tier, population)` pairs per the §4.1 dominance order:
/// higher tier wins; on a tied tier, larger population wins; `None`
/// population compares as smaller than any `Some`.
pub fn compare_dominance(
    a: (u8, Option<i64>),
    b: (u8, Option<i64>),
) -> Ordering {
    a.0.cmp(&b.0).then_with(|| match (a.1, b.1) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    })
}
