// crates/geo-core/src/lib.rs

//! Gazetteer-backed disambiguation of geographic-entity mentions in text.
//!
//! Given a preloaded [`Dictionary`] and a set of candidate mentions, the
//! [`find_locations`] pipeline resolves each mention to the single location
//! it most likely refers to, via candidate expansion, ambiguity
//! resolution, adding-entity detection, hierarchy-aware score propagation,
//! selection, and confidence calibration.

pub mod candidate;
pub mod constants;
pub mod dictionary;
pub mod error;
pub mod extended;
pub mod id;
pub mod location;
pub mod pipeline;
pub mod prelude;
pub mod text;

pub use crate::error::{GeoError, Result};
pub use candidate::CandidateEntity;
pub use dictionary::Dictionary;
pub use extended::{Boost, ExtendedLocation, Relation};
pub use id::LocationType;
pub use location::{AdminDivision, Location, LocationRecord};
pub use pipeline::{find_locations, FindLocationsResult, Moments, Statistics, WorkingSet};
