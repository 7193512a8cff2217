//! geo-core prelude: bring the common types into scope for callers.

#![allow(unused_imports)]

pub use crate::candidate::CandidateEntity;
pub use crate::dictionary::Dictionary;
pub use crate::error::{GeoError, Result};
pub use crate::extended::{Boost, ExtendedLocation, Relation};
pub use crate::id::LocationType;
pub use crate::location::{AdminDivision, Location, LocationRecord};
pub use crate::pipeline::{find_locations, FindLocationsResult, Moments, Statistics};
