//! Tunable constants for the scoring rules.
//!
//! Scoring is deterministic and rule-based (PURPOSE & SCOPE, Non-goals), so
//! these stay compile-time constants rather than a runtime config file —
//! the same "declare it, don't make it a knob" posture the teacher crate
//! takes with its Cargo feature-flag control panel.

/// Uniform damping applied to `initScore` for every extended location that
/// loses an entity during ambiguity resolution (§4.4).
pub const AMBIGUITY_DAMPING: f64 = 0.9;

/// Rate factor for the parent→child boost (§4.6, "Boost by parent (mutual)").
pub const PARENT_BOOST_RATE: f64 = 1.0;

/// Rate factor for the child→parent boost (§4.6).
pub const CHILD_BOOST_RATE: f64 = 0.5;

/// Multiplier applied per matching orphan-parent label (§4.6, "Boost by
/// parent labels (fallback)").
pub const PARENT_LABEL_BOOST_RATE: f64 = 0.333;

/// Rate factor for a non-coordinate sibling boost (§4.6, "Boost by brother").
pub const SIBLING_BOOST_RATE: f64 = 0.5;

/// Rate factor for a coordinate-amplified sibling boost (§4.6).
pub const COORDINATE_SIBLING_BOOST_RATE: f64 = 1.0;

/// Number of additive contributions averaged by the confidence helper
/// (§4.8): parents, sub-levels, brothers, other relatives, borders.
pub const CONFIDENCE_CONTRIBUTIONS: f64 = 5.0;

/// Population (people) at or above which a city is treated as a "BigCity"
/// for the §4.1 dominance order, when it is not itself a capital.
///
/// The distilled spec's tie-break rules reference "BigCity" vs "LittleCity"
/// without defining the split; this threshold plus the capital flag is the
/// resolution recorded in `DESIGN.md`.
pub const BIG_CITY_POPULATION_THRESHOLD: i64 = 1_000_000;
