//! Error types for the disambiguation engine.
//!
//! Follows the same shape as the teacher crate's `GeoError`: a `thiserror`
//! enum plus a crate-wide `Result<T>` alias. `EmptyInput` is intentionally
//! absent — per the error-handling design, zero candidates is a normal
//! path that returns an empty `Vec`, not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    /// A location ID does not satisfy the 13-hex-digit rule.
    ///
    /// Detected lazily, the first time a derived property of a malformed ID
    /// would be computed. Indicates the dictionary was built from bad data.
    #[error("malformed location id: {id:?} (expected 13 uppercase hex digits)")]
    MalformedId { id: String },

    /// `Dictionary::require_by_id` missed. Any `parentsIds` reference must
    /// resolve against a present location; a miss means the dictionary
    /// itself is corrupt.
    #[error("location not found: {id}")]
    LocationNotFound { id: String },

    /// A parent ID not present in a child's `parentsIds` (§7). Reserved: the
    /// pipeline only ever walks `Location::parents_ids`, so this precondition
    /// can't fail internally; it is exposed for a future direct `WorkingSet`
    /// mutation API that accepts a caller-supplied parent/child pair.
    #[error("{parent} is not a parent of {child}")]
    InvalidParent { child: String, parent: String },

    /// I/O failure reading an external dictionary snapshot. Gazetteer
    /// acquisition itself is out of scope for this crate, but `geo-cli`
    /// still needs to report failures reading whatever it was pointed at.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in an external dictionary snapshot or engine request.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeoError>;
