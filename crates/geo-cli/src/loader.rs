//! Gazetteer acquisition: reading a dictionary snapshot off disk.
//!
//! Out of scope for `geo-core` itself (PURPOSE & SCOPE), so it lives here,
//! grounded in the teacher's `loader.rs` read-then-build shape.

use anyhow::{Context, Result};
use geo_core::prelude::*;
use geo_core::LocationRecord;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const EXCLUDED_SUB_TYPES: [&str; 2] = ["hamlet", "village"];

/// Reads a JSON array of [`LocationRecord`]s and builds a [`Dictionary`],
/// dropping records with a null/empty name or an excluded `subType`
/// (§4.2: "Records with `subType` in {hamlet, village} or null name are
/// excluded by the loader").
pub fn load_dictionary(path: &Path) -> Result<Dictionary> {
    let file = File::open(path)
        .with_context(|| format!("opening dictionary snapshot at {}", path.display()))?;
    let reader = BufReader::new(file);
    let records: Vec<LocationRecord> = serde_json::from_reader(reader)
        .with_context(|| format!("parsing dictionary snapshot at {}", path.display()))?;

    let mut dictionary = Dictionary::new();
    for record in records {
        if record.name.trim().is_empty() {
            continue;
        }
        if let Some(sub_type) = &record.sub_type {
            if EXCLUDED_SUB_TYPES.contains(&sub_type.as_str()) {
                continue;
            }
        }
        let location = Location::from_raw(record)?;
        dictionary.insert(location);
    }
    Ok(dictionary)
}
