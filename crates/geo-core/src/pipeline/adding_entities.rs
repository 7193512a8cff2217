//! Adding-entity detection (§4.5), the third pipeline stage.

use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::pipeline::WorkingSet;
use crate::text::{normalize, normalized_tokens};
use std::collections::HashSet;

/// Finds parent locations referenced (via `parentsIds`) by the working set
/// but not themselves present in it, and returns the subset of their labels
/// that occur as a contiguous, token-boundary-aligned subsequence of `T`.
pub fn detect_adding_entities(
    working: &WorkingSet,
    dictionary: &Dictionary,
    text_tokens: &[String],
) -> Result<HashSet<String>> {
    let normalized_text: Vec<String> = text_tokens.iter().map(|t| normalize(t)).collect();

    let mut orphan_parent_ids: HashSet<String> = HashSet::new();
    for ext in working.values() {
        for pid in &ext.location.parents_ids {
            if !working.contains_key(pid) {
                orphan_parent_ids.insert(pid.clone());
            }
        }
    }

    let mut candidate_labels: HashSet<String> = HashSet::new();
    for pid in &orphan_parent_ids {
        let parent = dictionary.require_by_id(pid)?;
        candidate_labels.extend(parent.labels.iter().cloned());
    }

    let mut adding_entities = HashSet::new();
    for label in candidate_labels {
        let tokens = normalized_tokens(&label);
        if !tokens.is_empty() && contains_subsequence(&normalized_text, &tokens) {
            adding_entities.insert(label);
        }
    }
    Ok(adding_entities)
}

fn contains_subsequence(haystack: &[String], needle: &[String]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}
