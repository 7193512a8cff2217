//! Ambiguity resolution (§4.4), the second pipeline stage.

use crate::constants::AMBIGUITY_DAMPING;
use crate::pipeline::WorkingSet;
use crate::text::normalize;
use std::collections::HashSet;

/// Reduces each ambiguity group to at most one surviving entity and prunes
/// the working set in place.
///
/// Winner determination reads a snapshot taken before any group is
/// processed: since no entity is actually removed from the working set
/// until every group's winner has been decided, "currently has a surviving
/// extended location" and "at the time the groups started" coincide. That
/// snapshot is what makes the "unless a later group kept them" exception
/// (§4.4) simple to honor — a name marked as a loser by an earlier group
/// is still rescued if it wins a later one, because deletion is deferred to
/// a single final pass over `losers \ winners`.
pub fn resolve_ambiguity(working: &mut WorkingSet, ambiguity_groups: &[Vec<String>]) {
    if ambiguity_groups.is_empty() {
        return;
    }

    let snapshot: Vec<HashSet<String>> = working.values().map(|ext| ext.entity_names()).collect();
    let has_survivor = |name: &str| snapshot.iter().any(|names| names.contains(name));

    let mut winners_all: HashSet<String> = HashSet::new();
    let mut losers_all: HashSet<String> = HashSet::new();

    for group in ambiguity_groups {
        let normalized: Vec<String> = group.iter().map(|n| normalize(n)).collect();
        let winner = normalized.iter().find(|name| has_survivor(name)).cloned();
        if let Some(winner) = winner {
            for name in &normalized {
                if *name != winner {
                    losers_all.insert(name.clone());
                }
            }
            winners_all.insert(winner);
        }
    }

    let deletion_set: HashSet<String> = losers_all.difference(&winners_all).cloned().collect();
    if deletion_set.is_empty() {
        return;
    }

    for ext in working.values_mut() {
        let touched = ext
            .candidate_entities
            .iter()
            .any(|e| deletion_set.contains(&e.norm_name()));
        if touched {
            ext.init_score *= AMBIGUITY_DAMPING;
            ext.score = ext.init_score;
            for name in &deletion_set {
                ext.remove_entity(name);
            }
        }
    }

    working.retain(|_, ext| ext.has_entities());
}
