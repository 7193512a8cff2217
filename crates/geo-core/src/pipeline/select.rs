//! Selection of best locations per mention (§4.7), the fifth pipeline stage.

use crate::extended::ExtendedLocation;
use crate::id::compare_dominance;
use crate::pipeline::WorkingSet;
use std::cmp::Ordering;
use std::collections::HashMap;

/// `a` is "more probable" than `b`: strictly greater score, then the §4.1
/// dominance order, then population.
pub fn is_more_probable(a: &ExtendedLocation, b: &ExtendedLocation) -> bool {
    if a.score != b.score {
        return a.score > b.score;
    }
    compare_dominance(a.dominance_key(), b.dominance_key()) == Ordering::Greater
}

/// For each candidate mention, the ID of its most probable surviving
/// extended location. Iterates the working set in ID order so that ties
/// resolve deterministically regardless of `HashMap` iteration order.
pub fn select(working: &WorkingSet) -> HashMap<String, String> {
    let mut best: HashMap<String, String> = HashMap::new();
    let mut ids: Vec<&String> = working.keys().collect();
    ids.sort();

    for id in ids {
        let candidate_loc = &working[id];
        for entity in &candidate_loc.candidate_entities {
            let name = entity.norm_name();
            let replace = match best.get(&name) {
                None => true,
                Some(incumbent_id) => is_more_probable(candidate_loc, &working[incumbent_id]),
            };
            if replace {
                best.insert(name, id.clone());
            }
        }
    }
    best
}

/// Materializes the winning `ExtendedLocation`s, attaching each one's
/// `assigned_mentions`.
pub fn materialize_best_locations(
    working: &WorkingSet,
    best: &HashMap<String, String>,
) -> Vec<ExtendedLocation> {
    let mut mentions_by_loc: HashMap<String, Vec<String>> = HashMap::new();
    for (mention, loc_id) in best {
        mentions_by_loc
            .entry(loc_id.clone())
            .or_default()
            .push(mention.clone());
    }

    let mut loc_ids: Vec<&String> = mentions_by_loc.keys().collect();
    loc_ids.sort();

    loc_ids
        .into_iter()
        .map(|id| {
            let mut extended = working[id].clone();
            let mut mentions = mentions_by_loc[id].clone();
            mentions.sort();
            extended.assigned_mentions = mentions;
            extended
        })
        .collect()
}
