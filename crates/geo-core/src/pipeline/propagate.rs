//! Score propagation (§4.6), the fourth pipeline stage.
//!
//! Two full passes over the working set, sorted by ID for determinism
//! (§9 open question ii): parent boosts, then sibling boosts.

use crate::constants::{
    CHILD_BOOST_RATE, COORDINATE_SIBLING_BOOST_RATE, PARENT_BOOST_RATE, PARENT_LABEL_BOOST_RATE,
    SIBLING_BOOST_RATE,
};
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::id::LocationType;
use crate::location::Location;
use crate::pipeline::coordinates::CoordinateIndex;
use crate::pipeline::WorkingSet;
use std::collections::{HashMap, HashSet};

pub fn propagate(
    working: &mut WorkingSet,
    dictionary: &Dictionary,
    coord_index: &CoordinateIndex,
    adding_entities: &HashSet<String>,
) -> Result<()> {
    boost_by_parents(working, dictionary, adding_entities)?;
    boost_by_brothers(working, coord_index);
    Ok(())
}

/// Arithmetic-mean-then-max boost computation shared by every relation
/// (§4.6 "Boost computation"). `self_slot` is the relation's own per-entity
/// map on the target location (overwritten here); `relative_slots` are the
/// other relations' maps on the *same* location, consulted but not written.
fn apply_boost(
    entries: &[(String, f64)],
    self_slot: &mut HashMap<String, f64>,
    relative_slots: &[&HashMap<String, f64>],
) -> f64 {
    let mut final_boost = 0.0_f64;
    for (name, score) in entries {
        let mut sum = 0.0_f64;
        let mut count = 0usize;
        for relative in relative_slots {
            if let Some(value) = relative.get(name) {
                sum += value;
                count += 1;
            }
        }
        let boost = (score + sum) / (count as f64 + 1.0);
        self_slot.insert(name.clone(), boost);
        final_boost = final_boost.max(boost);
    }
    final_boost
}

/// A parent is influential iff it is AdminArea1, AdminArea2, or a Country
/// when the child is not itself inside an admin-area-2.
fn is_influential_parent(parent_type: LocationType, child_is_inside_admin_area2: bool) -> bool {
    matches!(parent_type, LocationType::AdminArea1 | LocationType::AdminArea2)
        || (parent_type == LocationType::Country && !child_is_inside_admin_area2)
}

fn boost_by_parents(
    working: &mut WorkingSet,
    dictionary: &Dictionary,
    adding_entities: &HashSet<String>,
) -> Result<()> {
    let mut l_ids: Vec<String> = working.keys().cloned().collect();
    l_ids.sort();

    for l_id in l_ids {
        let (parent_ids, l_is_inside_admin_area2, l_entity_names, l_init_score) = {
            let l = match working.get(&l_id) {
                Some(l) => l,
                None => continue,
            };
            (
                l.location.parents_ids.clone(),
                l.location.is_inside_admin_area2,
                l.entity_names(),
                l.init_score,
            )
        };

        let mut sorted_parents = parent_ids;
        sorted_parents.sort();

        for p_id in sorted_parents {
            if working.contains_key(&p_id) {
                let influential_data = {
                    let p = working.get(&p_id).expect("just checked contains_key");
                    if is_influential_parent(p.location.loc_type, l_is_inside_admin_area2) {
                        let p_entity_names = p.entity_names();
                        let intersection: HashSet<String> =
                            l_entity_names.intersection(&p_entity_names).cloned().collect();
                        Some((p.entries_except(&intersection), intersection))
                    } else {
                        None
                    }
                };
                let Some((p_entries_except_i, intersection)) = influential_data else {
                    continue;
                };

                let l_children_snapshot = working
                    .get(&l_id)
                    .expect("l_id still present")
                    .boost
                    .children
                    .clone();
                {
                    let l_mut = working.get_mut(&l_id).expect("l_id still present");
                    let boost_l =
                        apply_boost(&p_entries_except_i, &mut l_mut.boost.parents, &[&l_children_snapshot]);
                    l_mut.score += PARENT_BOOST_RATE * boost_l;
                }

                let l_entries_except_i = working
                    .get(&l_id)
                    .expect("l_id still present")
                    .entries_except(&intersection);
                let l_parents_snapshot = working
                    .get(&l_id)
                    .expect("l_id still present")
                    .boost
                    .parents
                    .clone();
                let boost_p = {
                    let l_mut = working.get_mut(&l_id).expect("l_id still present");
                    apply_boost(&l_entries_except_i, &mut l_mut.boost.children, &[&l_parents_snapshot])
                };
                if let Some(p_mut) = working.get_mut(&p_id) {
                    p_mut.score += CHILD_BOOST_RATE * boost_p;
                }
            } else {
                let parent_loc: &Location = dictionary.require_by_id(&p_id)?;
                let matching_labels = parent_loc.labels.intersection(adding_entities).count();
                if matching_labels > 0 {
                    if let Some(l_mut) = working.get_mut(&l_id) {
                        l_mut.score += PARENT_LABEL_BOOST_RATE * matching_labels as f64 * l_init_score;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Two locations are brothers iff same type, different IDs, and either (a)
/// same immediate non-region parent ID, or (b) both cities of the same
/// country with an equal `subType` (§4.6).
fn are_brothers(l: &Location, b: &Location) -> bool {
    if l.id == b.id || l.loc_type != b.loc_type {
        return false;
    }
    let l_immediate = l.parents_ids.first();
    let b_immediate = b.parents_ids.first();
    if let (Some(lp), Some(bp)) = (l_immediate, b_immediate) {
        if lp == bp {
            return true;
        }
    }
    if l.loc_type == LocationType::City {
        if let (Some(lc), Some(bc)) = (&l.country_id, &b.country_id) {
            if lc == bc && l.sub_type.is_some() && l.sub_type == b.sub_type {
                return true;
            }
        }
    }
    false
}

fn boost_by_brothers(working: &mut WorkingSet, coord_index: &CoordinateIndex) {
    let mut ids: Vec<String> = working.keys().cloned().collect();
    ids.sort();

    for l_id in &ids {
        let (l_location, l_entity_names) = {
            let l = match working.get(l_id) {
                Some(l) => l,
                None => continue,
            };
            (l.location.clone(), l.entity_names())
        };

        for b_id in &ids {
            if b_id == l_id {
                continue;
            }
            let is_brother = match working.get(b_id) {
                Some(b) => are_brothers(&l_location, &b.location),
                None => false,
            };
            if !is_brother {
                continue;
            }

            let b_entity_names = working.get(b_id).expect("checked above").entity_names();
            let intersection: HashSet<String> =
                l_entity_names.intersection(&b_entity_names).cloned().collect();
            let coord_b = coord_index.coordinate_subset(&b_entity_names, &l_entity_names);
            let non_coord_b: HashSet<String> =
                b_entity_names.difference(&coord_b).cloned().collect();

            let exclude_non_coord: HashSet<String> =
                intersection.union(&coord_b).cloned().collect();
            let entries_non_coord = working
                .get(b_id)
                .expect("checked above")
                .entries_except(&exclude_non_coord);

            let l_children_snapshot = working.get(l_id).expect("checked above").boost.children.clone();
            let l_parents_snapshot = working.get(l_id).expect("checked above").boost.parents.clone();
            {
                let l_mut = working.get_mut(l_id).expect("checked above");
                let boost = apply_boost(
                    &entries_non_coord,
                    &mut l_mut.boost.brothers,
                    &[&l_children_snapshot, &l_parents_snapshot],
                );
                l_mut.score += SIBLING_BOOST_RATE * boost;
            }

            let exclude_coord: HashSet<String> = intersection.union(&non_coord_b).cloned().collect();
            let entries_coord = working
                .get(b_id)
                .expect("checked above")
                .entries_except(&exclude_coord);
            let l_children_snapshot2 = working.get(l_id).expect("checked above").boost.children.clone();
            let l_parents_snapshot2 = working.get(l_id).expect("checked above").boost.parents.clone();
            {
                let l_mut = working.get_mut(l_id).expect("checked above");
                let boost = apply_boost(
                    &entries_coord,
                    &mut l_mut.boost.brothers,
                    &[&l_children_snapshot2, &l_parents_snapshot2],
                );
                l_mut.score += COORDINATE_SIBLING_BOOST_RATE * boost;
            }
        }
    }
}
