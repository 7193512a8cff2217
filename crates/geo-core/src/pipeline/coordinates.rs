//! The coordinate-entity index used to amplify sibling boosts (§4.6).

use crate::text::normalize;
use std::collections::{HashMap, HashSet};

/// Maps a normalized entity name to every coordinate group (as a set of
/// normalized names) that contains it — "a caller-supplied grouping
/// indicating textual coordination (e.g. 'A, B and C')" (GLOSSARY).
#[derive(Debug, Clone, Default)]
pub struct CoordinateIndex {
    groups_by_name: HashMap<String, Vec<HashSet<String>>>,
}

impl CoordinateIndex {
    pub fn build(groups: &[Vec<String>]) -> Self {
        let normalized_groups: Vec<HashSet<String>> = groups
            .iter()
            .map(|g| g.iter().map(|n| normalize(n)).collect())
            .collect();

        let mut groups_by_name: HashMap<String, Vec<HashSet<String>>> = HashMap::new();
        for group in &normalized_groups {
            for name in group {
                groups_by_name
                    .entry(name.clone())
                    .or_default()
                    .push(group.clone());
            }
        }
        CoordinateIndex { groups_by_name }
    }

    /// `coord(B)` restricted to `b_entity_names`: the subset of `B`'s
    /// entity names that co-occur, in some coordinate group, with at
    /// least one *other* member present in `l_entity_names`.
    pub fn coordinate_subset(
        &self,
        b_entity_names: &HashSet<String>,
        l_entity_names: &HashSet<String>,
    ) -> HashSet<String> {
        b_entity_names
            .iter()
            .filter(|name| {
                self.groups_by_name
                    .get(*name)
                    .map(|groups| {
                        groups.iter().any(|group| {
                            group
                                .iter()
                                .any(|other| other != *name && l_entity_names.contains(other))
                        })
                    })
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_subset_requires_another_member_present() {
        let idx = CoordinateIndex::build(&[vec![
            "Los Angeles".into(),
            "New York".into(),
            "Philadelphia".into(),
        ]]);
        let b_names: HashSet<String> = ["los angeles".to_string()].into_iter().collect();
        let l_with_sibling: HashSet<String> = ["new york".to_string()].into_iter().collect();
        let l_without_sibling: HashSet<String> = ["rate".to_string()].into_iter().collect();

        assert_eq!(
            idx.coordinate_subset(&b_names, &l_with_sibling),
            b_names.clone()
        );
        assert!(idx.coordinate_subset(&b_names, &l_without_sibling).is_empty());
    }
}
