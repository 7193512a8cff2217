//! The mutable working record, `ExtendedLocation` (§3.3).
//!
//! Wraps a [`Location`] with the scoring state the pipeline mutates in
//! place: candidate provenance, resolved parents, the evolving `score`,
//! and the three boost slots used to keep the parent/child/sibling
//! channels from double-counting each other (§4.6, §9).
//!
//! The spec's design note suggests an arena-with-indices model for the
//! mutable working graph; this crate instead keys a `HashMap<String,
//! ExtendedLocation>` by location ID (see `pipeline::WorkingSet`), which
//! gives the same single-owner, in-place-mutation property without
//! needing unsafe code, at the cost of cloning `Location` into every
//! `ExtendedLocation` and into every `parents` entry.

use crate::candidate::CandidateEntity;
use crate::location::Location;
use std::collections::{HashMap, HashSet};

/// Per-entity boost contributions recorded by relation, so the same
/// entity's contribution on one relation can be read back while computing
/// another (see §4.6's "reconcile against" lists).
#[derive(Debug, Clone, Default)]
pub struct Boost {
    pub parents: HashMap<String, f64>,
    pub children: HashMap<String, f64>,
    pub brothers: HashMap<String, f64>,
}

impl Boost {
    pub fn slot(&self, relation: Relation) -> &HashMap<String, f64> {
        match relation {
            Relation::Parents => &self.parents,
            Relation::Children => &self.children,
            Relation::Brothers => &self.brothers,
        }
    }

    pub fn slot_mut(&mut self, relation: Relation) -> &mut HashMap<String, f64> {
        match relation {
            Relation::Parents => &mut self.parents,
            Relation::Children => &mut self.children,
            Relation::Brothers => &mut self.brothers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Parents,
    Children,
    Brothers,
}

#[derive(Debug, Clone)]
pub struct ExtendedLocation {
    pub location: Location,
    pub candidate_entities: Vec<CandidateEntity>,
    pub parents: Vec<Location>,
    pub init_score: f64,
    pub score: f64,
    pub confidence: f64,
    pub score_deviation: f64,
    pub confidence_deviation: f64,
    pub country_strength: f64,
    pub assigned_mentions: Vec<String>,
    pub boost: Boost,
}

impl ExtendedLocation {
    pub fn new(location: Location, parents: Vec<Location>, candidate_entities: Vec<CandidateEntity>) -> Self {
        let init_score = mean(candidate_entities.iter().map(|e| e.score));
        ExtendedLocation {
            location,
            candidate_entities,
            parents,
            init_score,
            score: init_score,
            confidence: 0.0,
            score_deviation: 0.0,
            confidence_deviation: 0.0,
            country_strength: 0.0,
            assigned_mentions: Vec::new(),
            boost: Boost::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.location.id
    }

    /// The set of still-surviving candidate entities' normalized names.
    pub fn entity_names(&self) -> HashSet<String> {
        self.candidate_entities.iter().map(|e| e.norm_name()).collect()
    }

    /// `S.entriesExcept(X)`: `(name, score)` pairs for every surviving
    /// entity not in `exclude`, where `score` is that entity's own
    /// semantic score (not this location's aggregated `score`).
    pub fn entries_except(&self, exclude: &HashSet<String>) -> Vec<(String, f64)> {
        self.candidate_entities
            .iter()
            .filter(|e| !exclude.contains(&e.norm_name()))
            .map(|e| (e.norm_name(), e.score))
            .collect()
    }

    /// Removes a candidate entity by normalized name, used during
    /// ambiguity resolution (§4.4).
    pub fn remove_entity(&mut self, norm_name: &str) {
        self.candidate_entities.retain(|e| e.norm_name() != norm_name);
    }

    pub fn has_entities(&self) -> bool {
        !self.candidate_entities.is_empty()
    }

    pub fn dominance_key(&self) -> (u8, Option<i64>) {
        (self.location.dominance_tier(), self.location.population)
    }
}

impl PartialEq for ExtendedLocation {
    fn eq(&self, other: &Self) -> bool {
        self.location.id == other.location.id
    }
}
impl Eq for ExtendedLocation {}

pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
