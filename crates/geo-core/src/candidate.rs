//! Caller-supplied candidate mentions (§3.2).

use crate::text::normalize;

/// A candidate mention from the text, already scored for "is this a
/// location?" by an upstream NER step (out of scope for this crate).
#[derive(Debug, Clone)]
pub struct CandidateEntity {
    pub name: String,
    /// Semantic confidence in `[0, 1]`.
    pub score: f64,
}

impl CandidateEntity {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// `lower(trim(name))`. Equality and hashing of candidates use this,
    /// not `name`.
    pub fn norm_name(&self) -> String {
        normalize(&self.name)
    }
}

impl PartialEq for CandidateEntity {
    fn eq(&self, other: &Self) -> bool {
        self.norm_name() == other.norm_name()
    }
}
impl Eq for CandidateEntity {}

impl std::hash::Hash for CandidateEntity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.norm_name().hash(state);
    }
}
