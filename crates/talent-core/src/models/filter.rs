//! Typed filter predicates composed as a tree.
//!
//! Evaluated directly against records by in-memory stores and compiled
//! once to SQL by relational stores.

use serde::{Deserialize, Serialize};

use super::candidate::{CandidateRecord, EmbeddingField, RemotePreference};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum FilterExpr {
    /// Matches every candidate.
    Always,
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
    /// Inclusive years-of-experience bounds.
    ExperienceRange { min: f64, max: f64 },
    /// Case-insensitive substring of the location.
    LocationContains(String),
    RemotePreferred,
    /// Case-insensitive exact skill membership.
    HasSkill(String),
    HasEmbedding(EmbeddingField),
}

impl FilterExpr {
    /// Conjunction that collapses trivial cases.
    pub fn all(clauses: Vec<FilterExpr>) -> FilterExpr {
        let mut clauses: Vec<FilterExpr> = clauses
            .into_iter()
            .filter(|c| !c.is_always())
            .collect();
        match clauses.len() {
            0 => FilterExpr::Always,
            1 => clauses.remove(0),
            _ => FilterExpr::And(clauses),
        }
    }

    pub fn is_always(&self) -> bool {
        matches!(self, FilterExpr::Always)
    }

    /// Evaluate against a record. An empty `And` is true; an empty `Or` is false.
    pub fn matches(&self, candidate: &CandidateRecord) -> bool {
        match self {
            FilterExpr::Always => true,
            FilterExpr::And(clauses) => clauses.iter().all(|c| c.matches(candidate)),
            FilterExpr::Or(clauses) => clauses.iter().any(|c| c.matches(candidate)),
            FilterExpr::ExperienceRange { min, max } => {
                (*min..=*max).contains(&candidate.years_experience)
            }
            FilterExpr::LocationContains(needle) => candidate
                .location
                .as_deref()
                .is_some_and(|loc| loc.to_lowercase().contains(&needle.to_lowercase())),
            FilterExpr::RemotePreferred => {
                candidate.remote_preference == RemotePreference::Remote
            }
            FilterExpr::HasSkill(skill) => candidate.has_skill(skill),
            FilterExpr::HasEmbedding(field) => candidate.embedding(*field).is_some(),
        }
    }
}
