//! Set-based retrieval metrics and result diversity.

use std::collections::{BTreeSet, HashSet};

use talent_core::models::{CandidateId, CandidateRecord};

const COMPANY_WEIGHT: f64 = 0.4;
const TITLE_WEIGHT: f64 = 0.4;
const LOCATION_WEIGHT: f64 = 0.2;

fn hits(retrieved: &[CandidateId], relevant: &BTreeSet<CandidateId>) -> usize {
    retrieved
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|id| relevant.contains(id))
        .count()
}

/// Fraction of retrieved candidates that are relevant. 0 when nothing was retrieved.
pub fn precision(retrieved: &[CandidateId], relevant: &BTreeSet<CandidateId>) -> f64 {
    if retrieved.is_empty() {
        return 0.0;
    }
    hits(retrieved, relevant) as f64 / retrieved.len() as f64
}

/// Fraction of relevant candidates that were retrieved. 1 when nothing is relevant.
pub fn recall(retrieved: &[CandidateId], relevant: &BTreeSet<CandidateId>) -> f64 {
    if relevant.is_empty() {
        return 1.0;
    }
    hits(retrieved, relevant) as f64 / relevant.len() as f64
}

/// Harmonic mean of precision and recall. 0 when both are 0.
pub fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall <= 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / (precision + recall)
}

/// Weighted distinct-value ratio over company, title, and location.
///
/// A missing company or location counts as one shared value. Zero or one
/// candidate is maximally diverse.
pub fn diversity(candidates: &[&CandidateRecord]) -> f64 {
    let n = candidates.len();
    if n <= 1 {
        return 1.0;
    }
    let ratio = |distinct: usize| distinct as f64 / n as f64;

    let companies: HashSet<Option<&str>> =
        candidates.iter().map(|c| c.company.as_deref()).collect();
    let titles: HashSet<&str> = candidates.iter().map(|c| c.title.as_str()).collect();
    let locations: HashSet<Option<&str>> =
        candidates.iter().map(|c| c.location.as_deref()).collect();

    COMPANY_WEIGHT * ratio(companies.len())
        + TITLE_WEIGHT * ratio(titles.len())
        + LOCATION_WEIGHT * ratio(locations.len())
}

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
