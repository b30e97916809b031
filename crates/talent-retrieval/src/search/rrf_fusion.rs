//! Reciprocal Rank Fusion: score = Σ 1/(k + rank + 1), rank 0-based.
//!
//! Fuses the vector and keyword rankings by position only, so the
//! unbounded keyword score and the bounded vector score are never mixed.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use talent_core::models::{CandidateId, FusedCandidate, RetrievalMethod, ScoredCandidate};

pub struct FusionEngine {
    k: u32,
}

/// Which input list a ranking came from.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Source {
    Vector,
    Keyword,
}

impl FusionEngine {
    pub fn new(k: u32) -> Self {
        Self { k }
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    /// Fuse a vector-ranked and a keyword-ranked list.
    ///
    /// Candidates in both lists accumulate both terms and are tagged
    /// `Hybrid`. Sub-scores are element-wise maxima over the contributing
    /// lists. The match score is the vector composite whenever the candidate
    /// was found by vector search; only keyword-only candidates carry their
    /// clamped keyword score. Output is ordered by fused score descending,
    /// ties by ascending candidate id. A candidate repeated within one list
    /// counts once, at its best rank.
    pub fn fuse(
        &self,
        vector: &[ScoredCandidate],
        keyword: &[ScoredCandidate],
    ) -> Vec<FusedCandidate> {
        let mut fused: BTreeMap<CandidateId, FusedCandidate> = BTreeMap::new();

        for (source, list) in [(Source::Vector, vector), (Source::Keyword, keyword)] {
            for (rank, scored) in list.iter().enumerate() {
                let contribution = 1.0 / (self.k as f64 + rank as f64 + 1.0);
                let entry = fused.entry(scored.id()).or_insert_with(|| FusedCandidate {
                    scored: scored.clone(),
                    rrf_score: 0.0,
                    vector_rank: None,
                    keyword_rank: None,
                });

                let slot = match source {
                    Source::Vector => &mut entry.vector_rank,
                    Source::Keyword => &mut entry.keyword_rank,
                };
                if slot.is_some() {
                    continue;
                }
                *slot = Some(rank);
                entry.rrf_score += contribution;

                // Vector hits are inserted first, so a keyword hit never
                // overrides the vector composite.
                let best = &mut entry.scored;
                best.sub_scores = best.sub_scores.max(&scored.sub_scores);
            }
        }

        let mut out: Vec<FusedCandidate> = fused
            .into_values()
            .map(|mut c| {
                if c.vector_rank.is_some() && c.keyword_rank.is_some() {
                    c.scored.method = RetrievalMethod::Hybrid;
                }
                c
            })
            .collect();

        out.sort_by(|a, b| {
            b.rrf_score
                .partial_cmp(&a.rrf_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id().cmp(&b.id()))
        });
        out
    }
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self::new(talent_core::config::defaults::DEFAULT_RRF_K)
    }
}
