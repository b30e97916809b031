//! LLM reranking over fused candidates.
//!
//! Each candidate is scored independently; a failure for one candidate
//! falls back to its match score and never fails the batch. Output is
//! stable-sorted by rerank score, so ties keep the fused order. When no
//! candidate received a model score the fused order is kept as is.

use std::sync::Arc;

use rayon::prelude::*;
use talent_core::config::RerankConfig;
use talent_core::constants::RERANK_FALLBACK_EXPLANATION;
use talent_core::errors::{RerankError, TalentResult};
use talent_core::models::{
    CandidateRecord, ContextChunk, Degradation, FusedCandidate, MatchQuality, RankedResult,
    RerankSource,
};
use talent_core::traits::IRerankerModel;
use tracing::{debug, warn};

use super::parser::{parse_reply, RerankReply};
use super::prompt;

const SKIPPED_EXPLANATION: &str = "Ranked by retrieval match score.";

pub struct Reranker {
    model: Option<Arc<dyn IRerankerModel>>,
    config: RerankConfig,
}

impl Reranker {
    pub fn new(model: Option<Arc<dyn IRerankerModel>>, config: &RerankConfig) -> Self {
        Self {
            model,
            config: config.clone(),
        }
    }

    /// The model to call, if reranking is enabled and one was supplied.
    fn active_model(&self) -> Option<&Arc<dyn IRerankerModel>> {
        self.model.as_ref().filter(|_| self.config.enabled)
    }

    /// One model round-trip for one candidate.
    pub fn score_candidate(
        &self,
        job_description: &str,
        chunks: &[ContextChunk],
    ) -> TalentResult<RerankReply> {
        let model = self.active_model().ok_or_else(|| RerankError::Provider {
            reason: "no reranker model configured".to_string(),
        })?;
        let reply = model.score(&prompt::rerank_prompt(job_description, chunks))?;
        parse_reply(&reply)
    }

    /// Rerank fused candidates with their chunks and keep the top `top_k`.
    ///
    /// Returns a degradation record when any candidate fell back.
    pub fn rerank(
        &self,
        job_description: &str,
        candidates: Vec<(FusedCandidate, Vec<ContextChunk>)>,
        top_k: usize,
    ) -> (Vec<RankedResult>, Option<Degradation>) {
        let total = candidates.len();

        let mut results: Vec<(RankedResult, Option<String>)> = if self.active_model().is_some() {
            candidates
                .into_par_iter()
                .map(|(fused, chunks)| match self.score_candidate(job_description, &chunks) {
                    Ok(reply) => (
                        ranked(fused, chunks, reply.score, reply.explanation, RerankSource::Model),
                        None,
                    ),
                    Err(e) => {
                        warn!(candidate = %fused.id(), error = %e, "rerank failed, using match score");
                        let score = fused.scored.match_score;
                        (
                            ranked(
                                fused,
                                chunks,
                                score,
                                RERANK_FALLBACK_EXPLANATION.to_string(),
                                RerankSource::Fallback,
                            ),
                            Some(e.to_string()),
                        )
                    }
                })
                .collect()
        } else {
            candidates
                .into_iter()
                .map(|(fused, chunks)| {
                    let score = fused.scored.match_score;
                    (
                        ranked(
                            fused,
                            chunks,
                            score,
                            SKIPPED_EXPLANATION.to_string(),
                            RerankSource::Skipped,
                        ),
                        None,
                    )
                })
                .collect()
        };

        let failures: Vec<String> = results.iter().filter_map(|(_, e)| e.clone()).collect();
        let degradation = failures.first().map(|first| Degradation {
            component: "reranker".to_string(),
            failure: format!("{} of {total} candidates: {first}", failures.len()),
            fallback: "match score".to_string(),
        });

        // Without a single model score, sorting by match score would rank
        // keyword-only hits against vector composites.
        if results.iter().any(|(r, _)| r.source == RerankSource::Model) {
            results.sort_by(|(a, _), (b, _)| {
                b.rerank_score
                    .partial_cmp(&a.rerank_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        let mut out: Vec<RankedResult> = results.into_iter().map(|(r, _)| r).collect();
        out.truncate(top_k);

        debug!(
            candidates = total,
            kept = out.len(),
            fallbacks = failures.len(),
            "rerank complete"
        );
        (out, degradation)
    }

    /// Short natural-language summary of why a candidate fits.
    ///
    /// Uses up to `summary_max_chunks` chunks above the relevance threshold.
    /// Falls back to a fixed template when the model is unavailable, fails,
    /// or replies with nothing.
    pub fn enhanced_summary(
        &self,
        job_description: &str,
        candidate: &CandidateRecord,
        chunks: &[ContextChunk],
    ) -> String {
        let Some(model) = self.active_model() else {
            return template_summary(candidate);
        };

        let mut relevant: Vec<ContextChunk> = chunks
            .iter()
            .filter(|c| c.relevance > self.config.summary_relevance_threshold)
            .cloned()
            .collect();
        relevant.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        relevant.truncate(self.config.summary_max_chunks);

        match model.score(&prompt::summary_prompt(job_description, &relevant)) {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => template_summary(candidate),
            Err(e) => {
                warn!(candidate = %candidate.id, error = %e, "summary generation failed");
                template_summary(candidate)
            }
        }
    }
}

fn ranked(
    fused: FusedCandidate,
    chunks: Vec<ContextChunk>,
    rerank_score: f64,
    explanation: String,
    source: RerankSource,
) -> RankedResult {
    RankedResult {
        scored: fused.scored,
        rrf_score: Some(fused.rrf_score),
        chunks,
        rerank_score,
        explanation,
        source,
        match_quality: MatchQuality::from_score(rerank_score),
    }
}

fn template_summary(c: &CandidateRecord) -> String {
    format!(
        "{} - {} at {} ({} years experience)",
        c.name,
        c.title,
        c.company_or_unknown(),
        c.years_experience
    )
}
