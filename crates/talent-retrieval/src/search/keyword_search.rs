//! Keyword search: boolean OR retrieval with a heuristic indicator score.
//!
//! The raw score is unbounded (one skill weight per matched skill). It is
//! kept on the hit for diagnostics and clamped to [0, 1] on the scored
//! candidate, which only ever feeds rank-based fusion.

use std::sync::Arc;

use talent_core::config::{KeywordConfig, SearchConfig};
use talent_core::errors::TalentResult;
use talent_core::models::{
    CandidateRecord, FilterExpr, KeywordHit, KeywordQuery, RetrievalMethod, ScoredCandidate,
    SearchQuery, SubScores,
};
use talent_core::traits::ICandidateStore;
use tracing::debug;

use super::keywords;

pub struct KeywordSearchEngine {
    store: Arc<dyn ICandidateStore>,
    config: KeywordConfig,
    pool_size: usize,
}

impl KeywordSearchEngine {
    pub fn new(store: Arc<dyn ICandidateStore>, config: &SearchConfig) -> Self {
        Self {
            store,
            config: config.keyword.clone(),
            pool_size: config.field_pool_size,
        }
    }

    /// Extract informative tokens and recognised skills from a job description.
    pub fn extract(&self, job_description: &str) -> KeywordQuery {
        KeywordQuery {
            tokens: keywords::informative_tokens(
                job_description,
                self.config.min_keyword_len,
                self.config.max_keywords,
            ),
            skill_tokens: keywords::skill_tokens(job_description),
        }
    }

    pub fn search(&self, query: &SearchQuery, limit: usize) -> TalentResult<Vec<KeywordHit>> {
        let keyword_query = self.extract(query.job_description());
        self.search_keywords(&keyword_query, &query.filters().to_expr(), limit)
    }

    /// Score store matches for an extracted query. An empty query yields no
    /// hits without touching the store.
    pub fn search_keywords(
        &self,
        keyword_query: &KeywordQuery,
        filter: &FilterExpr,
        limit: usize,
    ) -> TalentResult<Vec<KeywordHit>> {
        if keyword_query.is_empty() {
            debug!("no keywords extracted, skipping keyword search");
            return Ok(Vec::new());
        }

        let matches =
            self.store
                .query_by_keyword(keyword_query, filter, self.pool_size.max(limit))?;

        let mut hits: Vec<KeywordHit> = matches
            .into_iter()
            .map(|candidate| self.score(keyword_query, candidate))
            .collect();

        hits.sort_by(|a, b| {
            b.raw_score
                .partial_cmp(&a.raw_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.scored.id().cmp(&b.scored.id()))
        });
        hits.truncate(limit);

        debug!(
            tokens = keyword_query.tokens.len(),
            skills = keyword_query.skill_tokens.len(),
            hits = hits.len(),
            "keyword search complete"
        );
        Ok(hits)
    }

    fn score(&self, keyword_query: &KeywordQuery, candidate: Arc<CandidateRecord>) -> KeywordHit {
        let title = candidate.title.to_lowercase();
        let summary = candidate.summary.as_deref().unwrap_or("").to_lowercase();

        let mut matched_terms = Vec::new();
        let mut in_title = false;
        let mut in_summary = false;
        for token in &keyword_query.tokens {
            let t = title.contains(token.as_str());
            let s = summary.contains(token.as_str());
            in_title |= t;
            in_summary |= s;
            if t || s {
                matched_terms.push(token.clone());
            }
        }

        let matched_skills: Vec<String> = keyword_query
            .skill_tokens
            .iter()
            .filter(|s| candidate.has_skill(s))
            .cloned()
            .collect();

        let mut raw_score = matched_skills.len() as f64 * self.config.skill_weight;
        if in_title {
            raw_score += self.config.title_weight;
        }
        if in_summary {
            raw_score += self.config.summary_weight;
        }
        let clamped = raw_score.clamp(0.0, 1.0);

        KeywordHit {
            scored: ScoredCandidate {
                candidate,
                sub_scores: SubScores {
                    keyword: clamped,
                    ..SubScores::default()
                },
                match_score: clamped,
                method: RetrievalMethod::Keyword,
            },
            raw_score,
            matched_terms,
            matched_skills,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talent_core::models::CandidateId;
    use talent_storage::MemoryCandidateStore;

    fn record(id: u64, title: &str, summary: Option<&str>, skills: &[&str]) -> CandidateRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Candidate {id}"),
            "title": title,
            "summary": summary,
            "skills": skills,
        }))
        .unwrap()
    }

    fn engine() -> KeywordSearchEngine {
        let store = MemoryCandidateStore::new(vec![
            record(
                1,
                "Senior Frontend Engineer",
                Some("Builds React apps on AWS."),
                &["React", "AWS", "TypeScript"],
            ),
            record(2, "Junior Developer", Some("Learning React."), &["React"]),
            record(3, "Accountant", None, &["Excel"]),
        ]);
        KeywordSearchEngine::new(Arc::new(store), &SearchConfig::default())
    }

    #[test]
    fn scores_follow_indicator_weights() {
        let e = engine();
        let q = SearchQuery::new("Senior React developer with AWS experience").unwrap();
        let hits = e.search(&q, 10).unwrap();
        let ids: Vec<CandidateId> = hits.iter().map(|h| h.scored.id()).collect();
        assert_eq!(ids, vec![CandidateId(1), CandidateId(2)]);

        // title "senior" + summary "react" + two skills
        assert!((hits[0].raw_score - 1.3).abs() < 1e-9);
        assert_eq!(hits[0].scored.match_score, 1.0);
        assert_eq!(hits[0].matched_skills, vec!["React", "AWS"]);

        // title "developer" + summary "react" + one skill
        assert!((hits[1].raw_score - 0.9).abs() < 1e-9);
        assert!((hits[1].scored.sub_scores.keyword - 0.9).abs() < 1e-9);
        assert_eq!(hits[1].scored.method, RetrievalMethod::Keyword);
    }

    #[test]
    fn no_extractable_keywords_returns_empty() {
        let e = engine();
        let q = SearchQuery::new("Looking for someone with strong experience").unwrap();
        assert!(e.extract(q.job_description()).is_empty());
        assert!(e.search(&q, 10).unwrap().is_empty());
    }

    #[test]
    fn filter_is_applied() {
        let e = engine();
        let q = SearchQuery::new("React").unwrap();
        let hits = e
            .search_keywords(
                &e.extract(q.job_description()),
                &FilterExpr::HasSkill("typescript".into()),
                10,
            )
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].scored.id(), CandidateId(1));
    }

    #[test]
    fn limit_applies_after_scoring() {
        let e = engine();
        let q = SearchQuery::new("React AWS").unwrap();
        let hits = e.search(&q, 1).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].scored.id(), CandidateId(1));
    }
}
