use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::candidate::{CandidateId, CandidateRecord, EmbeddingField};
use crate::config::defaults;
use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::errors::{TalentError, TalentResult};

/// Which retrieval path produced a scored candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMethod {
    Vector,
    Keyword,
    Hybrid,
}

impl RetrievalMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::Keyword => "keyword",
            Self::Hybrid => "hybrid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "vector" => Some(Self::Vector),
            "keyword" => Some(Self::Keyword),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }
}

/// Per-field similarities plus the clamped keyword score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub profile: f64,
    pub skills: f64,
    pub experience: f64,
    pub resume: f64,
    pub keyword: f64,
}

impl SubScores {
    pub fn field(&self, field: EmbeddingField) -> f64 {
        match field {
            EmbeddingField::Profile => self.profile,
            EmbeddingField::Skills => self.skills,
            EmbeddingField::Experience => self.experience,
            EmbeddingField::Resume => self.resume,
        }
    }

    pub fn set_field(&mut self, field: EmbeddingField, value: f64) {
        match field {
            EmbeddingField::Profile => self.profile = value,
            EmbeddingField::Skills => self.skills = value,
            EmbeddingField::Experience => self.experience = value,
            EmbeddingField::Resume => self.resume = value,
        }
    }

    /// Element-wise maximum.
    pub fn max(&self, other: &SubScores) -> SubScores {
        SubScores {
            profile: self.profile.max(other.profile),
            skills: self.skills.max(other.skills),
            experience: self.experience.max(other.experience),
            resume: self.resume.max(other.resume),
            keyword: self.keyword.max(other.keyword),
        }
    }
}

/// Weights for the composite vector score. Must form a convex combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub profile: f64,
    pub skills: f64,
    pub experience: f64,
    pub resume: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            profile: defaults::DEFAULT_PROFILE_WEIGHT,
            skills: defaults::DEFAULT_SKILLS_WEIGHT,
            experience: defaults::DEFAULT_EXPERIENCE_WEIGHT,
            resume: defaults::DEFAULT_RESUME_WEIGHT,
        }
    }
}

impl FieldWeights {
    pub fn weight(&self, field: EmbeddingField) -> f64 {
        match field {
            EmbeddingField::Profile => self.profile,
            EmbeddingField::Skills => self.skills,
            EmbeddingField::Experience => self.experience,
            EmbeddingField::Resume => self.resume,
        }
    }

    pub fn sum(&self) -> f64 {
        self.profile + self.skills + self.experience + self.resume
    }

    pub fn is_convex(&self) -> bool {
        EmbeddingField::ALL.iter().all(|f| self.weight(*f) >= 0.0)
            && (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    pub fn validate(&self) -> TalentResult<()> {
        if self.is_convex() {
            Ok(())
        } else {
            Err(TalentError::ValidationError(format!(
                "field weights must be non-negative and sum to 1.0, got sum {:.6}",
                self.sum()
            )))
        }
    }

    /// Weighted sum of the field similarities, clamped to [0, 1].
    pub fn composite(&self, scores: &SubScores) -> f64 {
        EmbeddingField::ALL
            .iter()
            .map(|f| self.weight(*f) * scores.field(*f))
            .sum::<f64>()
            .clamp(0.0, 1.0)
    }
}

/// A candidate with its sub-scores and composite match score in [0, 1].
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub candidate: Arc<CandidateRecord>,
    pub sub_scores: SubScores,
    pub match_score: f64,
    pub method: RetrievalMethod,
}

impl ScoredCandidate {
    pub fn id(&self) -> CandidateId {
        self.candidate.id
    }

    /// Descending by match score, ties by ascending id.
    pub fn rank_order(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id().cmp(&b.id()))
    }
}

/// A keyword-engine match. `raw_score` is unbounded; the scored form is clamped.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordHit {
    pub scored: ScoredCandidate,
    pub raw_score: f64,
    pub matched_terms: Vec<String>,
    pub matched_skills: Vec<String>,
}

/// A candidate after reciprocal rank fusion.
#[derive(Debug, Clone, Serialize)]
pub struct FusedCandidate {
    /// Sub-scores and match score are element-wise maxima over contributing lists.
    pub scored: ScoredCandidate,
    pub rrf_score: f64,
    pub vector_rank: Option<usize>,
    pub keyword_rank: Option<usize>,
}

impl FusedCandidate {
    pub fn id(&self) -> CandidateId {
        self.scored.id()
    }
}
