use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candidate::CandidateId;
use super::query::QueryId;
use super::ranked::{Degradation, RankedResult};
use super::scored::RetrievalMethod;
use crate::constants::{MAX_FEEDBACK_RATING, MIN_FEEDBACK_RATING};
use crate::errors::{TalentError, TalentResult, TelemetryError};

/// Heuristic class of a job description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Technical,
    Experience,
    Location,
    General,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Experience => "experience",
            Self::Location => "location",
            Self::General => "general",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "technical" => Self::Technical,
            "experience" => Self::Experience,
            "location" => Self::Location,
            _ => Self::General,
        }
    }
}

/// Retrieval-quality measurements for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub diversity: f64,
    pub context_relevancy: f64,
    pub average_match_score: f64,
    pub top_result_score: f64,
}

/// A user's judgement of a search, attached after the fact.
///
/// Deserialization applies the same rating check as [`UserFeedback::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeedbackRecord")]
pub struct UserFeedback {
    rating: u8,
    relevant: BTreeSet<CandidateId>,
    irrelevant: BTreeSet<CandidateId>,
    comment: Option<String>,
    user_id: Option<String>,
    submitted_at: DateTime<Utc>,
}

/// Unchecked wire shape of [`UserFeedback`].
#[derive(Deserialize)]
struct FeedbackRecord {
    rating: u8,
    #[serde(default)]
    relevant: BTreeSet<CandidateId>,
    #[serde(default)]
    irrelevant: BTreeSet<CandidateId>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    submitted_at: DateTime<Utc>,
}

impl TryFrom<FeedbackRecord> for UserFeedback {
    type Error = TalentError;

    fn try_from(r: FeedbackRecord) -> TalentResult<Self> {
        check_rating(r.rating)?;
        Ok(Self {
            rating: r.rating,
            relevant: r.relevant,
            irrelevant: r.irrelevant,
            comment: r.comment,
            user_id: r.user_id,
            submitted_at: r.submitted_at,
        })
    }
}

fn check_rating(rating: u8) -> TalentResult<()> {
    if (MIN_FEEDBACK_RATING..=MAX_FEEDBACK_RATING).contains(&rating) {
        return Ok(());
    }
    Err(TelemetryError::InvalidFeedback {
        reason: format!("rating {rating} outside {MIN_FEEDBACK_RATING}..={MAX_FEEDBACK_RATING}"),
    }
    .into())
}

impl UserFeedback {
    /// Rating must be within 1..=5.
    pub fn new(
        rating: u8,
        relevant: impl IntoIterator<Item = CandidateId>,
        irrelevant: impl IntoIterator<Item = CandidateId>,
        comment: Option<String>,
    ) -> TalentResult<Self> {
        check_rating(rating)?;
        Ok(Self {
            rating,
            relevant: relevant.into_iter().collect(),
            irrelevant: irrelevant.into_iter().collect(),
            comment: comment.filter(|c| !c.trim().is_empty()),
            user_id: None,
            submitted_at: Utc::now(),
        })
    }

    /// Attribute the feedback to a user. A blank id is ignored.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        self.user_id = Some(user_id).filter(|u| !u.trim().is_empty());
        self
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn relevant(&self) -> &BTreeSet<CandidateId> {
        &self.relevant
    }

    pub fn irrelevant(&self) -> &BTreeSet<CandidateId> {
        &self.irrelevant
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

/// Per-query telemetry record. Written once; updated only to attach feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMetrics {
    pub query_id: QueryId,
    pub query_text: String,
    pub query_type: QueryType,
    pub method: RetrievalMethod,
    pub result_count: usize,
    pub average_match_score: f64,
    pub top_match_score: f64,
    pub response_time_ms: u64,
    pub evaluation: Option<EvaluationMetrics>,
    pub feedback: Option<UserFeedback>,
    pub created_at: DateTime<Utc>,
}

/// Owned snapshot of a finished search handed to observers.
#[derive(Debug, Clone)]
pub struct CompletedSearch {
    pub query_id: QueryId,
    pub query_text: String,
    pub method: RetrievalMethod,
    pub response_time_ms: u64,
    pub results: Vec<RankedResult>,
    pub degradations: Vec<Degradation>,
    pub relevant: Option<BTreeSet<CandidateId>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_outside_range_is_rejected() {
        assert!(UserFeedback::new(0, [], [], None).is_err());
        assert!(UserFeedback::new(6, [], [], None).is_err());
        assert!(UserFeedback::new(5, [], [], None).is_ok());
    }

    #[test]
    fn feedback_dedupes_ids_and_drops_blank_comment() {
        let fb = UserFeedback::new(
            4,
            [CandidateId(2), CandidateId(2), CandidateId(1)],
            [],
            Some("  ".into()),
        )
        .unwrap();
        assert_eq!(fb.relevant().len(), 2);
        assert!(fb.comment().is_none());
    }

    #[test]
    fn feedback_carries_user_through_serde() {
        let fb = UserFeedback::new(4, [CandidateId(3)], [], None)
            .unwrap()
            .with_user("recruiter-17");
        let json = serde_json::to_value(&fb).unwrap();
        assert_eq!(json["user_id"], "recruiter-17");
        let back: UserFeedback = serde_json::from_value(json).unwrap();
        assert_eq!(back, fb);
        assert!(UserFeedback::new(4, [], [], None).unwrap().with_user(" ").user_id().is_none());
    }

    #[test]
    fn deserialized_rating_is_validated() {
        let mut json = serde_json::to_value(UserFeedback::new(3, [], [], None).unwrap()).unwrap();
        json["rating"] = serde_json::json!(9);
        let err = serde_json::from_value::<UserFeedback>(json).unwrap_err();
        assert!(err.to_string().contains("rating 9"));

        // Records written before user ids existed still load.
        let legacy = serde_json::json!({
            "rating": 2,
            "relevant": [],
            "irrelevant": [],
            "comment": null,
            "submitted_at": "2026-01-05T10:00:00Z"
        });
        let fb: UserFeedback = serde_json::from_value(legacy).unwrap();
        assert_eq!(fb.rating(), 2);
        assert!(fb.user_id().is_none());
    }

    #[test]
    fn unknown_query_type_is_general() {
        assert_eq!(QueryType::parse("salary"), QueryType::General);
        assert_eq!(QueryType::parse(QueryType::Location.as_str()), QueryType::Location);
    }
}
