use std::fmt;

use serde::{Deserialize, Serialize};

use super::candidate::CandidateRecord;
use super::filter::FilterExpr;
use crate::config::defaults;
use crate::errors::{SearchError, TalentResult};

/// Identifier linking a search to its telemetry and feedback.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryId(pub String);

impl QueryId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QueryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Seniority band with the years-of-experience range it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Lead,
    Executive,
}

impl ExperienceLevel {
    /// Parse a free-form label. Unknown labels yield `None` and apply no filter.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "junior" | "entry-level" | "entry level" => Some(Self::Junior),
            "mid" | "mid-level" | "mid level" | "intermediate" => Some(Self::Mid),
            "senior" => Some(Self::Senior),
            "lead" | "principal" | "staff" => Some(Self::Lead),
            "executive" | "director" => Some(Self::Executive),
            _ => None,
        }
    }

    /// Inclusive years-of-experience range.
    pub fn years_range(&self) -> (f64, f64) {
        match self {
            Self::Junior => (0.0, 2.0),
            Self::Mid => (2.0, 5.0),
            Self::Senior => (5.0, 10.0),
            Self::Lead => (8.0, 20.0),
            Self::Executive => (10.0, 30.0),
        }
    }
}

/// Optional filters attached to a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    /// Seniority label such as "senior" or "entry-level".
    pub experience_level: Option<String>,
    pub min_years: Option<f64>,
    pub max_years: Option<f64>,
    /// Candidate must list at least one of these skills.
    pub required_skills: Vec<String>,
    /// Case-insensitive substring of the candidate location.
    pub location: Option<String>,
    /// Remote candidates satisfy a location filter. Defaults to true.
    pub include_remote: Option<bool>,
}

impl SearchFilters {
    /// Compose the filters into a predicate tree.
    ///
    /// Explicit `min_years`/`max_years` override the bounds implied by
    /// `experience_level`.
    pub fn to_expr(&self) -> FilterExpr {
        let mut clauses = Vec::new();

        let band = self
            .experience_level
            .as_deref()
            .and_then(ExperienceLevel::parse)
            .map(|l| l.years_range());
        let min = self.min_years.or(band.map(|b| b.0));
        let max = self.max_years.or(band.map(|b| b.1));
        if min.is_some() || max.is_some() {
            clauses.push(FilterExpr::ExperienceRange {
                min: min.unwrap_or(0.0),
                max: max.unwrap_or(f64::MAX),
            });
        }

        if let Some(loc) = self.location.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            let contains = FilterExpr::LocationContains(loc.to_string());
            if self.include_remote.unwrap_or(defaults::DEFAULT_INCLUDE_REMOTE) {
                clauses.push(FilterExpr::Or(vec![contains, FilterExpr::RemotePreferred]));
            } else {
                clauses.push(contains);
            }
        }

        let skills: Vec<FilterExpr> = self
            .required_skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| FilterExpr::HasSkill(s.to_string()))
            .collect();
        if !skills.is_empty() {
            clauses.push(FilterExpr::Or(skills));
        }

        FilterExpr::all(clauses)
    }
}

/// Raw, unvalidated search criteria as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub job_description: String,
    pub filters: SearchFilters,
    pub max_results: Option<usize>,
    pub hybrid: Option<bool>,
}

impl SearchRequest {
    pub fn new(job_description: impl Into<String>) -> Self {
        Self {
            job_description: job_description.into(),
            ..Self::default()
        }
    }
}

/// A validated search. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    id: QueryId,
    job_description: String,
    filters: SearchFilters,
    max_results: Option<usize>,
    hybrid: Option<bool>,
}

impl SearchQuery {
    /// Validate a job description. Empty or whitespace-only text is rejected.
    pub fn new(job_description: impl Into<String>) -> TalentResult<Self> {
        Self::try_from(SearchRequest::new(job_description))
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn with_hybrid(mut self, hybrid: bool) -> Self {
        self.hybrid = Some(hybrid);
        self
    }

    /// Pin the query id, e.g. to replay a logged search.
    pub fn with_id(mut self, id: QueryId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> &QueryId {
        &self.id
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    /// Result cap, falling back to `default` when unset or zero.
    pub fn max_results_or(&self, default: usize) -> usize {
        self.max_results.filter(|n| *n > 0).unwrap_or(default)
    }

    pub fn hybrid_or(&self, default: bool) -> bool {
        self.hybrid.unwrap_or(default)
    }

    /// The criteria this query was built from.
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            job_description: self.job_description.clone(),
            filters: self.filters.clone(),
            max_results: self.max_results,
            hybrid: self.hybrid,
        }
    }
}

impl TryFrom<SearchRequest> for SearchQuery {
    type Error = crate::errors::TalentError;

    fn try_from(req: SearchRequest) -> TalentResult<Self> {
        let trimmed = req.job_description.trim();
        if trimmed.is_empty() {
            return Err(SearchError::InvalidQuery {
                reason: "job description is empty".to_string(),
            }
            .into());
        }
        Ok(Self {
            id: QueryId::generate(),
            job_description: trimmed.to_string(),
            filters: req.filters,
            max_results: req.max_results,
            hybrid: req.hybrid,
        })
    }
}

/// Tokens handed to the candidate store for boolean keyword matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordQuery {
    /// Lowercase informative tokens matched against title and summary.
    pub tokens: Vec<String>,
    /// Recognised skill names matched against the skill set.
    pub skill_tokens: Vec<String>,
}

impl KeywordQuery {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.skill_tokens.is_empty()
    }

    /// Boolean OR match: any token in title or summary, or any skill token
    /// in the candidate's skill set.
    pub fn matches(&self, candidate: &CandidateRecord) -> bool {
        let title = candidate.title.to_lowercase();
        let summary = candidate.summary.as_deref().unwrap_or("").to_lowercase();
        self.tokens
            .iter()
            .any(|t| title.contains(t.as_str()) || summary.contains(t.as_str()))
            || self.skill_tokens.iter().any(|s| candidate.has_skill(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_query_is_invalid() {
        let err = SearchQuery::new("   \n\t").unwrap_err();
        assert!(err.is_invalid_query());
    }

    #[test]
    fn query_text_is_trimmed_and_ids_are_unique() {
        let a = SearchQuery::new("  Rust engineer ").unwrap();
        let b = SearchQuery::new("Rust engineer").unwrap();
        assert_eq!(a.job_description(), "Rust engineer");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn experience_labels_map_to_bands() {
        assert_eq!(ExperienceLevel::parse("Entry-Level"), Some(ExperienceLevel::Junior));
        assert_eq!(ExperienceLevel::parse("staff").unwrap().years_range(), (8.0, 20.0));
        assert_eq!(ExperienceLevel::parse("wizard"), None);
    }

    #[test]
    fn empty_filters_compile_to_always() {
        assert_eq!(SearchFilters::default().to_expr(), FilterExpr::Always);
    }

    #[test]
    fn unknown_level_applies_no_range() {
        let filters = SearchFilters {
            experience_level: Some("wizard".into()),
            ..Default::default()
        };
        assert_eq!(filters.to_expr(), FilterExpr::Always);
    }

    #[test]
    fn explicit_years_override_band() {
        let filters = SearchFilters {
            experience_level: Some("senior".into()),
            min_years: Some(7.5),
            ..Default::default()
        };
        assert_eq!(
            filters.to_expr(),
            FilterExpr::ExperienceRange { min: 7.5, max: 10.0 }
        );
    }

    #[test]
    fn location_filter_admits_remote_unless_disabled() {
        let mut filters = SearchFilters {
            location: Some("Berlin".into()),
            ..Default::default()
        };
        assert_eq!(
            filters.to_expr(),
            FilterExpr::Or(vec![
                FilterExpr::LocationContains("Berlin".into()),
                FilterExpr::RemotePreferred,
            ])
        );
        filters.include_remote = Some(false);
        assert_eq!(
            filters.to_expr(),
            FilterExpr::LocationContains("Berlin".into())
        );
    }

    #[test]
    fn zero_max_results_falls_back_to_default() {
        let q = SearchQuery::new("x").unwrap().with_max_results(0);
        assert_eq!(q.max_results_or(10), 10);
    }
}
