//! Keyword heuristics that bucket a job description for analytics.

use talent_core::models::QueryType;

const TECHNICAL: &[&str] = &[
    "javascript", "python", "react", "node", "sql", "aws", "docker", "kubernetes", "java",
    "typescript", "angular", "vue", "spring", "django", "mongodb",
];

const EXPERIENCE: &[&str] = &[
    "senior", "junior", "lead", "principal", "years", "experience", "expert",
];

const LOCATION: &[&str] = &[
    "remote", "new york", "san francisco", "london", "berlin", "toronto", "location",
];

/// First matching bucket wins, checked technical, experience, then location.
/// Matching is case-insensitive substring containment.
pub fn classify_query(text: &str) -> QueryType {
    let lower = text.to_lowercase();
    let any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if any(TECHNICAL) {
        QueryType::Technical
    } else if any(EXPERIENCE) {
        QueryType::Experience
    } else if any(LOCATION) {
        QueryType::Location
    } else {
        QueryType::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn technical_beats_experience() {
        assert_eq!(
            classify_query("Senior React developer, 5 years"),
            QueryType::Technical
        );
    }

    #[test]
    fn buckets_in_priority_order() {
        assert_eq!(classify_query("Principal engineer"), QueryType::Experience);
        assert_eq!(classify_query("Designer based in Berlin"), QueryType::Location);
        assert_eq!(classify_query("Friendly office manager"), QueryType::General);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(classify_query("REMOTE role"), QueryType::Location);
    }
}
