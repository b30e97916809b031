//! Parse the reranker model's `Score:` / `Explanation:` reply.

use std::sync::LazyLock;

use regex::Regex;
use talent_core::errors::{RerankError, TalentResult};

static RE_SCORE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)score:\s*([-+]?\d*\.?\d+)").ok());
static RE_EXPLANATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)explanation:\s*(.+)").ok());

#[derive(Debug, Clone, PartialEq)]
pub struct RerankReply {
    /// Clamped to [0, 1].
    pub score: f64,
    pub explanation: String,
}

/// Both fields must be present; either missing is a parse error.
pub fn parse_reply(reply: &str) -> TalentResult<RerankReply> {
    let score = capture(&RE_SCORE, reply)
        .ok_or_else(|| parse_error("missing Score field"))?
        .parse::<f64>()
        .map_err(|e| parse_error(&format!("bad score: {e}")))?;
    let explanation = capture(&RE_EXPLANATION, reply)
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| parse_error("missing Explanation field"))?;

    Ok(RerankReply {
        score: score.clamp(0.0, 1.0),
        explanation: explanation.to_string(),
    })
}

fn capture<'a>(regex: &LazyLock<Option<Regex>>, text: &'a str) -> Option<&'a str> {
    let re = regex.as_ref()?;
    re.captures(text)?.get(1).map(|m| m.as_str())
}

fn parse_error(reason: &str) -> talent_core::TalentError {
    RerankError::Parse {
        reason: reason.to_string(),
    }
    .into()
}
