use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candidate::{CandidateId, EmbeddingField};
use crate::constants::CHARS_PER_TOKEN;

/// Kind of evidence a chunk carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkType {
    Profile,
    Skills,
    Experience,
    Resume,
}

impl ChunkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Resume => "resume",
        }
    }

    /// Embedding field whose similarity seeds this chunk's relevance.
    pub fn field(&self) -> EmbeddingField {
        match self {
            Self::Profile => EmbeddingField::Profile,
            Self::Skills => EmbeddingField::Skills,
            Self::Experience => EmbeddingField::Experience,
            Self::Resume => EmbeddingField::Resume,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Record field the text was built from.
    pub source: String,
    /// Length of the content in characters.
    pub size: usize,
    pub created_at: DateTime<Utc>,
}

/// A typed fragment of candidate evidence. Lives for one request only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextChunk {
    /// `{candidate_id}-{chunk_type}`.
    pub id: String,
    pub candidate_id: CandidateId,
    pub chunk_type: ChunkType,
    pub content: String,
    pub relevance: f64,
    pub metadata: ChunkMetadata,
}

impl ContextChunk {
    pub fn new(
        candidate_id: CandidateId,
        chunk_type: ChunkType,
        content: String,
        relevance: f64,
        source: &str,
    ) -> Self {
        let size = content.chars().count();
        Self {
            id: format!("{candidate_id}-{}", chunk_type.as_str()),
            candidate_id,
            chunk_type,
            content,
            relevance,
            metadata: ChunkMetadata {
                source: source.to_string(),
                size,
                created_at: Utc::now(),
            },
        }
    }

    /// Rough token estimate: one token per four characters, rounded up.
    pub fn estimated_tokens(&self) -> usize {
        self.metadata.size.div_ceil(CHARS_PER_TOKEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_id_and_size() {
        let c = ContextChunk::new(
            CandidateId(42),
            ChunkType::Skills,
            "Technical Skills: Rust".into(),
            0.7,
            "skills",
        );
        assert_eq!(c.id, "42-skills");
        assert_eq!(c.metadata.size, 22);
        assert_eq!(c.estimated_tokens(), 6);
    }
}
