//! Re-score chunks against the query and pack them into a token budget.

use rayon::prelude::*;
use talent_core::constants::{CONTEXT_FALLBACK_CHUNKS, DEFAULT_CHUNK_RELEVANCE};
use talent_core::models::ContextChunk;
use talent_core::similarity::cosine_similarity;
use talent_core::traits::IEmbeddingProvider;
use tracing::{debug, warn};

/// Keep the most query-relevant chunks that fit in `max_tokens`.
///
/// Chunk relevance is replaced by the cosine similarity of the chunk text
/// to the query; a chunk that cannot be embedded gets
/// [`DEFAULT_CHUNK_RELEVANCE`]. Packing stops at the first chunk that would
/// overflow the budget. If the query itself cannot be embedded the first
/// [`CONTEXT_FALLBACK_CHUNKS`] chunks are returned unchanged.
pub fn optimize_context(
    chunks: &[ContextChunk],
    query: &str,
    embedder: &dyn IEmbeddingProvider,
    max_tokens: usize,
) -> Vec<ContextChunk> {
    let query_vector = match embedder.embed(query) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "query embedding failed, keeping leading chunks");
            return chunks.iter().take(CONTEXT_FALLBACK_CHUNKS).cloned().collect();
        }
    };

    let mut rescored: Vec<ContextChunk> = chunks
        .par_iter()
        .map(|chunk| {
            let relevance = embedder
                .embed(&chunk.content)
                .map(|v| cosine_similarity(&query_vector, &v))
                .unwrap_or(DEFAULT_CHUNK_RELEVANCE);
            ContextChunk {
                relevance,
                ..chunk.clone()
            }
        })
        .collect();

    rescored.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut total = 0;
    let mut kept = Vec::new();
    for chunk in rescored {
        let tokens = chunk.estimated_tokens();
        if total + tokens > max_tokens {
            break;
        }
        total += tokens;
        kept.push(chunk);
    }

    debug!(chunks = kept.len(), tokens = total, budget = max_tokens, "context optimised");
    kept
}
