//! Prompt templates for the reranker model.

use talent_core::models::ContextChunk;

/// Evidence block: one `[TYPE] content` paragraph per chunk.
pub fn evidence_block(chunks: &[ContextChunk]) -> String {
    chunks
        .iter()
        .map(|c| format!("[{}] {}", c.chunk_type.as_str().to_uppercase(), c.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Relevance-scoring prompt. The model must answer with `Score:` and
/// `Explanation:` lines.
pub fn rerank_prompt(job_description: &str, chunks: &[ContextChunk]) -> String {
    format!(
        "You are assessing a candidate for a role as an experienced technical recruiter.\n\
         \n\
         ROLE REQUIREMENTS:\n\
         {job_description}\n\
         \n\
         CANDIDATE EVIDENCE:\n\
         {evidence}\n\
         \n\
         Rate how relevant this candidate is from 0.0 to 1.0, weighing:\n\
         - alignment of technical skills\n\
         - match of experience level\n\
         - suitability for the role\n\
         - overall fit\n\
         \n\
         Reply in exactly this format:\n\
         Score: <number between 0.0 and 1.0>\n\
         Explanation: <one or two sentences on the match>",
        evidence = evidence_block(chunks),
    )
}

/// Candidate summary prompt over the most relevant chunks.
pub fn summary_prompt(job_description: &str, chunks: &[ContextChunk]) -> String {
    let evidence = chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "Summarise in two or three sentences why this candidate is relevant to the role.\n\
         Name specific skills, the experience level, and how the role fits.\n\
         \n\
         ROLE REQUIREMENTS:\n\
         {job_description}\n\
         \n\
         CANDIDATE EVIDENCE:\n\
         {evidence}"
    )
}
