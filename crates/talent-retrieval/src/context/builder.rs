//! Turn a scored candidate into typed evidence chunks.
//!
//! Pure transformation: no I/O and no failure modes. Each chunk's
//! relevance is the candidate's similarity on the matching embedding field.

use rayon::prelude::*;
use talent_core::models::{
    CandidateRecord, ChunkType, ContextChunk, FusedCandidate, ScoredCandidate,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct ContextBuilder;

impl ContextBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Profile and experience chunks always; skills when the candidate lists
    /// any; résumé when summary text exists.
    pub fn build(&self, scored: &ScoredCandidate) -> Vec<ContextChunk> {
        let c = &scored.candidate;
        let relevance = |t: ChunkType| scored.sub_scores.field(t.field());

        let mut chunks = Vec::with_capacity(4);
        chunks.push(ContextChunk::new(
            c.id,
            ChunkType::Profile,
            profile_text(c),
            relevance(ChunkType::Profile),
            "candidate_profile",
        ));

        if !c.skills.is_empty() {
            chunks.push(ContextChunk::new(
                c.id,
                ChunkType::Skills,
                format!("Technical Skills: {}", c.skills.join(", ")),
                relevance(ChunkType::Skills),
                "candidate_skills",
            ));
        }

        chunks.push(ContextChunk::new(
            c.id,
            ChunkType::Experience,
            experience_text(c),
            relevance(ChunkType::Experience),
            "candidate_experience",
        ));

        if let Some(resume) = c.resume_text() {
            chunks.push(ContextChunk::new(
                c.id,
                ChunkType::Resume,
                resume.to_string(),
                relevance(ChunkType::Resume),
                "candidate_summary",
            ));
        }

        chunks
    }

    /// Chunks for every fused candidate, built in parallel, in input order.
    pub fn build_all(&self, candidates: &[FusedCandidate]) -> Vec<Vec<ContextChunk>> {
        candidates
            .par_iter()
            .map(|c| self.build(&c.scored))
            .collect()
    }
}

fn profile_text(c: &CandidateRecord) -> String {
    format!(
        "Name: {}\nCurrent Position: {} at {}\nExperience: {} years\nLocation: {}",
        c.name,
        c.title,
        c.company_or_unknown(),
        c.years_experience,
        c.location.as_deref().unwrap_or("Not specified"),
    )
}

fn experience_text(c: &CandidateRecord) -> String {
    let salary = c
        .salary_expectation
        .map(|s| format!("${}", group_thousands(s)))
        .unwrap_or_else(|| "Not specified".to_string());
    format!(
        "Professional Experience: {} years in the field\nCurrent Role: {} at {}\nSalary Expectation: {}",
        c.years_experience,
        c.title,
        c.company_or_unknown(),
        salary,
    )
}

fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
