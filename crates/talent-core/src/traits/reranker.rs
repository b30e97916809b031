use crate::errors::TalentResult;

/// LLM collaborator that answers a rerank or summary prompt with free text.
pub trait IRerankerModel: Send + Sync {
    /// Single-shot completion.
    fn score(&self, prompt: &str) -> TalentResult<String>;

    fn name(&self) -> &str;
}
