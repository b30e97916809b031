use crate::models::CompletedSearch;

/// Receives finished searches. Must return promptly and never fail the search.
pub trait ISearchObserver: Send + Sync {
    fn on_search_completed(&self, search: CompletedSearch);
}
