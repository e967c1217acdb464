use async_trait::async_trait;

use comparo_core::{Category, Offer, SearchRequest};

use crate::errors::AdapterError;

/// One candidate item discovered by a source, already normalized into
/// per-platform offers. The aggregator turns candidates into full
/// comparison results.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateItem {
    pub name: String,
    pub image: String,
    pub offers: Vec<Offer>,
}

impl CandidateItem {
    pub fn new(name: impl Into<String>, image: impl Into<String>, offers: Vec<Offer>) -> Self {
        Self { name: name.into(), image: image.into(), offers }
    }
}

/// A source adapter queries one external provider (or synthesizes data for
/// one category) and returns candidate items for a single search.
///
/// Returning an empty list signals "no results", not failure. Errors are
/// caught at the aggregator's call boundary and converted into fallback
/// results; an adapter can never abort the overall search. Adapters perform
/// network I/O only and hold no mutable state shared between searches.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Short identifier used in structured log events.
    fn name(&self) -> &'static str;

    async fn fetch(
        &self,
        request: &SearchRequest,
        category: &Category,
    ) -> Result<Vec<CandidateItem>, AdapterError>;
}
