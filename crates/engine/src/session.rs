//! Search sessions: a monotonically increasing generation counter that lets
//! a caller supersede in-flight searches. The engine itself stays stateless
//! across calls; the session only decides whether a finished search is still
//! the current one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use comparo_core::{ComparisonResult, SearchRequest};

use crate::aggregator::Aggregator;

pub struct SearchSession {
    aggregator: Arc<Aggregator>,
    generation: AtomicU64,
}

impl SearchSession {
    pub fn new(aggregator: Arc<Aggregator>) -> Self {
        Self { aggregator, generation: AtomicU64::new(0) }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Run one search under this session. The generation is captured at
    /// dispatch time; if another search (or `clear`) bumps it before the
    /// adapter resolves, the stale results are discarded instead of being
    /// merged into newer state.
    pub async fn search(&self, request: &SearchRequest) -> Vec<ComparisonResult> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let results = self.aggregator.search(request).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(
                event_name = "engine.session.superseded",
                generation,
                current = self.generation.load(Ordering::SeqCst),
                category = %request.category,
                "discarding results of a superseded search"
            );
            return Vec::new();
        }
        results
    }

    /// Discard whatever the caller is holding. Engine-side this is only a
    /// generation bump: any in-flight search becomes stale.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
