//! The aggregator orchestrates one search: dispatch decision, adapter call
//! under a deadline, normalization into comparison results, and fallback
//! whenever the live path produces nothing usable. No error crosses its
//! public boundary; every failure mode narrows to "fewer or fallback
//! results".

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;

use comparo_core::config::EngineConfig;
use comparo_core::{
    fallback, Category, CategoryCatalog, ComparisonResult, RandomSource, SearchRequest,
};

use crate::adapter::{CandidateItem, SourceAdapter};
use crate::dispatch::{DispatchTable, Route};

pub struct Aggregator {
    catalog: Arc<CategoryCatalog>,
    dispatch: DispatchTable,
    adapter_timeout: Duration,
    randomness: RandomSource,
}

impl Aggregator {
    pub fn new(catalog: Arc<CategoryCatalog>, dispatch: DispatchTable, config: &EngineConfig) -> Self {
        Self {
            catalog,
            dispatch,
            adapter_timeout: Duration::from_secs(config.search.adapter_timeout_secs),
            randomness: RandomSource::from_seed_option(config.search.seed),
        }
    }

    /// Built-in catalog plus the standard dispatch table.
    pub fn from_config(config: &EngineConfig) -> Self {
        let randomness = RandomSource::from_seed_option(config.search.seed);
        let dispatch = DispatchTable::standard(config, randomness);
        Self::new(Arc::new(CategoryCatalog::builtin()), dispatch, config)
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn dispatch(&self) -> &DispatchTable {
        &self.dispatch
    }

    /// Run one search. Always resolves: adapter errors, timeouts, and empty
    /// result sets all route to the fallback generator. The only empty
    /// outcomes are an unknown category and a category with zero platforms.
    pub async fn search(&self, request: &SearchRequest) -> Vec<ComparisonResult> {
        let correlation_id = Uuid::new_v4();

        let Some(category) = self.catalog.find(&request.category) else {
            warn!(
                event_name = "engine.search.unknown_category",
                correlation_id = %correlation_id,
                category = %request.category,
                "no catalog entry for category"
            );
            return Vec::new();
        };

        if request.is_blank() {
            info!(
                event_name = "engine.search.blank_query",
                correlation_id = %correlation_id,
                category = %category.id,
                "blank query, synthesizing from metadata"
            );
            return self.fallback(category, request, correlation_id);
        }

        let adapter = match self.dispatch.route(&category.id) {
            Some(Route::Adapter(adapter)) => Arc::clone(adapter),
            Some(Route::FallbackOnly) | None => {
                info!(
                    event_name = "engine.search.no_live_source",
                    correlation_id = %correlation_id,
                    category = %category.id,
                    "category has no live source"
                );
                return self.fallback(category, request, correlation_id);
            }
        };

        info!(
            event_name = "engine.search.dispatched",
            correlation_id = %correlation_id,
            category = %category.id,
            adapter = adapter.name(),
            location = request.location_or_unspecified(),
            "dispatching search to adapter"
        );

        let items = match timeout(self.adapter_timeout, adapter.fetch(request, category)).await {
            Ok(Ok(items)) => items,
            Ok(Err(error)) => {
                warn!(
                    event_name = "engine.adapter.failed",
                    correlation_id = %correlation_id,
                    category = %category.id,
                    adapter = adapter.name(),
                    error = %error,
                    "adapter failed, falling back"
                );
                return self.fallback(category, request, correlation_id);
            }
            Err(_) => {
                warn!(
                    event_name = "engine.adapter.timed_out",
                    correlation_id = %correlation_id,
                    category = %category.id,
                    adapter = adapter.name(),
                    timeout_secs = self.adapter_timeout.as_secs(),
                    "adapter exceeded its deadline, falling back"
                );
                return self.fallback(category, request, correlation_id);
            }
        };

        let results = build_results(category, items);
        if results.is_empty() {
            info!(
                event_name = "engine.search.no_usable_items",
                correlation_id = %correlation_id,
                category = %category.id,
                adapter = adapter.name(),
                "adapter returned nothing usable, falling back"
            );
            return self.fallback(category, request, correlation_id);
        }

        info!(
            event_name = "engine.search.completed",
            correlation_id = %correlation_id,
            category = %category.id,
            results = results.len(),
            "search completed"
        );
        results
    }

    fn fallback(
        &self,
        category: &Category,
        request: &SearchRequest,
        correlation_id: Uuid,
    ) -> Vec<ComparisonResult> {
        let mut rng = self.randomness.rng();
        let results = fallback::synthesize(category, request.trimmed_query(), &mut rng);
        info!(
            event_name = "engine.search.fallback",
            correlation_id = %correlation_id,
            category = %category.id,
            results = results.len(),
            "returning synthesized results"
        );
        results
    }
}

/// Expand candidate items into comparison results in discovery order. Items
/// with no offers are dropped; the category's cap bounds the output.
fn build_results(category: &Category, items: Vec<CandidateItem>) -> Vec<ComparisonResult> {
    let mut results = Vec::new();
    for item in items {
        if results.len() == category.result_cap {
            break;
        }
        if item.offers.is_empty() {
            continue;
        }

        let id = format!("{}-{}", category.id, results.len() + 1);
        match ComparisonResult::new(id, item.name, item.image, item.offers) {
            Ok(result) => results.push(result),
            Err(error) => {
                warn!(
                    event_name = "engine.search.item_rejected",
                    category = %category.id,
                    error = %error,
                    "dropping invalid candidate item"
                );
            }
        }
    }
    results
}
