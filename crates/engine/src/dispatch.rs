//! Category dispatch: a data-driven mapping from category id to the source
//! adapter responsible for it. Adding a category is a table insertion, not a
//! new branch in control flow.

use std::collections::HashMap;
use std::sync::Arc;

use comparo_core::config::EngineConfig;
use comparo_core::{CategoryId, RandomSource};

use crate::adapter::SourceAdapter;
use crate::adapters::{
    CatalogRetailAdapter, CryptoAdapter, EntertainmentAdapter, FlightsAdapter, FoodDeliveryAdapter,
    HttpSpotPriceSource, HttpTitleSource, MutualFundsAdapter, RideHailingAdapter,
};

/// Retail categories served by the shared catalog adapter.
pub const RETAIL_CATEGORIES: &[&str] = &[
    "electronics",
    "mobiles",
    "laptops",
    "fashion",
    "footwear",
    "groceries",
    "furniture",
    "books",
    "beauty",
    "appliances",
    "toys",
    "sports",
    "watches",
    "jewellery",
    "pharmacy",
    "stationery",
    "pet-supplies",
];

/// Categories with no live source; every search synthesizes from metadata.
pub const FALLBACK_ONLY_CATEGORIES: &[&str] = &["hotels", "broadband", "insurance", "gift-cards"];

#[derive(Clone)]
pub enum Route {
    Adapter(Arc<dyn SourceAdapter>),
    FallbackOnly,
}

#[derive(Clone, Default)]
pub struct DispatchTable {
    routes: HashMap<CategoryId, Route>,
}

impl DispatchTable {
    pub fn builder() -> DispatchTableBuilder {
        DispatchTableBuilder { routes: HashMap::new() }
    }

    pub fn route(&self, category: &CategoryId) -> Option<&Route> {
        self.routes.get(category)
    }

    /// Routing kind for operator tooling: `adapter:<name>`, `fallback-only`,
    /// or `unrouted`.
    pub fn describe(&self, category: &CategoryId) -> String {
        match self.routes.get(category) {
            Some(Route::Adapter(adapter)) => format!("adapter:{}", adapter.name()),
            Some(Route::FallbackOnly) => "fallback-only".to_string(),
            None => "unrouted".to_string(),
        }
    }

    /// Wire every built-in category: dedicated adapters for the live
    /// categories, one shared retail adapter for all product categories, and
    /// explicit fallback-only entries for the rest.
    pub fn standard(config: &EngineConfig, randomness: RandomSource) -> Self {
        let title_source = Arc::new(HttpTitleSource::new(&config.entertainment));
        let spot_source = Arc::new(HttpSpotPriceSource::new(&config.crypto));

        let mut builder = Self::builder()
            .adapter(
                "entertainment",
                Arc::new(EntertainmentAdapter::new(
                    title_source,
                    config.search.fan_out_limit,
                    randomness,
                )),
            )
            .adapter("food-delivery", Arc::new(FoodDeliveryAdapter::new(randomness)))
            .adapter("cryptocurrency", Arc::new(CryptoAdapter::new(spot_source)))
            .adapter("flights", Arc::new(FlightsAdapter::new(randomness)))
            .adapter("mutual-funds", Arc::new(MutualFundsAdapter::new(randomness)))
            .adapter("ride-hailing", Arc::new(RideHailingAdapter::new(randomness)));

        let retail: Arc<dyn SourceAdapter> = Arc::new(CatalogRetailAdapter::new(randomness));
        for category in RETAIL_CATEGORIES {
            builder = builder.shared_adapter(category, Arc::clone(&retail));
        }
        for category in FALLBACK_ONLY_CATEGORIES {
            builder = builder.fallback_only(category);
        }

        builder.build()
    }
}

pub struct DispatchTableBuilder {
    routes: HashMap<CategoryId, Route>,
}

impl DispatchTableBuilder {
    pub fn adapter(
        self,
        category: &str,
        adapter: Arc<dyn SourceAdapter>,
    ) -> Self {
        self.shared_adapter(category, adapter)
    }

    pub fn shared_adapter(mut self, category: &str, adapter: Arc<dyn SourceAdapter>) -> Self {
        self.routes.insert(CategoryId(category.to_string()), Route::Adapter(adapter));
        self
    }

    pub fn fallback_only(mut self, category: &str) -> Self {
        self.routes.insert(CategoryId(category.to_string()), Route::FallbackOnly);
        self
    }

    pub fn build(self) -> DispatchTable {
        DispatchTable { routes: self.routes }
    }
}
