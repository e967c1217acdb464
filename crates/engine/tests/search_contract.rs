//! End-to-end contract of the search surface: the aggregator always
//! resolves, every returned result satisfies the comparison invariants, and
//! every failure mode narrows to fallback or fewer results.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::Notify;

use comparo_core::config::EngineConfig;
use comparo_core::normalize::{delivery_speed, DeliverySpeed};
use comparo_core::{Category, CategoryCatalog, ComparisonResult, Offer, Platform, SearchRequest};
use comparo_engine::adapters::{CryptoAdapter, SpotPriceSource};
use comparo_engine::{
    Aggregator, AdapterError, CandidateItem, DispatchTable, SearchSession, SourceAdapter,
};

fn seeded_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.search.seed = Some(21);
    config
}

fn aggregator_with(dispatch: DispatchTable, config: &EngineConfig) -> Aggregator {
    Aggregator::new(Arc::new(CategoryCatalog::builtin()), dispatch, config)
}

fn assert_invariants(result: &ComparisonResult) {
    let offers = result.offers();
    assert!(!offers.is_empty(), "result {} has no offers", result.id);

    let min_price = offers.iter().map(|offer| offer.price).min().expect("offers");
    assert_eq!(result.best_price().price, min_price);

    let max_rating =
        offers.iter().map(|offer| offer.rating).fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(result.best_rated().rating, max_rating);

    let recommendation = result.recommendation();
    assert!(recommendation.best_price < offers.len());
    assert!(recommendation.fastest_delivery < offers.len());
    assert!(recommendation.best_rated < offers.len());
}

struct FailingAdapter;

#[async_trait]
impl SourceAdapter for FailingAdapter {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn fetch(
        &self,
        _request: &SearchRequest,
        _category: &Category,
    ) -> Result<Vec<CandidateItem>, AdapterError> {
        Err(AdapterError::Status { url: "https://broken.example".to_string(), status: 502 })
    }
}

struct CountingAdapter {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl SourceAdapter for CountingAdapter {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn fetch(
        &self,
        _request: &SearchRequest,
        _category: &Category,
    ) -> Result<Vec<CandidateItem>, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

struct PartialAdapter;

#[async_trait]
impl SourceAdapter for PartialAdapter {
    fn name(&self) -> &'static str {
        "partial"
    }

    async fn fetch(
        &self,
        _request: &SearchRequest,
        _category: &Category,
    ) -> Result<Vec<CandidateItem>, AdapterError> {
        let platform = Platform::new("solo", "Solo", "https://solo.example", "#abc");
        let offer = |price: i64| {
            Offer::new(platform.clone(), Decimal::from(price), "2-3 days").with_rating(4.1)
        };
        Ok(vec![
            CandidateItem::new("First", "https://img.example/1", vec![offer(110)]),
            // This candidate's dependent detail call failed upstream: no offers.
            CandidateItem::new("Second", "https://img.example/2", Vec::new()),
            CandidateItem::new("Third", "https://img.example/3", vec![offer(130)]),
        ])
    }
}

struct SlowAdapter;

#[async_trait]
impl SourceAdapter for SlowAdapter {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn fetch(
        &self,
        _request: &SearchRequest,
        _category: &Category,
    ) -> Result<Vec<CandidateItem>, AdapterError> {
        tokio::time::sleep(Duration::from_secs(120)).await;
        Ok(Vec::new())
    }
}

struct GatedAdapter {
    started: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl SourceAdapter for GatedAdapter {
    fn name(&self) -> &'static str {
        "gated"
    }

    async fn fetch(
        &self,
        _request: &SearchRequest,
        category: &Category,
    ) -> Result<Vec<CandidateItem>, AdapterError> {
        self.started.notify_one();
        self.release.notified().await;

        let platform = category.platforms.first().expect("category platforms").clone();
        let offer = Offer::new(platform, Decimal::from(100u32), "Instant").with_rating(4.0);
        Ok(vec![CandidateItem::new("Gated", "https://img.example/g", vec![offer])])
    }
}

struct FixedSpot(Decimal);

#[async_trait]
impl SpotPriceSource for FixedSpot {
    async fn spot_price(&self, _coin: &str) -> Result<Decimal, AdapterError> {
        Ok(self.0)
    }
}

#[tokio::test]
async fn fallback_totality_when_the_adapter_always_fails() {
    let config = seeded_config();
    let dispatch =
        DispatchTable::builder().adapter("entertainment", Arc::new(FailingAdapter)).build();
    let aggregator = aggregator_with(dispatch, &config);

    let request = SearchRequest::new("entertainment", "interstellar");
    let results = aggregator.search(&request).await;

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.name, "interstellar");
    assert_eq!(result.offers().len(), 4);
    assert!(result.offers().iter().all(|offer| offer.availability));
    assert_invariants(result);
}

#[tokio::test]
async fn failure_of_one_candidate_item_leaves_siblings_intact() {
    let config = seeded_config();
    let dispatch = DispatchTable::builder().adapter("books", Arc::new(PartialAdapter)).build();
    let aggregator = aggregator_with(dispatch, &config);

    let results = aggregator.search(&SearchRequest::new("books", "rust in practice")).await;
    let names: Vec<&str> = results.iter().map(|result| result.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Third"]);
    for result in &results {
        assert_invariants(result);
    }
}

#[tokio::test]
async fn blank_queries_skip_the_adapter_entirely() {
    let config = seeded_config();
    let calls = Arc::new(AtomicUsize::new(0));
    let dispatch = DispatchTable::builder()
        .adapter("groceries", Arc::new(CountingAdapter { calls: Arc::clone(&calls) }))
        .build();
    let aggregator = aggregator_with(dispatch, &config);

    let results = aggregator.search(&SearchRequest::new("groceries", "   ")).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0, "blank queries must not reach the adapter");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Groceries");
}

#[tokio::test]
async fn empty_adapter_output_is_treated_like_failure() {
    let config = seeded_config();
    let calls = Arc::new(AtomicUsize::new(0));
    let dispatch = DispatchTable::builder()
        .adapter("toys", Arc::new(CountingAdapter { calls: Arc::clone(&calls) }))
        .build();
    let aggregator = aggregator_with(dispatch, &config);

    let results = aggregator.search(&SearchRequest::new("toys", "wooden blocks")).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(results.len(), 1, "empty adapter output should fall back");
    assert_eq!(results[0].name, "wooden blocks");
}

#[tokio::test]
async fn unknown_category_returns_empty_without_erroring() {
    let config = seeded_config();
    let aggregator = aggregator_with(DispatchTable::builder().build(), &config);

    let results = aggregator.search(&SearchRequest::new("time-machines", "delorean")).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn zero_platform_category_returns_empty_without_erroring() {
    let config = seeded_config();
    let catalog = CategoryCatalog::new(vec![Category::new("vaporware", "Vaporware")])
        .expect("valid catalog");
    let aggregator = Aggregator::new(Arc::new(catalog), DispatchTable::builder().build(), &config);

    let results = aggregator.search(&SearchRequest::new("vaporware", "anything")).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn fallback_only_categories_always_synthesize() {
    let config = seeded_config();
    let aggregator = Aggregator::from_config(&config);

    let results = aggregator.search(&SearchRequest::new("hotels", "beach resort")).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "beach resort");
    assert_invariants(&results[0]);
}

#[tokio::test]
async fn crypto_offers_share_one_spot_price_across_exchanges() {
    let config = seeded_config();
    let spot = Decimal::from(5_125_000u32);
    let dispatch = DispatchTable::builder()
        .adapter("cryptocurrency", Arc::new(CryptoAdapter::new(Arc::new(FixedSpot(spot)))))
        .build();
    let aggregator = aggregator_with(dispatch, &config);

    let results = aggregator.search(&SearchRequest::new("cryptocurrency", "bitcoin")).await;
    assert_eq!(results.len(), 1);

    let result = &results[0];
    assert_eq!(result.offers().len(), 3);
    assert!(result.offers().iter().all(|offer| offer.price == spot));
    let exchanges: Vec<&str> =
        result.offers().iter().map(|offer| offer.platform.id.0.as_str()).collect();
    assert_eq!(exchanges, vec!["wazirx", "coindcx", "zebpay"]);
    assert_invariants(result);
}

#[tokio::test]
async fn food_delivery_searches_return_dishes_with_minute_etas() {
    let config = seeded_config();
    let aggregator = Aggregator::from_config(&config);

    let request = SearchRequest::new("food-delivery", "pizza").with_location("Koramangala");
    let results = aggregator.search(&request).await;

    assert!(!results.is_empty() && results.len() <= 8);
    for result in &results {
        assert_eq!(result.offers().len(), 3);
        for offer in result.offers() {
            assert_eq!(delivery_speed(&offer.estimated_delivery), DeliverySpeed::Minutes);
            assert!(offer.special_offers.iter().any(|text| text.starts_with("Rated ")));
        }
        assert_invariants(result);
    }
}

#[tokio::test]
async fn repeated_searches_keep_an_identical_shape() {
    // Entropy seeding: prices may differ between runs, structure must not.
    let config = EngineConfig::default();
    let aggregator = Aggregator::from_config(&config);
    let request = SearchRequest::new("electronics", "bluetooth speaker");

    let first = aggregator.search(&request).await;
    let second = aggregator.search(&request).await;

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        let platforms_a: Vec<&str> =
            a.offers().iter().map(|offer| offer.platform.id.0.as_str()).collect();
        let platforms_b: Vec<&str> =
            b.offers().iter().map(|offer| offer.platform.id.0.as_str()).collect();
        assert_eq!(platforms_a, platforms_b);
        assert_eq!(a.name, b.name);
    }
}

#[tokio::test(start_paused = true)]
async fn slow_adapters_hit_the_deadline_and_fall_back() {
    let config = seeded_config();
    let dispatch = DispatchTable::builder().adapter("flights", Arc::new(SlowAdapter)).build();
    let aggregator = aggregator_with(dispatch, &config);

    let results = aggregator.search(&SearchRequest::new("flights", "delhi to goa")).await;
    assert_eq!(results.len(), 1, "timed-out adapter should fall back");
    assert_eq!(results[0].offers().len(), 4);
}

#[tokio::test]
async fn superseded_searches_discard_their_results() {
    let config = seeded_config();
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let dispatch = DispatchTable::builder()
        .adapter(
            "mobiles",
            Arc::new(GatedAdapter {
                started: Arc::clone(&started),
                release: Arc::clone(&release),
            }),
        )
        .build();
    let session =
        Arc::new(SearchSession::new(Arc::new(aggregator_with(dispatch, &config))));

    let handle = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.search(&SearchRequest::new("mobiles", "pixel")).await }
    });

    started.notified().await;
    session.clear();
    release.notify_one();

    let results = handle.await.expect("search task");
    assert!(results.is_empty(), "stale generation results must be discarded");
    assert_eq!(session.generation(), 2);
}

#[tokio::test]
async fn current_generation_searches_return_their_results() {
    let config = seeded_config();
    let aggregator = Aggregator::from_config(&config);
    let session = SearchSession::new(Arc::new(aggregator));

    let results = session.search(&SearchRequest::new("fashion", "linen kurta")).await;
    assert!(!results.is_empty());
    for result in &results {
        assert_invariants(result);
    }
}
