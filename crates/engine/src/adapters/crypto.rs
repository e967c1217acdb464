//! Cryptocurrency adapter: fetches one spot price per queried coin and
//! quotes it unchanged on every configured exchange. Price parity across
//! exchanges is deliberate for this category; the comparison value lies in
//! ratings, features, and promotions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use comparo_core::config::CryptoConfig;
use comparo_core::fallback::placeholder_image;
use comparo_core::normalize::{title_case, DELIVERY_INSTANT};
use comparo_core::{Category, Offer, SearchRequest};

use crate::adapter::{CandidateItem, SourceAdapter};
use crate::adapters::review_count;
use crate::errors::AdapterError;

/// Quote source for one coin's spot price in INR.
#[async_trait]
pub trait SpotPriceSource: Send + Sync {
    async fn spot_price(&self, coin: &str) -> Result<Decimal, AdapterError>;
}

pub struct HttpSpotPriceSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSpotPriceSource {
    pub fn new(config: &CryptoConfig) -> Self {
        Self { client: reqwest::Client::new(), base_url: config.base_url.clone() }
    }
}

#[async_trait]
impl SpotPriceSource for HttpSpotPriceSource {
    async fn spot_price(&self, coin: &str) -> Result<Decimal, AdapterError> {
        let url = format!("{}/simple/price?ids={coin}&vs_currencies=inr", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| AdapterError::Transport { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Status { url, status: status.as_u16() });
        }

        let payload: HashMap<String, HashMap<String, Decimal>> = response
            .json()
            .await
            .map_err(|source| AdapterError::Transport { url: url.clone(), source })?;

        payload
            .get(coin)
            .and_then(|quotes| quotes.get("inr"))
            .copied()
            .ok_or_else(|| AdapterError::Payload {
                url,
                detail: format!("no INR quote for `{coin}`"),
            })
    }
}

pub struct CryptoAdapter {
    source: Arc<dyn SpotPriceSource>,
}

impl CryptoAdapter {
    pub fn new(source: Arc<dyn SpotPriceSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl SourceAdapter for CryptoAdapter {
    fn name(&self) -> &'static str {
        "cryptocurrency"
    }

    async fn fetch(
        &self,
        request: &SearchRequest,
        category: &Category,
    ) -> Result<Vec<CandidateItem>, AdapterError> {
        let coin = request.trimmed_query().to_lowercase().replace(' ', "-");
        let spot = self.source.spot_price(&coin).await?;
        let name = title_case(request.trimmed_query());

        let offers: Vec<Offer> = category
            .platforms
            .iter()
            .map(|platform| {
                let delivery = platform
                    .delivery_time
                    .clone()
                    .unwrap_or_else(|| DELIVERY_INSTANT.to_string());

                Offer::new(platform.clone(), spot, delivery)
                    .with_rating(platform.rating.unwrap_or(4.0))
                    .with_reviews(review_count(&name, &platform.id))
                    .with_special_offers(
                        platform.discounts.first().cloned().into_iter().collect(),
                    )
            })
            .collect();

        Ok(vec![CandidateItem::new(name.clone(), placeholder_image(&name), offers)])
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use comparo_core::{CategoryCatalog, CategoryId, SearchRequest};

    use crate::adapter::SourceAdapter;
    use crate::errors::AdapterError;

    use super::{CryptoAdapter, SpotPriceSource};

    struct FixedSpot(Decimal);

    #[async_trait]
    impl SpotPriceSource for FixedSpot {
        async fn spot_price(&self, _coin: &str) -> Result<Decimal, AdapterError> {
            Ok(self.0)
        }
    }

    struct FailingSpot;

    #[async_trait]
    impl SpotPriceSource for FailingSpot {
        async fn spot_price(&self, coin: &str) -> Result<Decimal, AdapterError> {
            Err(AdapterError::Payload {
                url: "https://quotes.example".to_string(),
                detail: format!("no INR quote for `{coin}`"),
            })
        }
    }

    fn cryptocurrency() -> comparo_core::Category {
        CategoryCatalog::builtin()
            .find(&CategoryId("cryptocurrency".to_string()))
            .expect("builtin cryptocurrency")
            .clone()
    }

    #[tokio::test]
    async fn quotes_the_same_spot_price_on_every_exchange() {
        let spot = Decimal::from(5_234_567u32);
        let adapter = CryptoAdapter::new(Arc::new(FixedSpot(spot)));
        let category = cryptocurrency();
        let request = SearchRequest::new("cryptocurrency", "bitcoin");

        let items = adapter.fetch(&request, &category).await.expect("fixed source");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Bitcoin");
        assert_eq!(items[0].offers.len(), 3);
        assert!(items[0].offers.iter().all(|offer| offer.price == spot));
        assert!(items[0]
            .offers
            .iter()
            .all(|offer| offer.estimated_delivery == "Instant"));
    }

    #[tokio::test]
    async fn source_failures_propagate_to_the_call_boundary() {
        let adapter = CryptoAdapter::new(Arc::new(FailingSpot));
        let category = cryptocurrency();
        let request = SearchRequest::new("cryptocurrency", "notacoin");

        let error = adapter.fetch(&request, &category).await.expect_err("source fails");
        assert!(matches!(error, AdapterError::Payload { .. }));
    }
}
