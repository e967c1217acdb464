//! Entertainment adapter: free-text title search followed by per-title
//! detail lookups. Detail calls are independent across titles and run
//! concurrently under a bounded fan-out; one title's failure drops only
//! that title.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::warn;

use comparo_core::config::EntertainmentConfig;
use comparo_core::fallback::placeholder_image;
use comparo_core::normalize::{base_price_for_query, platform_price, query_seed, DELIVERY_INSTANT};
use comparo_core::{Category, Offer, RandomSource, SearchRequest};

use crate::adapter::{CandidateItem, SourceAdapter};
use crate::errors::AdapterError;

const RENTAL_JITTER: f64 = 0.1;
const SUBSCRIPTION_FEATURE: &str = "subscription";

#[derive(Clone, Debug, PartialEq)]
pub struct TitleSummary {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    pub poster: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TitleDetail {
    /// Source-native 0-10 rating.
    pub rating: f64,
    pub votes: u64,
}

/// Title search and per-title detail against one entertainment data source.
#[async_trait]
pub trait TitleSource: Send + Sync {
    async fn search_titles(&self, query: &str) -> Result<Vec<TitleSummary>, AdapterError>;
    async fn title_detail(&self, id: &str) -> Result<TitleDetail, AdapterError>;
}

pub struct HttpTitleSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl HttpTitleSource {
    pub fn new(config: &EntertainmentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn api_key(&self) -> Result<&str, AdapterError> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret())
            .ok_or(AdapterError::MissingCredentials { provider: "entertainment" })
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Search", default)]
    results: Vec<SearchEntry>,
    #[serde(rename = "Response")]
    response: String,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(rename = "imdbID")]
    id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    #[serde(rename = "imdbRating")]
    rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    votes: Option<String>,
}

#[async_trait]
impl TitleSource for HttpTitleSource {
    async fn search_titles(&self, query: &str) -> Result<Vec<TitleSummary>, AdapterError> {
        let api_key = self.api_key()?;
        let url = format!("{}/?apikey={api_key}&s={}", self.base_url, urlencode(query));
        let envelope: SearchEnvelope = get_json(&self.client, &url).await?;
        if envelope.response != "True" {
            // The source reports "no results" through the envelope flag.
            return Ok(Vec::new());
        }

        Ok(envelope
            .results
            .into_iter()
            .map(|entry| TitleSummary {
                id: entry.id,
                title: entry.title,
                year: entry.year,
                poster: entry.poster.filter(|poster| poster.starts_with("http")),
            })
            .collect())
    }

    async fn title_detail(&self, id: &str) -> Result<TitleDetail, AdapterError> {
        let api_key = self.api_key()?;
        let url = format!("{}/?apikey={api_key}&i={}", self.base_url, urlencode(id));
        let envelope: DetailEnvelope = get_json(&self.client, &url).await?;

        let rating = envelope.rating.as_deref().and_then(|raw| raw.parse::<f64>().ok());
        let votes = envelope
            .votes
            .as_deref()
            .and_then(|raw| raw.replace(',', "").parse::<u64>().ok())
            .unwrap_or(0);

        Ok(TitleDetail { rating: rating.unwrap_or(6.0), votes })
    }
}

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, AdapterError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| AdapterError::Transport { url: url.to_string(), source })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AdapterError::Status { url: url.to_string(), status: status.as_u16() });
    }

    response
        .json()
        .await
        .map_err(|source| AdapterError::Transport { url: url.to_string(), source })
}

fn urlencode(value: &str) -> String {
    value.trim().replace(' ', "+")
}

pub struct EntertainmentAdapter {
    source: Arc<dyn TitleSource>,
    fan_out_limit: usize,
    randomness: RandomSource,
}

impl EntertainmentAdapter {
    pub fn new(source: Arc<dyn TitleSource>, fan_out_limit: usize, randomness: RandomSource) -> Self {
        Self { source, fan_out_limit: fan_out_limit.max(1), randomness }
    }
}

#[async_trait]
impl SourceAdapter for EntertainmentAdapter {
    fn name(&self) -> &'static str {
        "entertainment"
    }

    async fn fetch(
        &self,
        request: &SearchRequest,
        category: &Category,
    ) -> Result<Vec<CandidateItem>, AdapterError> {
        let summaries = self.source.search_titles(request.trimmed_query()).await?;
        let picked: Vec<TitleSummary> =
            summaries.into_iter().take(category.result_cap).collect();

        let semaphore = Arc::new(Semaphore::new(self.fan_out_limit));
        let mut join_set = JoinSet::new();
        for (index, summary) in picked.into_iter().enumerate() {
            let source = Arc::clone(&self.source);
            let semaphore = Arc::clone(&semaphore);
            join_set.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return (index, summary, Err(AdapterError::Other("cancelled".to_string())))
                    }
                };
                let detail = source.title_detail(&summary.id).await;
                (index, summary, detail)
            });
        }

        let mut enriched: Vec<(usize, TitleSummary, TitleDetail)> = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, summary, Ok(detail))) => enriched.push((index, summary, detail)),
                Ok((_, summary, Err(error))) => {
                    warn!(
                        event_name = "engine.entertainment.detail_failed",
                        title = %summary.title,
                        error = %error,
                        "dropping title after detail failure"
                    );
                }
                Err(join_error) => {
                    warn!(
                        event_name = "engine.entertainment.worker_failed",
                        error = %join_error,
                        "dropping title after worker failure"
                    );
                }
            }
        }
        // Join order is completion order; restore discovery order.
        enriched.sort_by_key(|(index, _, _)| *index);

        let items = enriched
            .into_iter()
            .map(|(_, summary, detail)| self.build_item(summary, detail, category))
            .collect();
        Ok(items)
    }
}

impl EntertainmentAdapter {
    fn build_item(
        &self,
        summary: TitleSummary,
        detail: TitleDetail,
        category: &Category,
    ) -> CandidateItem {
        let base_rental = base_price_for_query(&summary.title, category.price_range);
        let mut rng = self.randomness.fork(query_seed(&summary.title)).rng();

        let offers: Vec<Offer> = category
            .platforms
            .iter()
            .map(|platform| {
                let subscription =
                    platform.features.iter().any(|feature| feature == SUBSCRIPTION_FEATURE);
                let price = if subscription {
                    Decimal::ZERO
                } else {
                    platform_price(base_rental, platform.price_multiplier, RENTAL_JITTER, &mut rng)
                };

                let mut special_offers: Vec<String> =
                    platform.discounts.first().cloned().into_iter().collect();
                if subscription && special_offers.is_empty() {
                    special_offers.push("Included with subscription".to_string());
                }

                Offer::new(platform.clone(), price, DELIVERY_INSTANT)
                    .with_rating(detail.rating)
                    .with_reviews(detail.votes)
                    .with_special_offers(special_offers)
            })
            .collect();

        let name = match &summary.year {
            Some(year) => format!("{} ({year})", summary.title),
            None => summary.title.clone(),
        };
        let image = summary.poster.unwrap_or_else(|| placeholder_image(&summary.title));
        CandidateItem::new(name, image, offers)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use comparo_core::{CategoryCatalog, CategoryId, RandomSource, SearchRequest};

    use crate::adapter::SourceAdapter;
    use crate::errors::AdapterError;

    use super::{EntertainmentAdapter, TitleDetail, TitleSource, TitleSummary};

    struct StubSource {
        summaries: Vec<TitleSummary>,
        failing_id: Option<String>,
    }

    #[async_trait]
    impl TitleSource for StubSource {
        async fn search_titles(&self, _query: &str) -> Result<Vec<TitleSummary>, AdapterError> {
            Ok(self.summaries.clone())
        }

        async fn title_detail(&self, id: &str) -> Result<TitleDetail, AdapterError> {
            if self.failing_id.as_deref() == Some(id) {
                return Err(AdapterError::Status {
                    url: format!("https://titles.example/{id}"),
                    status: 500,
                });
            }
            Ok(TitleDetail { rating: 8.2, votes: 125_000 })
        }
    }

    fn summary(id: &str, title: &str) -> TitleSummary {
        TitleSummary {
            id: id.to_string(),
            title: title.to_string(),
            year: Some("2019".to_string()),
            poster: None,
        }
    }

    fn entertainment() -> comparo_core::Category {
        CategoryCatalog::builtin()
            .find(&CategoryId("entertainment".to_string()))
            .expect("builtin entertainment")
            .clone()
    }

    #[tokio::test]
    async fn enriches_titles_and_preserves_discovery_order() {
        let source = StubSource {
            summaries: vec![summary("t1", "Alpha"), summary("t2", "Beta"), summary("t3", "Gamma")],
            failing_id: None,
        };
        let adapter = EntertainmentAdapter::new(Arc::new(source), 2, RandomSource::seeded(4));
        let category = entertainment();
        let request = SearchRequest::new("entertainment", "greek letters");

        let items = adapter.fetch(&request, &category).await.expect("stub source");
        let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha (2019)", "Beta (2019)", "Gamma (2019)"]);
        assert_eq!(items[0].offers.len(), category.platforms.len());
    }

    #[tokio::test]
    async fn one_failing_detail_call_drops_only_that_title() {
        let source = StubSource {
            summaries: vec![summary("t1", "Alpha"), summary("t2", "Beta"), summary("t3", "Gamma")],
            failing_id: Some("t2".to_string()),
        };
        let adapter = EntertainmentAdapter::new(Arc::new(source), 2, RandomSource::seeded(4));
        let category = entertainment();
        let request = SearchRequest::new("entertainment", "greek letters");

        let items = adapter.fetch(&request, &category).await.expect("stub source");
        let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha (2019)", "Gamma (2019)"]);
    }

    #[tokio::test]
    async fn subscription_platforms_quote_zero_with_an_inclusion_note() {
        let source = StubSource { summaries: vec![summary("t1", "Alpha")], failing_id: None };
        let adapter = EntertainmentAdapter::new(Arc::new(source), 4, RandomSource::seeded(4));
        let category = entertainment();
        let request = SearchRequest::new("entertainment", "alpha");

        let items = adapter.fetch(&request, &category).await.expect("stub source");
        let offers = &items[0].offers;

        let netflix = offers.iter().find(|offer| offer.platform.id.0 == "netflix").expect("netflix");
        assert_eq!(netflix.price, Decimal::ZERO);
        assert!(!netflix.special_offers.is_empty());

        let bookmyshow =
            offers.iter().find(|offer| offer.platform.id.0 == "bookmyshow").expect("bookmyshow");
        assert!(bookmyshow.price > Decimal::ZERO);
        assert!(offers.iter().all(|offer| offer.rating == 8.2));
    }

    #[tokio::test]
    async fn empty_search_results_are_no_results_not_failure() {
        let source = StubSource { summaries: Vec::new(), failing_id: None };
        let adapter = EntertainmentAdapter::new(Arc::new(source), 4, RandomSource::seeded(4));
        let category = entertainment();
        let request = SearchRequest::new("entertainment", "unreleased");

        let items = adapter.fetch(&request, &category).await.expect("stub source");
        assert!(items.is_empty());
    }
}
