//! Mutual funds adapter: synthesizes fund schemes matching a query across
//! the configured investment platforms. "Price" is the minimum SIP amount;
//! onboarding is paperless, so delivery is always instant.

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;

use comparo_core::fallback::placeholder_image;
use comparo_core::normalize::{base_price_for_query, query_seed, title_case, DELIVERY_INSTANT};
use comparo_core::{Category, Offer, RandomSource, SearchRequest};

use crate::adapter::{CandidateItem, SourceAdapter};
use crate::adapters::{review_count, round_rating};
use crate::errors::AdapterError;

const SCHEME_KINDS: &[&str] = &[
    "Bluechip Fund",
    "Flexi Cap Fund",
    "Index Fund",
    "ELSS Tax Saver",
    "Mid Cap Fund",
    "Balanced Advantage Fund",
];

pub struct MutualFundsAdapter {
    randomness: RandomSource,
}

impl MutualFundsAdapter {
    pub fn new(randomness: RandomSource) -> Self {
        Self { randomness }
    }
}

#[async_trait]
impl SourceAdapter for MutualFundsAdapter {
    fn name(&self) -> &'static str {
        "mutual-funds"
    }

    async fn fetch(
        &self,
        request: &SearchRequest,
        category: &Category,
    ) -> Result<Vec<CandidateItem>, AdapterError> {
        let house = title_case(request.trimmed_query());
        let seed = query_seed(request.trimmed_query());
        let base_sip = base_price_for_query(request.trimmed_query(), category.price_range);
        let mut rng = self.randomness.fork(seed).rng();

        let count = category.result_cap.min(SCHEME_KINDS.len());
        let mut items = Vec::with_capacity(count);
        for kind in SCHEME_KINDS.iter().take(count) {
            let name = format!("{house} {kind}");
            // SIP minimums come in round steps of 100.
            let sip = (base_sip / Decimal::from(100u32)).round_dp(0) * Decimal::from(100u32);
            let sip = sip.max(Decimal::from(100u32));

            let offers: Vec<Offer> = category
                .platforms
                .iter()
                .map(|platform| {
                    let rating = round_rating(
                        platform.rating.unwrap_or_else(|| rng.gen_range(3.7..=4.9)),
                    );
                    let mut special_offers: Vec<String> =
                        platform.discounts.first().cloned().into_iter().collect();
                    special_offers.push("Direct plan · zero commission".to_string());

                    let delivery = platform
                        .delivery_time
                        .clone()
                        .unwrap_or_else(|| DELIVERY_INSTANT.to_string());

                    Offer::new(platform.clone(), sip, delivery)
                        .with_rating(rating)
                        .with_reviews(review_count(&name, &platform.id))
                        .with_special_offers(special_offers)
                })
                .collect();

            items.push(CandidateItem::new(name.clone(), placeholder_image(&name), offers));
        }

        Ok(items)
    }
}
