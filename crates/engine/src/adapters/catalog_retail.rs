//! Generic catalog adapter shared by every retail product category. The
//! same adapter instance serves electronics, fashion, groceries and the
//! rest: only the category metadata it is handed differs.

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;

use comparo_core::fallback::placeholder_image;
use comparo_core::normalize::{base_price_for_query, days_range, platform_price, query_seed, title_case};
use comparo_core::{Category, Offer, RandomSource, SearchRequest};

use crate::adapter::{CandidateItem, SourceAdapter};
use crate::adapters::{review_count, round_rating};
use crate::errors::AdapterError;

const PRICE_JITTER: f64 = 0.06;
const VARIANTS: &[&str] = &["Pro", "Lite", "Max", "Plus", "Classic", "Mini", "Prime Edition"];

pub struct CatalogRetailAdapter {
    randomness: RandomSource,
}

impl CatalogRetailAdapter {
    pub fn new(randomness: RandomSource) -> Self {
        Self { randomness }
    }
}

#[async_trait]
impl SourceAdapter for CatalogRetailAdapter {
    fn name(&self) -> &'static str {
        "catalog-retail"
    }

    async fn fetch(
        &self,
        request: &SearchRequest,
        category: &Category,
    ) -> Result<Vec<CandidateItem>, AdapterError> {
        let query = request.trimmed_query();
        let seed = query_seed(query);
        let base = base_price_for_query(query, category.price_range);
        let mut rng = self.randomness.fork(seed).rng();

        let mut items = Vec::with_capacity(category.result_cap);
        for index in 0..category.result_cap {
            let name = if index == 0 {
                title_case(query)
            } else {
                format!("{} {}", title_case(query), VARIANTS[(index - 1) % VARIANTS.len()])
            };
            // Variants drift upward from the query's base price.
            let item_base = base * Decimal::from(100 + 12 * index as u32) / Decimal::from(100u32);

            let offers: Vec<Offer> = category
                .platforms
                .iter()
                .map(|platform| {
                    let price =
                        platform_price(item_base, platform.price_multiplier, PRICE_JITTER, &mut rng);
                    let delivery =
                        platform.delivery_time.clone().unwrap_or_else(|| days_range(2, 5));
                    let rating = round_rating(
                        platform.rating.unwrap_or_else(|| rng.gen_range(3.8..=4.8)),
                    );

                    Offer::new(platform.clone(), price, delivery)
                        .with_availability(rng.gen_bool(0.94))
                        .with_rating(rating)
                        .with_reviews(review_count(&name, &platform.id))
                        .with_special_offers(platform.discounts.clone())
                })
                .collect();

            items.push(CandidateItem::new(name.clone(), placeholder_image(&name), offers));
        }

        Ok(items)
    }
}
