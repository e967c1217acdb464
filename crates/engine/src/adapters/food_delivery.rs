//! Food delivery adapter: synthesizes dish variants for a query and prices
//! them across the configured delivery platforms.

use async_trait::async_trait;
use rand::Rng;

use comparo_core::fallback::placeholder_image;
use comparo_core::normalize::{base_price_for_query, platform_price, query_seed, title_case};
use comparo_core::{Category, Offer, RandomSource, SearchRequest};

use crate::adapter::{CandidateItem, SourceAdapter};
use crate::adapters::{review_count, round_rating};
use crate::errors::AdapterError;

const PRICE_JITTER: f64 = 0.08;
const DISH_STYLES: &[&str] =
    &["Special", "Classic", "Tandoori", "Cheese Burst", "Homestyle", "Jumbo", "Combo"];

pub struct FoodDeliveryAdapter {
    randomness: RandomSource,
}

impl FoodDeliveryAdapter {
    pub fn new(randomness: RandomSource) -> Self {
        Self { randomness }
    }
}

#[async_trait]
impl SourceAdapter for FoodDeliveryAdapter {
    fn name(&self) -> &'static str {
        "food-delivery"
    }

    async fn fetch(
        &self,
        request: &SearchRequest,
        category: &Category,
    ) -> Result<Vec<CandidateItem>, AdapterError> {
        let query = request.trimmed_query();
        let location = request.location_or_unspecified();
        let seed = query_seed(&format!("{query}@{location}"));
        let base = base_price_for_query(query, category.price_range);
        let mut rng = self.randomness.fork(seed).rng();

        // One plain listing plus styled variants, up to the category cap.
        let count = category.result_cap.min(DISH_STYLES.len() + 1);
        let mut items = Vec::with_capacity(count);
        for index in 0..count {
            let name = if index == 0 {
                title_case(query)
            } else {
                format!("{} {}", DISH_STYLES[index - 1], title_case(query))
            };

            let offers: Vec<Offer> = category
                .platforms
                .iter()
                .map(|platform| {
                    let price =
                        platform_price(base, platform.price_multiplier, PRICE_JITTER, &mut rng);
                    let eta = platform
                        .delivery_time
                        .clone()
                        .unwrap_or_else(|| comparo_core::normalize::minutes_range(25, 35));
                    let rating = round_rating(rng.gen_range(3.6..=4.8));

                    let mut special_offers: Vec<String> =
                        platform.discounts.first().cloned().into_iter().collect();
                    special_offers.push(format!("Rated {rating:.1} by diners"));

                    Offer::new(platform.clone(), price, eta)
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
