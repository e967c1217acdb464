//! Ride hailing adapter: one candidate item per ride class, fared across
//! the configured operators with pickup ETAs in minutes.

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;

use comparo_core::fallback::placeholder_image;
use comparo_core::normalize::{minutes, platform_price, query_seed, title_case};
use comparo_core::{Category, Offer, RandomSource, SearchRequest};

use crate::adapter::{CandidateItem, SourceAdapter};
use crate::adapters::{review_count, round_rating};
use crate::errors::AdapterError;

const FARE_JITTER: f64 = 0.12;
const RIDE_CLASSES: &[(&str, u32)] =
    &[("Bike", 60), ("Auto", 90), ("Mini", 140), ("Sedan", 190), ("SUV", 260)];

pub struct RideHailingAdapter {
    randomness: RandomSource,
}

impl RideHailingAdapter {
    pub fn new(randomness: RandomSource) -> Self {
        Self { randomness }
    }
}

#[async_trait]
impl SourceAdapter for RideHailingAdapter {
    fn name(&self) -> &'static str {
        "ride-hailing"
    }

    async fn fetch(
        &self,
        request: &SearchRequest,
        category: &Category,
    ) -> Result<Vec<CandidateItem>, AdapterError> {
        let destination = title_case(request.trimmed_query());
        let location = request.location_or_unspecified();
        let seed = query_seed(&format!("{destination}@{location}"));
        // Rough trip-length factor derived from the route text.
        let distance_factor = Decimal::from(1 + seed % 3);
        let mut rng = self.randomness.fork(seed).rng();

        let count = category.result_cap.min(RIDE_CLASSES.len());
        let mut items = Vec::with_capacity(count);
        for (class, base_fare) in RIDE_CLASSES.iter().take(count) {
            let name = format!("{class} to {destination}");
            let class_base = Decimal::from(*base_fare) * distance_factor;

            let offers: Vec<Offer> = category
                .platforms
                .iter()
                .map(|platform| {
                    let fare =
                        platform_price(class_base, platform.price_multiplier, FARE_JITTER, &mut rng);
                    let eta = minutes(rng.gen_range(2..=9));
                    let rating = round_rating(
                        platform.rating.unwrap_or_else(|| rng.gen_range(3.7..=4.6)),
                    );

                    Offer::new(platform.clone(), fare, eta)
                        .with_rating(rating)
                        .with_reviews(review_count(&name, &platform.id))
                        .with_special_offers(
                            platform.discounts.first().cloned().into_iter().collect(),
                        )
                })
                .collect();

            items.push(CandidateItem::new(name.clone(), placeholder_image(class), offers));
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use comparo_core::normalize::{delivery_speed, DeliverySpeed};
    use comparo_core::{CategoryCatalog, CategoryId, RandomSource, SearchRequest};

    use crate::adapter::SourceAdapter;

    use super::RideHailingAdapter;

    fn ride_hailing() -> comparo_core::Category {
        CategoryCatalog::builtin()
            .find(&CategoryId("ride-hailing".to_string()))
            .expect("builtin ride-hailing")
            .clone()
    }

    #[tokio::test]
    async fn one_item_per_ride_class_with_minute_etas() {
        let adapter = RideHailingAdapter::new(RandomSource::seeded(6));
        let category = ride_hailing();
        let request =
            SearchRequest::new("ride-hailing", "airport").with_location("HSR Layout");

        let items = adapter.fetch(&request, &category).await.expect("synthetic source");
        assert_eq!(items.len(), category.result_cap);
        assert_eq!(items[0].name, "Bike to Airport");

        for item in &items {
            assert_eq!(item.offers.len(), category.platforms.len());
            for offer in &item.offers {
                assert_eq!(delivery_speed(&offer.estimated_delivery), DeliverySpeed::Minutes);
            }
        }
    }

    #[tokio::test]
    async fn larger_classes_cost_more_on_average() {
        let adapter = RideHailingAdapter::new(RandomSource::seeded(6));
        let category = ride_hailing();
        let request = SearchRequest::new("ride-hailing", "railway station");

        let items = adapter.fetch(&request, &category).await.expect("synthetic source");
        let bike_min = items[0].offers.iter().map(|offer| offer.price).min().expect("offers");
        let suv_max =
            items.last().expect("items").offers.iter().map(|offer| offer.price).max().expect("offers");
        assert!(suv_max > bike_min);
    }
}
