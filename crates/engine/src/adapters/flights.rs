//! Flights adapter: synthesizes itineraries for a route query and fares
//! them across the configured travel platforms. Structured fields (dates,
//! passenger count) shape the output but are all optional.

use async_trait::async_trait;
use rust_decimal::Decimal;

use comparo_core::fallback::placeholder_image;
use comparo_core::normalize::{base_price_for_query, platform_price, query_seed, title_case};
use comparo_core::{Category, Offer, RandomSource, SearchRequest};

use crate::adapter::{CandidateItem, SourceAdapter};
use crate::adapters::review_count;
use crate::errors::AdapterError;

const FARE_JITTER: f64 = 0.05;
const AIRLINES: &[(&str, &str)] = &[
    ("IndiGo", "6E"),
    ("Air India", "AI"),
    ("Vistara", "UK"),
    ("Akasa Air", "QP"),
    ("SpiceJet", "SG"),
];

pub struct FlightsAdapter {
    randomness: RandomSource,
}

impl FlightsAdapter {
    pub fn new(randomness: RandomSource) -> Self {
        Self { randomness }
    }
}

#[async_trait]
impl SourceAdapter for FlightsAdapter {
    fn name(&self) -> &'static str {
        "flights"
    }

    async fn fetch(
        &self,
        request: &SearchRequest,
        category: &Category,
    ) -> Result<Vec<CandidateItem>, AdapterError> {
        let route = title_case(request.trimmed_query());
        let seed = query_seed(request.trimmed_query());
        let passengers = u64::from(request.fields.passengers.unwrap_or(1).max(1));
        let date_label = request
            .fields
            .departure_date
            .map(|date| date.format("%d %b").to_string())
            .unwrap_or_else(|| "any date".to_string());

        let per_seat = base_price_for_query(request.trimmed_query(), category.price_range);
        let base_fare = per_seat * Decimal::from(passengers);
        let mut rng = self.randomness.fork(seed).rng();

        let count = category.result_cap.min(AIRLINES.len());
        let mut items = Vec::with_capacity(count);
        for (index, (airline, code)) in AIRLINES.iter().take(count).enumerate() {
            let flight_number = 200 + (seed.wrapping_add(index as u64 * 97)) % 700;
            let duration_mins = 75 + (seed.wrapping_add(index as u64 * 37)) % 150;
            let duration = format!("{}h {:02}m", duration_mins / 60, duration_mins % 60);
            let name = format!("{airline} {code}-{flight_number} · {route} · {date_label}");

            let offers: Vec<Offer> = category
                .platforms
                .iter()
                .map(|platform| {
                    let fare =
                        platform_price(base_fare, platform.price_multiplier, FARE_JITTER, &mut rng);

                    Offer::new(platform.clone(), fare, duration.clone())
                        .with_rating(platform.rating.unwrap_or(4.0))
                        .with_reviews(review_count(&name, &platform.id))
                        .with_special_offers(
                            platform.discounts.first().cloned().into_iter().collect(),
                        )
                })
                .collect();

            items.push(CandidateItem::new(name.clone(), placeholder_image(airline), offers));
        }

        Ok(items)
    }
}
