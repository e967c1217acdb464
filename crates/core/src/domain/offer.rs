use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::platform::Platform;

/// One platform's quote for one comparable item. A price of zero means
/// free/included (e.g. a title covered by a streaming subscription), not
/// missing data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub platform: Platform,
    pub price: Decimal,
    pub availability: bool,
    /// Human-readable delivery promise. Adapters should stick to the
    /// controlled vocabulary in [`crate::normalize`] ("Instant", "N mins",
    /// "N-M days") so the recommendation heuristic stays predictable.
    pub estimated_delivery: String,
    pub special_offers: Vec<String>,
    /// 0-5 or 0-10 depending on the source; consistent within one result.
    pub rating: f64,
    pub reviews: u64,
}

impl Offer {
    pub fn new(platform: Platform, price: Decimal, estimated_delivery: impl Into<String>) -> Self {
        Self {
            platform,
            price,
            availability: true,
            estimated_delivery: estimated_delivery.into(),
            special_offers: Vec::new(),
            rating: 0.0,
            reviews: 0,
        }
    }

    pub fn with_availability(mut self, availability: bool) -> Self {
        self.availability = availability;
        self
    }

    pub fn with_special_offers(mut self, special_offers: Vec<String>) -> Self {
        self.special_offers = special_offers;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_reviews(mut self, reviews: u64) -> Self {
        self.reviews = reviews;
        self
    }
}
