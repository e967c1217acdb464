//! Synthesizes a plausible comparison result from category metadata alone,
//! for categories with no live source or whose source failed.

use rand::Rng;
use rust_decimal::Decimal;

use crate::domain::category::Category;
use crate::domain::comparison::ComparisonResult;
use crate::domain::offer::Offer;
use crate::normalize::{days_range, decimal_between};

const FALLBACK_RATING_LOW: f64 = 3.5;
const FALLBACK_RATING_HIGH: f64 = 5.0;

/// Produce exactly one comparison result named after the query (or the
/// category's default item name for a blank query), with one offer per known
/// platform. Total: a category with zero platforms yields an empty list
/// rather than a result with no offers.
pub fn synthesize(
    category: &Category,
    query: &str,
    rng: &mut impl Rng,
) -> Vec<ComparisonResult> {
    if category.platforms.is_empty() {
        return Vec::new();
    }

    let trimmed = query.trim();
    let name =
        if trimmed.is_empty() { category.default_item_name.clone() } else { trimmed.to_string() };
    let (low, high) = category.price_range;

    let offers: Vec<Offer> = category
        .platforms
        .iter()
        .map(|platform| {
            let price = decimal_between(rng, low, high);
            let rating = platform
                .rating
                .unwrap_or_else(|| rng.gen_range(FALLBACK_RATING_LOW..=FALLBACK_RATING_HIGH));
            let delivery =
                platform.delivery_time.clone().unwrap_or_else(|| days_range(2, 4));
            let special_offers: Vec<String> =
                platform.discounts.first().cloned().into_iter().collect();

            Offer::new(platform.clone(), price, delivery)
                .with_rating(rating)
                .with_special_offers(special_offers)
        })
        .collect();

    let id = format!("{}-fallback", category.id);
    match ComparisonResult::new(id, name.clone(), placeholder_image(&name), offers) {
        Ok(result) => vec![result],
        // Unreachable with a non-empty platform list; stay total regardless.
        Err(_) => Vec::new(),
    }
}

pub fn placeholder_image(name: &str) -> String {
    let label: String = name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '+' })
        .collect();
    format!("https://placehold.co/300x200?text={label}")
}
