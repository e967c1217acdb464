//! Cross-platform recommendation selection: best price, best rating, and the
//! fastest-delivery heuristic.

use crate::domain::comparison::Recommendation;
use crate::domain::offer::Offer;
use crate::normalize::delivery_speed;

pub trait RecommendationEngine: Send + Sync {
    fn recommend(&self, offers: &[Offer]) -> Option<Recommendation>;
}

#[derive(Default)]
pub struct HeuristicRecommendationEngine;

impl RecommendationEngine for HeuristicRecommendationEngine {
    fn recommend(&self, offers: &[Offer]) -> Option<Recommendation> {
        recommend(offers)
    }
}

/// Select the recommendation triplet for one item's offers.
///
/// - best price: minimum `price`, ties broken by first occurrence.
/// - best rated: maximum `rating`, ties broken by first occurrence.
/// - fastest delivery: the first offer whose `estimated_delivery` contains
///   "instant" or "min" (case-insensitive); the first offer otherwise. This
///   is deliberate string containment, not unit-aware parsing: callers that
///   need strict numeric delivery comparison must pre-normalize their
///   delivery strings into durations before building offers.
///
/// Returns `None` for an empty offer list.
pub fn recommend(offers: &[Offer]) -> Option<Recommendation> {
    if offers.is_empty() {
        return None;
    }

    let mut best_price = 0;
    let mut best_rated = 0;
    for (index, offer) in offers.iter().enumerate().skip(1) {
        if offer.price < offers[best_price].price {
            best_price = index;
        }
        if offer.rating > offers[best_rated].rating {
            best_rated = index;
        }
    }

    let fastest_delivery = offers
        .iter()
        .position(|offer| delivery_speed(&offer.estimated_delivery).is_fast())
        .unwrap_or(0);

    Some(Recommendation { best_price, fastest_delivery, best_rated })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::offer::Offer;
    use crate::domain::platform::Platform;

    use super::{recommend, HeuristicRecommendationEngine, RecommendationEngine};

    fn offer(id: &str, price: i64, rating: f64, delivery: &str) -> Offer {
        let platform = Platform::new(id, id.to_uppercase(), format!("https://{id}.example"), "#000");
        Offer::new(platform, Decimal::from(price), delivery).with_rating(rating)
    }

    #[test]
    fn empty_offers_yield_no_recommendation() {
        assert!(recommend(&[]).is_none());
    }

    #[test]
    fn best_price_and_rating_break_ties_by_first_occurrence() {
        let offers = vec![
            offer("a", 150, 4.5, "2-3 days"),
            offer("b", 150, 4.5, "2-3 days"),
            offer("c", 180, 4.9, "2-3 days"),
        ];
        let recommendation = recommend(&offers).expect("non-empty");
        assert_eq!(recommendation.best_price, 0);
        assert_eq!(recommendation.best_rated, 2);

        let tied = vec![offer("a", 150, 4.9, "2-3 days"), offer("b", 120, 4.9, "2-3 days")];
        let recommendation = recommend(&tied).expect("non-empty");
        assert_eq!(recommendation.best_price, 1);
        assert_eq!(recommendation.best_rated, 0);
    }

    #[test]
    fn fastest_delivery_picks_first_instant_or_minute_offer() {
        let offers = vec![
            offer("a", 100, 4.0, "4-7 days"),
            offer("b", 120, 4.0, "25-35 mins"),
            offer("c", 130, 4.0, "Instant"),
        ];
        let recommendation = recommend(&offers).expect("non-empty");
        // First fast-class match wins; "Instant" later in the list does not
        // outrank an earlier minute-range offer.
        assert_eq!(recommendation.fastest_delivery, 1);
    }

    #[test]
    fn fastest_delivery_defaults_to_first_offer_without_a_fast_match() {
        let offers = vec![offer("a", 100, 4.0, "4-7 days"), offer("b", 90, 4.2, "2-3 days")];
        let recommendation = recommend(&offers).expect("non-empty");
        assert_eq!(recommendation.fastest_delivery, 0);
    }

    #[test]
    fn engine_trait_matches_the_free_function() {
        let offers = vec![offer("a", 100, 4.0, "Instant"), offer("b", 90, 4.2, "2-3 days")];
        let engine = HeuristicRecommendationEngine;
        assert_eq!(engine.recommend(&offers), recommend(&offers));
    }
}
