//! Category adapters: dedicated sources for entertainment, food delivery,
//! cryptocurrency, flights, mutual funds, and ride hailing, plus the generic
//! retail adapter shared by all product categories.

pub mod catalog_retail;
pub mod crypto;
pub mod entertainment;
pub mod flights;
pub mod food_delivery;
pub mod mutual_funds;
pub mod ride_hailing;

pub use catalog_retail::CatalogRetailAdapter;
pub use crypto::{CryptoAdapter, HttpSpotPriceSource, SpotPriceSource};
pub use entertainment::{
    EntertainmentAdapter, HttpTitleSource, TitleDetail, TitleSource, TitleSummary,
};
pub use flights::FlightsAdapter;
pub use food_delivery::FoodDeliveryAdapter;
pub use mutual_funds::MutualFundsAdapter;
pub use ride_hailing::RideHailingAdapter;

use comparo_core::normalize::query_seed;
use comparo_core::PlatformId;

/// Stable review count for one item/platform pair, so repeated searches for
/// the same text show the same social proof.
pub(crate) fn review_count(item: &str, platform: &PlatformId) -> u64 {
    150 + query_seed(&format!("{item}:{platform}")) % 88_000
}

pub(crate) fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use comparo_core::PlatformId;

    use super::{review_count, round_rating};

    #[test]
    fn review_counts_are_stable_per_item_and_platform() {
        let platform = PlatformId("amazon".to_string());
        let first = review_count("Pixel 9", &platform);
        assert_eq!(first, review_count("Pixel 9", &platform));
        assert!(first >= 150);
        assert_ne!(first, review_count("Pixel 9", &PlatformId("flipkart".to_string())));
    }

    #[test]
    fn ratings_round_to_one_decimal() {
        assert_eq!(round_rating(4.4449), 4.4);
        assert_eq!(round_rating(4.45), 4.5);
    }
}
