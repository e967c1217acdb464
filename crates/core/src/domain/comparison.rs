use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::offer::Offer;
use crate::errors::DomainError;
use crate::recommend::recommend;

/// The recommendation triplet for one comparison result. Each field is an
/// index into the owning result's offer list, so every recommended offer is
/// by identity an element of that list, never a synthesized copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub best_price: usize,
    pub fastest_delivery: usize,
    pub best_rated: usize,
}

/// One comparable item bundled with all platform offers and the computed
/// recommendation. Constructed only through [`ComparisonResult::new`], which
/// rejects empty offer lists and negative prices, so a held value always
/// satisfies the comparison invariants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub id: String,
    pub name: String,
    pub image: String,
    offers: Vec<Offer>,
    recommendation: Recommendation,
}

impl ComparisonResult {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        image: impl Into<String>,
        offers: Vec<Offer>,
    ) -> Result<Self, DomainError> {
        if let Some(offer) = offers.iter().find(|offer| offer.price < Decimal::ZERO) {
            return Err(DomainError::NegativePrice {
                platform: offer.platform.id.0.clone(),
                price: offer.price,
            });
        }

        let recommendation = recommend(&offers).ok_or(DomainError::EmptyOffers)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            offers,
            recommendation,
        })
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn recommendation(&self) -> Recommendation {
        self.recommendation
    }

    pub fn best_price(&self) -> &Offer {
        &self.offers[self.recommendation.best_price]
    }

    pub fn fastest_delivery(&self) -> &Offer {
        &self.offers[self.recommendation.fastest_delivery]
    }

    pub fn best_rated(&self) -> &Offer {
        &self.offers[self.recommendation.best_rated]
    }
}
