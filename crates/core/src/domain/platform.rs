use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformId(pub String);

impl std::fmt::Display for PlatformId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static metadata for one data provider/retailer. Immutable reference data,
/// sourced from the category catalog and safe for concurrent reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub name: String,
    pub url: String,
    pub color: String,
    pub features: Vec<String>,
    /// Relative price positioning against the category base price.
    pub price_multiplier: Decimal,
    /// Default delivery promise, used when a source reports none.
    pub delivery_time: Option<String>,
    /// Static editorial rating, used when a source reports none.
    pub rating: Option<f64>,
    pub discounts: Vec<String>,
}

impl Platform {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: PlatformId(id.into()),
            name: name.into(),
            url: url.into(),
            color: color.into(),
            features: Vec::new(),
            price_multiplier: Decimal::ONE,
            delivery_time: None,
            rating: None,
            discounts: Vec::new(),
        }
    }

    pub fn with_features(mut self, features: &[&str]) -> Self {
        self.features = features.iter().map(|feature| (*feature).to_string()).collect();
        self
    }

    pub fn with_multiplier(mut self, multiplier: Decimal) -> Self {
        self.price_multiplier = multiplier;
        self
    }

    pub fn with_delivery(mut self, delivery_time: impl Into<String>) -> Self {
        self.delivery_time = Some(delivery_time.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_discounts(mut self, discounts: &[&str]) -> Self {
        self.discounts = discounts.iter().map(|discount| (*discount).to_string()).collect();
        self
    }
}
