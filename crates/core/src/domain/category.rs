use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::platform::Platform;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub String);

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only metadata for one searchable category: the platforms that carry
/// it, keyword hints for query routing, and the bounds the fallback generator
/// and synthetic adapters price against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub platforms: Vec<Platform>,
    pub known_keywords: Vec<String>,
    /// Maximum candidate items expanded into full comparison results.
    pub result_cap: usize,
    /// Plausible price band (low, high) in whole currency units.
    pub price_range: (Decimal, Decimal),
    /// Item name used when a query is blank.
    pub default_item_name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: CategoryId(id.into()),
            default_item_name: name.clone(),
            name,
            platforms: Vec::new(),
            known_keywords: Vec::new(),
            result_cap: 5,
            price_range: (Decimal::from(100u32), Decimal::from(600u32)),
        }
    }

    pub fn with_platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = platforms;
        self
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.known_keywords = keywords.iter().map(|keyword| (*keyword).to_string()).collect();
        self
    }

    pub fn with_result_cap(mut self, result_cap: usize) -> Self {
        self.result_cap = result_cap;
        self
    }

    pub fn with_price_range(mut self, low: u32, high: u32) -> Self {
        self.price_range = (Decimal::from(low), Decimal::from(high));
        self
    }

    pub fn with_default_item_name(mut self, default_item_name: impl Into<String>) -> Self {
        self.default_item_name = default_item_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::Category;

    #[test]
    fn default_item_name_tracks_display_name_unless_overridden() {
        let category = Category::new("groceries", "Groceries");
        assert_eq!(category.default_item_name, "Groceries");

        let category = Category::new("groceries", "Groceries").with_default_item_name("Essentials");
        assert_eq!(category.default_item_name, "Essentials");
    }

    #[test]
    fn price_range_is_stored_in_whole_units() {
        let category = Category::new("laptops", "Laptops").with_price_range(25_000, 180_000);
        assert_eq!(category.price_range.0, Decimal::from(25_000u32));
        assert_eq!(category.price_range.1, Decimal::from(180_000u32));
    }
}
