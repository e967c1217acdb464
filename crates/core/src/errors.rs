use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("a comparison result requires at least one offer")]
    EmptyOffers,
    #[error("offer from `{platform}` carries a negative price: {price}")]
    NegativePrice { platform: String, price: Decimal },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::DomainError;

    #[test]
    fn negative_price_error_names_the_platform() {
        let error = DomainError::NegativePrice {
            platform: "quickkart".to_string(),
            price: Decimal::from(-5),
        };
        let message = error.to_string();
        assert!(message.contains("quickkart"));
        assert!(message.contains("-5"));
    }
}
