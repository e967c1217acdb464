use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::category::CategoryId;

/// Category-specific structured inputs. Every field is optional; adapters
/// must degrade gracefully when a field is absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredFields {
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub passengers: Option<u32>,
}

/// One user search: a category, free-text query, optional location, and any
/// structured fields the category understands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub category: CategoryId,
    pub query: String,
    pub location: Option<String>,
    pub fields: StructuredFields,
}

impl SearchRequest {
    pub fn new(category: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            category: CategoryId(category.into()),
            query: query.into(),
            location: None,
            fields: StructuredFields::default(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_fields(mut self, fields: StructuredFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }

    /// A blank query cannot be meaningfully searched against external
    /// sources; the aggregator routes it straight to the fallback generator.
    pub fn is_blank(&self) -> bool {
        self.trimmed_query().is_empty()
    }

    pub fn location_or_unspecified(&self) -> &str {
        self.location.as_deref().map(str::trim).filter(|value| !value.is_empty()).unwrap_or("unspecified")
    }
}
