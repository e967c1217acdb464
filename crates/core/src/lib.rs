pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fallback;
pub mod normalize;
pub mod random;
pub mod recommend;

pub use catalog::{CatalogError, CategoryCatalog};
pub use domain::category::{Category, CategoryId};
pub use domain::comparison::{ComparisonResult, Recommendation};
pub use domain::offer::Offer;
pub use domain::platform::{Platform, PlatformId};
pub use domain::search::{SearchRequest, StructuredFields};
pub use errors::DomainError;
pub use random::RandomSource;
pub use recommend::{HeuristicRecommendationEngine, RecommendationEngine};
