pub mod pricing;
pub mod tariff;

// Re-export commonly used types
pub use pricing::{
    GrossUpPolicy, PricingBreakdown, PricingPolicy, PricingRequest, RoundingMode, WeightTier,
};
pub use tariff::{RouteKey, TariffRepository, TariffRow};

// Re-export DomainError from support for convenience
pub use crate::support::errors::{DomainError, DomainResult};
