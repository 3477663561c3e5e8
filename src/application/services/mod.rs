//! Application services

mod pricing;

pub use pricing::PricingEngine;
