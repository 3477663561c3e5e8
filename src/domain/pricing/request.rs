//! Pricing request value

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::tariff::RouteKey;
use crate::domain::{DomainError, DomainResult};

/// A single quote request. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub route: RouteKey,
    /// Shipment weight in kg, strictly positive
    pub weight_kg: Decimal,
    /// Declared merchandise value in major currency units
    pub merchandise_value: Decimal,
    #[serde(default)]
    pub hazardous: bool,
    #[serde(default)]
    pub difficult_delivery: bool,
}

impl PricingRequest {
    pub fn new(route: RouteKey, weight_kg: Decimal, merchandise_value: Decimal) -> Self {
        Self {
            route,
            weight_kg,
            merchandise_value,
            hazardous: false,
            difficult_delivery: false,
        }
    }

    pub fn with_hazardous(mut self, hazardous: bool) -> Self {
        self.hazardous = hazardous;
        self
    }

    pub fn with_difficult_delivery(mut self, difficult_delivery: bool) -> Self {
        self.difficult_delivery = difficult_delivery;
        self
    }

    /// Boundary validation for callers that do not go through the HTTP DTO.
    pub fn validate(&self) -> DomainResult<()> {
        self.route.validate()?;
        if self.weight_kg <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "weight must be greater than zero".to_string(),
            ));
        }
        if self.merchandise_value < Decimal::ZERO {
            return Err(DomainError::Validation(
                "merchandise value must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
