use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::{PricingBreakdown, PricingRequest, RouteKey};

fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("positive").with_message("must be greater than zero".into()))
    }
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(ValidationError::new("non_negative").with_message("must not be negative".into()))
    } else {
        Ok(())
    }
}

/// Freight quote request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Two-letter origin region code
    #[schema(example = "MG")]
    #[validate(length(equal = 2, message = "must be a 2-letter region code"))]
    pub origin_region: String,
    #[schema(example = "METROPOLITANA")]
    #[validate(length(min = 1, max = 50, message = "must be 1–50 characters"))]
    pub origin_classification: String,
    #[schema(example = "SP")]
    #[validate(length(equal = 2, message = "must be a 2-letter region code"))]
    pub destination_region: String,
    #[schema(example = "CAPITAL")]
    #[validate(length(min = 1, max = 50, message = "must be 1–50 characters"))]
    pub destination_classification: String,
    /// Shipment weight in kg
    #[schema(value_type = f64, example = 580)]
    #[validate(custom(function = "positive"))]
    pub weight: Decimal,
    /// Declared merchandise value in major currency units
    #[schema(value_type = f64, example = 17500)]
    #[validate(custom(function = "non_negative"))]
    pub merchandise_value: Decimal,
    #[serde(default)]
    pub hazardous: bool,
    #[serde(default)]
    pub difficult_delivery: bool,
}

impl From<QuoteRequest> for PricingRequest {
    fn from(req: QuoteRequest) -> Self {
        let route = RouteKey::new(
            req.origin_region,
            req.origin_classification,
            req.destination_region,
            req.destination_classification,
        );
        PricingRequest::new(route, req.weight, req.merchandise_value)
            .with_hazardous(req.hazardous)
            .with_difficult_delivery(req.difficult_delivery)
    }
}

/// Itemized freight price in major currency units, two decimals
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 336.14)]
    pub weight_charge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 69.60)]
    pub ad_valorem: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 21.09)]
    pub dispatch: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 13.18)]
    pub toll: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 0)]
    pub hazardous: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 0)]
    pub tde1: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 0)]
    pub tde2: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 440.01)]
    pub total: Decimal,
}

impl From<PricingBreakdown> for QuoteResponse {
    fn from(b: PricingBreakdown) -> Self {
        Self {
            weight_charge: b.weight_charge,
            ad_valorem: b.ad_valorem,
            dispatch: b.dispatch,
            toll: b.toll,
            hazardous: b.hazardous,
            tde1: b.tde1,
            tde2: b.tde2,
            total: b.total,
        }
    }
}
