//! Freight pricing
//!
//! Pure computation over an immutable [`TariffRow`]: weight band resolution,
//! surcharges, optional gross-up, and a single rounding step per component.

pub mod breakdown;
pub mod policy;
pub mod request;
pub mod surcharge;
pub mod weight_tier;

pub use breakdown::{MinorCharges, PricingBreakdown};
pub use policy::{GrossUpPolicy, PricingPolicy, RoundingMode, DEFAULT_AD_VALOREM_SCALE};
pub use request::PricingRequest;
pub use surcharge::Surcharges;
pub use weight_tier::WeightTier;

use rust_decimal::Decimal;

use crate::domain::tariff::TariffRow;
use crate::domain::{DomainError, DomainResult};

/// Unwrap a checked arithmetic step; overflow means the inputs are out of
/// the representable range.
fn in_range(value: Option<Decimal>) -> DomainResult<Decimal> {
    value.ok_or_else(|| DomainError::Validation("amount out of range".to_string()))
}

/// Price a request against an already resolved tariff row.
///
/// Gross-up covers the weight charge, ad valorem, dispatch and toll. The
/// hazardous and TDE surcharges are computed from the un-grossed base
/// charge and are never grossed up. Fails with
/// [`DomainError::Validation`] when an intermediate amount overflows.
pub fn price(
    row: &TariffRow,
    request: &PricingRequest,
    policy: &PricingPolicy,
) -> DomainResult<PricingBreakdown> {
    let base_charge = row.weight_tiers.base_charge(request.weight_kg)?;
    let surcharges = Surcharges::compute(row, base_charge, request, policy.ad_valorem_scale)?;
    let gross = &policy.gross_up;

    let charges = MinorCharges {
        weight_charge: gross.apply(base_charge)?,
        ad_valorem: gross.apply(surcharges.ad_valorem)?,
        dispatch: gross.apply(surcharges.dispatch)?,
        toll: gross.apply(surcharges.toll)?,
        hazardous: surcharges.hazardous,
        tde1: surcharges.tde1,
        tde2: surcharges.tde2,
    };

    Ok(PricingBreakdown::from_minor(&charges, policy.rounding))
}
