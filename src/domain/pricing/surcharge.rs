//! Surcharge computations
//!
//! Every function works in cents on un-grossed amounts. Percent-of-base
//! surcharges (hazardous, TDE) take the resolved base charge as input.

use rust_decimal::Decimal;

use super::in_range;
use super::policy::PERCENT_SCALE;
use super::request::PricingRequest;
use crate::domain::tariff::{AdValorem, DifficultDelivery, Hazardous, TariffRow, Toll};
use crate::domain::DomainResult;

/// Weight threshold (kg, inclusive) separating the toll fixed fee from the
/// per-kg toll, and the two hazardous floors.
pub const SURCHARGE_WEIGHT_THRESHOLD: i64 = 100;

fn up_to_threshold(weight_kg: Decimal) -> bool {
    weight_kg <= Decimal::from(SURCHARGE_WEIGHT_THRESHOLD)
}

fn percent_of(base: Decimal, percent: i64) -> DomainResult<Decimal> {
    let scaled = in_range(base.checked_mul(Decimal::from(percent)))?;
    in_range(scaled.checked_div(Decimal::from(PERCENT_SCALE)))
}

/// Surcharge amounts in cents, before gross-up and rounding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surcharges {
    pub ad_valorem: Decimal,
    pub dispatch: Decimal,
    pub toll: Decimal,
    pub hazardous: Decimal,
    pub tde1: Decimal,
    pub tde2: Decimal,
}

impl Surcharges {
    pub fn compute(
        row: &TariffRow,
        base_charge: Decimal,
        request: &PricingRequest,
        ad_valorem_scale: u32,
    ) -> DomainResult<Self> {
        let weight = request.weight_kg;
        let (tde1, tde2) = if request.difficult_delivery {
            (
                tde1(&row.difficult_delivery, base_charge)?,
                tde2(&row.difficult_delivery, base_charge)?,
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };
        let hazardous = if request.hazardous {
            hazardous(&row.hazardous, base_charge, weight)?
        } else {
            Decimal::ZERO
        };

        Ok(Self {
            ad_valorem: ad_valorem(&row.ad_valorem, request.merchandise_value, ad_valorem_scale)?,
            dispatch: Decimal::from(row.dispatch_fee),
            toll: toll(&row.toll, weight)?,
            hazardous,
            tde1,
            tde2,
        })
    }
}

/// `max(value_cents * rate / scale, min)`; `merchandise_value` is in major
/// units.
pub fn ad_valorem(
    params: &AdValorem,
    merchandise_value: Decimal,
    scale: u32,
) -> DomainResult<Decimal> {
    let value_cents = in_range(merchandise_value.checked_mul(Decimal::ONE_HUNDRED))?;
    let scaled = in_range(value_cents.checked_mul(Decimal::from(params.rate)))?;
    let calc = in_range(scaled.checked_div(Decimal::from(scale)))?;
    Ok(calc.max(Decimal::from(params.min)))
}

/// Fixed fee up to the threshold, per-kg rate times raw weight above it.
pub fn toll(params: &Toll, weight_kg: Decimal) -> DomainResult<Decimal> {
    if up_to_threshold(weight_kg) {
        Ok(Decimal::from(params.fixed))
    } else {
        in_range(Decimal::from(params.per_kg).checked_mul(weight_kg))
    }
}

/// Percent of base charge, floored by the band's minimum.
pub fn hazardous(
    params: &Hazardous,
    base_charge: Decimal,
    weight_kg: Decimal,
) -> DomainResult<Decimal> {
    let floor = if up_to_threshold(weight_kg) {
        params.floor_up_to_100
    } else {
        params.floor_above_100
    };
    Ok(percent_of(base_charge, params.percent)?.max(Decimal::from(floor)))
}

/// Percent of base charge clamped to `[tde1_min, tde1_max]`. The floor is
/// applied last, so a row with `max < min` yields `min`.
pub fn tde1(params: &DifficultDelivery, base_charge: Decimal) -> DomainResult<Decimal> {
    Ok(percent_of(base_charge, params.tde1_percent)?
        .min(Decimal::from(params.tde1_max))
        .max(Decimal::from(params.tde1_min)))
}

/// Percent of base charge with a floor only.
pub fn tde2(params: &DifficultDelivery, base_charge: Decimal) -> DomainResult<Decimal> {
    Ok(percent_of(base_charge, params.tde2_percent)?.max(Decimal::from(params.tde2_min)))
}
