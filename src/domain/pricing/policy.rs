//! Pricing policy: the configurable parts of the formula set.
//!
//! Two formula sets exist in production tariffs. One grosses up weight
//! charge, ad valorem, dispatch and toll by a tax divisor; the other does
//! not. Both are expressed through [`PricingPolicy`] instead of separate
//! code paths.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::in_range;
use crate::domain::{DomainError, DomainResult};

/// Default ad valorem scale: the stored rate is in ten-thousandths
/// (35 = 0.35%).
pub const DEFAULT_AD_VALOREM_SCALE: u32 = 10_000;

/// Scale of the hazardous and TDE percentages (25 = 25%).
pub const PERCENT_SCALE: u32 = 100;

/// Optional tax gross-up applied to the freight components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrossUpPolicy {
    #[default]
    None,
    /// Divide the grossed components by this factor (0 < d <= 1).
    Divisor(Decimal),
}

impl GrossUpPolicy {
    /// Build a divisor policy, rejecting factors outside `(0, 1]`.
    pub fn divisor(divisor: Decimal) -> DomainResult<Self> {
        if divisor <= Decimal::ZERO || divisor > Decimal::ONE {
            return Err(DomainError::Validation(format!(
                "gross-up divisor must be in (0, 1], got {}",
                divisor
            )));
        }
        Ok(Self::Divisor(divisor))
    }

    pub fn apply(&self, amount: Decimal) -> DomainResult<Decimal> {
        match self {
            Self::None => Ok(amount),
            Self::Divisor(d) => in_range(amount.checked_div(*d)),
        }
    }
}

/// Midpoint rule used when converting cents to two-decimal major units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 0.005 rounds away from zero
    #[default]
    HalfUp,
    /// 0.005 rounds to the even neighbour (banker's rounding)
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }

    /// Convert an amount in cents (possibly fractional) to major units with
    /// two decimals.
    pub fn to_major(self, minor: Decimal) -> Decimal {
        (minor / Decimal::ONE_HUNDRED).round_dp_with_strategy(2, self.strategy())
    }
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HalfUp => write!(f, "half_up"),
            Self::HalfEven => write!(f, "half_even"),
        }
    }
}

/// Formula settings shared by every quote computed by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    pub gross_up: GrossUpPolicy,
    /// Denominator of the stored ad valorem rate
    pub ad_valorem_scale: u32,
    pub rounding: RoundingMode,
}

impl PricingPolicy {
    pub fn new(
        gross_up: GrossUpPolicy,
        ad_valorem_scale: u32,
        rounding: RoundingMode,
    ) -> DomainResult<Self> {
        if ad_valorem_scale == 0 {
            return Err(DomainError::Validation(
                "ad valorem scale must be positive".to_string(),
            ));
        }
        Ok(Self {
            gross_up,
            ad_valorem_scale,
            rounding,
        })
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            gross_up: GrossUpPolicy::None,
            ad_valorem_scale: DEFAULT_AD_VALOREM_SCALE,
            rounding: RoundingMode::HalfUp,
        }
    }
}
