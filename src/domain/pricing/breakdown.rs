//! Quote breakdown

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::policy::RoundingMode;

/// Charge components in cents, after gross-up and before rounding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinorCharges {
    pub weight_charge: Decimal,
    pub ad_valorem: Decimal,
    pub dispatch: Decimal,
    pub toll: Decimal,
    pub hazardous: Decimal,
    pub tde1: Decimal,
    pub tde2: Decimal,
}

/// Priced quote in major currency units, two decimals.
///
/// `total` is the sum of the seven rounded components, never the rounded
/// sum of unrounded ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub weight_charge: Decimal,
    pub ad_valorem: Decimal,
    pub dispatch: Decimal,
    pub toll: Decimal,
    pub hazardous: Decimal,
    pub tde1: Decimal,
    pub tde2: Decimal,
    pub total: Decimal,
}

impl PricingBreakdown {
    pub fn from_minor(charges: &MinorCharges, rounding: RoundingMode) -> Self {
        let weight_charge = rounding.to_major(charges.weight_charge);
        let ad_valorem = rounding.to_major(charges.ad_valorem);
        let dispatch = rounding.to_major(charges.dispatch);
        let toll = rounding.to_major(charges.toll);
        let hazardous = rounding.to_major(charges.hazardous);
        let tde1 = rounding.to_major(charges.tde1);
        let tde2 = rounding.to_major(charges.tde2);

        Self {
            weight_charge,
            ad_valorem,
            dispatch,
            toll,
            hazardous,
            tde1,
            tde2,
            total: weight_charge + ad_valorem + dispatch + toll + hazardous + tde1 + tde2,
        }
    }

    /// Labelled components, in display order, excluding the total.
    pub fn components(&self) -> [(&'static str, Decimal); 7] {
        [
            ("weight_charge", self.weight_charge),
            ("ad_valorem", self.ad_valorem),
            ("dispatch", self.dispatch),
            ("toll", self.toll),
            ("hazardous", self.hazardous),
            ("tde1", self.tde1),
            ("tde2", self.tde2),
        ]
    }

    pub fn format_total(&self) -> String {
        format!("{:.2}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn charges() -> MinorCharges {
        MinorCharges {
            weight_charge: dec("100.5"),
            ad_valorem: dec("100.5"),
            dispatch: dec("100.5"),
            toll: Decimal::ZERO,
            hazardous: Decimal::ZERO,
            tde1: Decimal::ZERO,
            tde2: Decimal::ZERO,
        }
    }

    #[test]
    fn total_is_sum_of_rounded_components() {
        // each 1.005 rounds to 1.01; unrounded sum 3.015 would give 3.02
        let bd = PricingBreakdown::from_minor(&charges(), RoundingMode::HalfUp);
        assert_eq!(bd.weight_charge, dec("1.01"));
        assert_eq!(bd.total, dec("3.03"));
        let sum: Decimal = bd.components().iter().map(|(_, v)| *v).sum();
        assert_eq!(bd.total, sum);
    }

    #[test]
    fn half_even_rounds_to_even_cent() {
        let bd = PricingBreakdown::from_minor(&charges(), RoundingMode::HalfEven);
        assert_eq!(bd.weight_charge, dec("1.00"));
        assert_eq!(bd.total, dec("3.00"));
    }

    #[test]
    fn format_total_has_two_decimals() {
        let mut c = charges();
        c.weight_charge = Decimal::from(29580);
        c.ad_valorem = Decimal::ZERO;
        c.dispatch = Decimal::ZERO;
        let bd = PricingBreakdown::from_minor(&c, RoundingMode::HalfUp);
        assert_eq!(bd.format_total(), "295.80");
    }
}
