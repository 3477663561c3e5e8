//! Weight band selection and base charge resolution

use rust_decimal::Decimal;

use super::in_range;
use crate::domain::tariff::WeightTiers;
use crate::domain::DomainResult;

/// Weight band of a tariff card. Bounds are inclusive upper limits in kg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightTier {
    UpTo10,
    UpTo20,
    UpTo30,
    UpTo50,
    UpTo70,
    UpTo100,
    /// Per-kg rate, 100 < w <= 200
    PerKgUpTo200,
    /// Per-kg rate, w > 200
    PerKgAbove200,
}

impl WeightTier {
    /// Select the band for a weight. Weight is expected to be positive.
    pub fn for_weight(weight_kg: Decimal) -> Self {
        const FLAT: [(i64, WeightTier); 6] = [
            (10, WeightTier::UpTo10),
            (20, WeightTier::UpTo20),
            (30, WeightTier::UpTo30),
            (50, WeightTier::UpTo50),
            (70, WeightTier::UpTo70),
            (100, WeightTier::UpTo100),
        ];

        FLAT.iter()
            .find(|(bound, _)| weight_kg <= Decimal::from(*bound))
            .map(|(_, tier)| *tier)
            .unwrap_or_else(|| {
                if weight_kg <= Decimal::from(200) {
                    WeightTier::PerKgUpTo200
                } else {
                    WeightTier::PerKgAbove200
                }
            })
    }

    pub fn is_per_kg(self) -> bool {
        matches!(self, Self::PerKgUpTo200 | Self::PerKgAbove200)
    }
}

impl WeightTiers {
    /// Base charge in cents for a shipment weight.
    ///
    /// Flat bands ignore the exact weight; per-kg bands multiply the raw
    /// weight, so the charge jumps at the 100 kg and 200 kg boundaries.
    pub fn base_charge(&self, weight_kg: Decimal) -> DomainResult<Decimal> {
        let flat = match WeightTier::for_weight(weight_kg) {
            WeightTier::UpTo10 => self.up_to_10,
            WeightTier::UpTo20 => self.up_to_20,
            WeightTier::UpTo30 => self.up_to_30,
            WeightTier::UpTo50 => self.up_to_50,
            WeightTier::UpTo70 => self.up_to_70,
            WeightTier::UpTo100 => self.up_to_100,
            WeightTier::PerKgUpTo200 => return per_kg(self.per_kg_up_to_200, weight_kg),
            WeightTier::PerKgAbove200 => return per_kg(self.per_kg_above_200, weight_kg),
        };
        Ok(Decimal::from(flat))
    }
}

fn per_kg(rate: i64, weight_kg: Decimal) -> DomainResult<Decimal> {
    in_range(Decimal::from(rate).checked_mul(weight_kg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tariff::fixtures::sample_row;
    use std::str::FromStr;

    fn kg(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(WeightTier::for_weight(kg("0.5")), WeightTier::UpTo10);
        assert_eq!(WeightTier::for_weight(kg("10")), WeightTier::UpTo10);
        assert_eq!(WeightTier::for_weight(kg("10.01")), WeightTier::UpTo20);
        assert_eq!(WeightTier::for_weight(kg("20")), WeightTier::UpTo20);
        assert_eq!(WeightTier::for_weight(kg("30")), WeightTier::UpTo30);
        assert_eq!(WeightTier::for_weight(kg("50")), WeightTier::UpTo50);
        assert_eq!(WeightTier::for_weight(kg("70")), WeightTier::UpTo70);
        assert_eq!(WeightTier::for_weight(kg("100")), WeightTier::UpTo100);
        assert_eq!(WeightTier::for_weight(kg("100.01")), WeightTier::PerKgUpTo200);
        assert_eq!(WeightTier::for_weight(kg("200")), WeightTier::PerKgUpTo200);
        assert_eq!(WeightTier::for_weight(kg("200.01")), WeightTier::PerKgAbove200);
    }

    #[test]
    fn flat_bands_ignore_exact_weight() {
        let tiers = sample_row().weight_tiers;
        assert_eq!(tiers.base_charge(kg("1")).unwrap(), Decimal::from(4512));
        assert_eq!(tiers.base_charge(kg("10")).unwrap(), Decimal::from(4512));
        assert_eq!(tiers.base_charge(kg("10.01")).unwrap(), Decimal::from(5230));
        assert_eq!(tiers.base_charge(kg("55")).unwrap(), Decimal::from(9120));
        assert_eq!(tiers.base_charge(kg("100")).unwrap(), Decimal::from(11250));
    }

    #[test]
    fn per_kg_bands_use_raw_weight() {
        let tiers = sample_row().weight_tiers;
        // 62 cents/kg
        assert_eq!(tiers.base_charge(kg("100.01")).unwrap(), kg("6200.62"));
        assert_eq!(tiers.base_charge(kg("200")).unwrap(), Decimal::from(12400));
        // 51 cents/kg
        assert_eq!(tiers.base_charge(kg("200.01")).unwrap(), kg("10200.51"));
        assert_eq!(tiers.base_charge(kg("580")).unwrap(), Decimal::from(29580));
    }

    #[test]
    fn per_kg_band_scales_linearly() {
        let tiers = sample_row().weight_tiers;
        let at_300 = tiers.base_charge(kg("300")).unwrap();
        let at_600 = tiers.base_charge(kg("600")).unwrap();
        assert_eq!(at_600, at_300 * Decimal::from(2));
        assert!(WeightTier::for_weight(kg("300")).is_per_kg());
        assert!(!WeightTier::for_weight(kg("99")).is_per_kg());
    }

    #[test]
    fn rate_switches_across_200kg() {
        let tiers = sample_row().weight_tiers;
        let at_200 = tiers.base_charge(kg("200")).unwrap();
        let at_201 = tiers.base_charge(kg("201")).unwrap();
        assert_eq!(at_200, Decimal::from(tiers.per_kg_up_to_200) * kg("200"));
        assert_eq!(at_201, Decimal::from(tiers.per_kg_above_200) * kg("201"));
        assert_eq!(
            tiers.base_charge(kg("200.01")).unwrap(),
            Decimal::from(tiers.per_kg_above_200) * kg("200.01")
        );
        // 201 kg at the above-200 rate, scaled from 200 kg at the same rate
        let above_200_at_200 = Decimal::from(tiers.per_kg_above_200) * kg("200");
        assert_eq!(at_201, above_200_at_200 * kg("201") / kg("200"));
    }

    #[test]
    fn overflowing_weight_is_rejected() {
        let tiers = sample_row().weight_tiers;
        let huge = Decimal::from_str("10000000000000000000000000000").unwrap();
        assert!(matches!(
            tiers.base_charge(huge),
            Err(crate::domain::DomainError::Validation(_))
        ));
    }
}
