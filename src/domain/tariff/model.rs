//! Tariff row domain entity

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Maximum length of a classification label (matches the persisted column).
pub const MAX_CLASSIFICATION_LEN: usize = 50;

/// Directed route descriptor: the lookup key of a tariff row.
///
/// Matching is exact on all four parts; no case folding or trimming is done
/// here, callers pass the labels as they appear in the tariff table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    pub origin_region: String,
    pub origin_classification: String,
    pub destination_region: String,
    pub destination_classification: String,
}

impl RouteKey {
    pub fn new(
        origin_region: impl Into<String>,
        origin_classification: impl Into<String>,
        destination_region: impl Into<String>,
        destination_classification: impl Into<String>,
    ) -> Self {
        Self {
            origin_region: origin_region.into(),
            origin_classification: origin_classification.into(),
            destination_region: destination_region.into(),
            destination_classification: destination_classification.into(),
        }
    }

    /// Check that region codes are two ASCII letters and classifications are
    /// non-empty and fit the persisted column.
    pub fn validate(&self) -> DomainResult<()> {
        validate_region("origin_region", &self.origin_region)?;
        validate_region("destination_region", &self.destination_region)?;
        validate_classification("origin_classification", &self.origin_classification)?;
        validate_classification(
            "destination_classification",
            &self.destination_classification,
        )
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} -> {}/{}",
            self.origin_region,
            self.origin_classification,
            self.destination_region,
            self.destination_classification
        )
    }
}

fn validate_region(field: &str, code: &str) -> DomainResult<()> {
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "{} must be a two-letter region code",
            field
        )))
    }
}

fn validate_classification(field: &str, label: &str) -> DomainResult<()> {
    let len = label.chars().count();
    if len == 0 || len > MAX_CLASSIFICATION_LEN {
        return Err(DomainError::Validation(format!(
            "{} must be 1..={} characters",
            field, MAX_CLASSIFICATION_LEN
        )));
    }
    Ok(())
}

/// Base charges by weight band, in cents.
///
/// The first six bands are flat fees; the last two are cents per kilogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightTiers {
    pub up_to_10: i64,
    pub up_to_20: i64,
    pub up_to_30: i64,
    pub up_to_50: i64,
    pub up_to_70: i64,
    pub up_to_100: i64,
    pub per_kg_up_to_200: i64,
    pub per_kg_above_200: i64,
}

/// Ad valorem surcharge parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdValorem {
    /// Scaled rate; the scale is a pricing policy setting (default 10000).
    pub rate: i64,
    /// Floor in cents
    pub min: i64,
}

/// Toll/handling fee parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toll {
    /// Flat fee in cents for weights up to 100 kg
    pub fixed: i64,
    /// Cents per kg for weights above 100 kg
    pub per_kg: i64,
}

/// Hazardous-goods surcharge parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hazardous {
    /// Whole percent of the base charge (25 = 25%)
    pub percent: i64,
    pub floor_up_to_100: i64,
    pub floor_above_100: i64,
}

/// Difficult-delivery surcharges (TDE1 clamped on both sides, TDE2 floor only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultDelivery {
    pub tde1_percent: i64,
    pub tde1_min: i64,
    pub tde1_max: i64,
    pub tde2_percent: i64,
    pub tde2_min: i64,
}

/// One rate card for a directed route.
///
/// Rows are produced by the repository and never mutated by pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffRow {
    pub route: RouteKey,
    pub weight_tiers: WeightTiers,
    pub ad_valorem: AdValorem,
    /// Dispatch fee in cents
    pub dispatch_fee: i64,
    pub toll: Toll,
    pub hazardous: Hazardous,
    pub difficult_delivery: DifficultDelivery,
}

impl TariffRow {
    /// Named view over every numeric field, used for validation and logging.
    pub fn numeric_fields(&self) -> [(&'static str, i64); 21] {
        let t = &self.weight_tiers;
        let d = &self.difficult_delivery;
        [
            ("weight_tiers.up_to_10", t.up_to_10),
            ("weight_tiers.up_to_20", t.up_to_20),
            ("weight_tiers.up_to_30", t.up_to_30),
            ("weight_tiers.up_to_50", t.up_to_50),
            ("weight_tiers.up_to_70", t.up_to_70),
            ("weight_tiers.up_to_100", t.up_to_100),
            ("weight_tiers.per_kg_up_to_200", t.per_kg_up_to_200),
            ("weight_tiers.per_kg_above_200", t.per_kg_above_200),
            ("ad_valorem.rate", self.ad_valorem.rate),
            ("ad_valorem.min", self.ad_valorem.min),
            ("dispatch_fee", self.dispatch_fee),
            ("toll.fixed", self.toll.fixed),
            ("toll.per_kg", self.toll.per_kg),
            ("hazardous.percent", self.hazardous.percent),
            ("hazardous.floor_up_to_100", self.hazardous.floor_up_to_100),
            ("hazardous.floor_above_100", self.hazardous.floor_above_100),
            ("difficult_delivery.tde1_percent", d.tde1_percent),
            ("difficult_delivery.tde1_min", d.tde1_min),
            ("difficult_delivery.tde1_max", d.tde1_max),
            ("difficult_delivery.tde2_percent", d.tde2_percent),
            ("difficult_delivery.tde2_min", d.tde2_min),
        ]
    }

    /// Every numeric tariff field must be non-negative.
    pub fn validate(&self) -> DomainResult<()> {
        match self.numeric_fields().iter().find(|(_, v)| *v < 0) {
            Some((name, value)) => Err(DomainError::Validation(format!(
                "tariff {} has negative {}: {}",
                self.route, name, value
            ))),
            None => Ok(()),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tariff::fixtures::sample_row;

    #[test]
    fn route_key_display() {
        let key = RouteKey::new("MG", "METROPOLITANA", "SP", "CAPITAL");
        assert_eq!(key.to_string(), "MG/METROPOLITANA -> SP/CAPITAL");
    }

    #[test]
    fn route_key_accepts_valid_codes() {
        let key = RouteKey::new("ES", "CAPITAL", "RJ", "INTERIOR 1");
        assert!(key.validate().is_ok());
    }

    #[test]
    fn route_key_rejects_bad_region() {
        let key = RouteKey::new("MGX", "CAPITAL", "SP", "CAPITAL");
        let err = key.validate().unwrap_err();
        assert!(err.to_string().contains("origin_region"));

        let key = RouteKey::new("MG", "CAPITAL", "S1", "CAPITAL");
        assert!(key.validate().is_err());
    }

    #[test]
    fn route_key_rejects_empty_or_long_classification() {
        let key = RouteKey::new("MG", "", "SP", "CAPITAL");
        assert!(key.validate().is_err());

        let long = "X".repeat(MAX_CLASSIFICATION_LEN + 1);
        let key = RouteKey::new("MG", "CAPITAL", "SP", long);
        let err = key.validate().unwrap_err();
        assert!(err.to_string().contains("destination_classification"));
    }

    #[test]
    fn sample_row_is_valid() {
        assert!(sample_row().validate().is_ok());
    }

    #[test]
    fn negative_field_is_rejected() {
        let mut row = sample_row();
        row.toll.per_kg = -1;
        let err = row.validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(err.to_string().contains("toll.per_kg"));
    }
}
