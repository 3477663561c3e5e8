//! Tariff aggregate
//!
//! Contains the tariff row entity, its route key, and the repository contract.

pub mod model;
pub mod repository;

pub use model::{
    AdValorem, DifficultDelivery, Hazardous, RouteKey, TariffRow, Toll, WeightTiers,
};
pub use repository::TariffRepository;

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Reference row for MG/METROPOLITANA -> SP/CAPITAL.
    pub fn sample_row() -> TariffRow {
        TariffRow {
            route: RouteKey::new("MG", "METROPOLITANA", "SP", "CAPITAL"),
            weight_tiers: WeightTiers {
                up_to_10: 4512,
                up_to_20: 5230,
                up_to_30: 6105,
                up_to_50: 7480,
                up_to_70: 9120,
                up_to_100: 11250,
                per_kg_up_to_200: 62,
                per_kg_above_200: 51,
            },
            ad_valorem: AdValorem { rate: 35, min: 1200 },
            dispatch_fee: 1856,
            toll: Toll { fixed: 219, per_kg: 2 },
            hazardous: Hazardous {
                percent: 25,
                floor_up_to_100: 1500,
                floor_above_100: 4000,
            },
            difficult_delivery: DifficultDelivery {
                tde1_percent: 20,
                tde1_min: 3500,
                tde1_max: 30000,
                tde2_percent: 15,
                tde2_min: 2500,
            },
        }
    }
}
