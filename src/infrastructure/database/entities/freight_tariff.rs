//! Freight tariff entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of the freight tariff table.
///
/// Money columns are integer cents; the last two weight columns are cents
/// per kg. The four route columns carry a unique index.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "freight_tariffs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Two-letter origin region code (e.g. "MG")
    pub origin_region: String,
    /// Origin classification label (e.g. "METROPOLITANA")
    pub origin_classification: String,
    pub destination_region: String,
    pub destination_classification: String,

    pub weight_up_to_10: i64,
    pub weight_up_to_20: i64,
    pub weight_up_to_30: i64,
    pub weight_up_to_50: i64,
    pub weight_up_to_70: i64,
    pub weight_up_to_100: i64,
    pub per_kg_up_to_200: i64,
    pub per_kg_above_200: i64,

    /// Scaled by the configured ad valorem scale (default: 35 = 0.35%)
    pub ad_valorem_rate: i64,
    pub ad_valorem_min: i64,

    pub dispatch_fee: i64,

    pub toll_fixed: i64,
    pub toll_per_kg: i64,

    /// Whole percent (25 = 25%)
    pub hazardous_percent: i64,
    pub hazardous_floor_up_to_100: i64,
    pub hazardous_floor_above_100: i64,

    pub tde1_percent: i64,
    pub tde1_min: i64,
    pub tde1_max: i64,
    pub tde2_percent: i64,
    pub tde2_min: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
