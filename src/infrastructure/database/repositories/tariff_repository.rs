//! SeaORM implementation of TariffRepository

use std::collections::BTreeSet;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::{debug, error};

use crate::domain::tariff::{AdValorem, DifficultDelivery, Hazardous, Toll, WeightTiers};
use crate::domain::{DomainError, DomainResult, RouteKey, TariffRepository, TariffRow};
use crate::infrastructure::database::entities::freight_tariff;

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    error!("Tariff query failed: {}", e);
    DomainError::Storage(format!("Database error: {}", e))
}

fn entity_to_domain(t: freight_tariff::Model) -> TariffRow {
    TariffRow {
        route: RouteKey {
            origin_region: t.origin_region,
            origin_classification: t.origin_classification,
            destination_region: t.destination_region,
            destination_classification: t.destination_classification,
        },
        weight_tiers: WeightTiers {
            up_to_10: t.weight_up_to_10,
            up_to_20: t.weight_up_to_20,
            up_to_30: t.weight_up_to_30,
            up_to_50: t.weight_up_to_50,
            up_to_70: t.weight_up_to_70,
            up_to_100: t.weight_up_to_100,
            per_kg_up_to_200: t.per_kg_up_to_200,
            per_kg_above_200: t.per_kg_above_200,
        },
        ad_valorem: AdValorem {
            rate: t.ad_valorem_rate,
            min: t.ad_valorem_min,
        },
        dispatch_fee: t.dispatch_fee,
        toll: Toll {
            fixed: t.toll_fixed,
            per_kg: t.toll_per_kg,
        },
        hazardous: Hazardous {
            percent: t.hazardous_percent,
            floor_up_to_100: t.hazardous_floor_up_to_100,
            floor_above_100: t.hazardous_floor_above_100,
        },
        difficult_delivery: DifficultDelivery {
            tde1_percent: t.tde1_percent,
            tde1_min: t.tde1_min,
            tde1_max: t.tde1_max,
            tde2_percent: t.tde2_percent,
            tde2_min: t.tde2_min,
        },
    }
}

// ── SeaOrmTariffRepository ──────────────────────────────────────

/// Read-only tariff access over the `freight_tariffs` table.
pub struct SeaOrmTariffRepository {
    db: DatabaseConnection,
}

impl SeaOrmTariffRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TariffRepository for SeaOrmTariffRepository {
    async fn find_by_route(&self, route: &RouteKey) -> DomainResult<Option<TariffRow>> {
        let model = freight_tariff::Entity::find()
            .filter(freight_tariff::Column::OriginRegion.eq(route.origin_region.as_str()))
            .filter(
                freight_tariff::Column::OriginClassification
                    .eq(route.origin_classification.as_str()),
            )
            .filter(
                freight_tariff::Column::DestinationRegion.eq(route.destination_region.as_str()),
            )
            .filter(
                freight_tariff::Column::DestinationClassification
                    .eq(route.destination_classification.as_str()),
            )
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(model) = model else {
            debug!("No tariff row for {}", route);
            return Ok(None);
        };

        let row = entity_to_domain(model);
        // Rows come from an external import; refuse to price corrupt data.
        row.validate()
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(Some(row))
    }

    async fn list_regions(&self) -> DomainResult<Vec<String>> {
        let pairs: Vec<(String, String)> = freight_tariff::Entity::find()
            .select_only()
            .column(freight_tariff::Column::OriginRegion)
            .column(freight_tariff::Column::DestinationRegion)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let regions: BTreeSet<String> = pairs
            .into_iter()
            .flat_map(|(origin, destination)| [origin, destination])
            .collect();
        Ok(regions.into_iter().collect())
    }

    async fn list_classifications(&self, region: &str) -> DomainResult<Vec<String>> {
        let models = freight_tariff::Entity::find()
            .filter(
                Condition::any()
                    .add(freight_tariff::Column::OriginRegion.eq(region))
                    .add(freight_tariff::Column::DestinationRegion.eq(region)),
            )
            .order_by_asc(freight_tariff::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut labels = BTreeSet::new();
        for m in models {
            if m.origin_region == region {
                labels.insert(m.origin_classification);
            }
            if m.destination_region == region {
                labels.insert(m.destination_classification);
            }
        }
        Ok(labels.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{ActiveModelTrait, Set};
    use sea_orm_migration::MigratorTrait;

    use crate::domain::tariff::fixtures::sample_row;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::{init_database, DatabaseConfig};

    async fn setup() -> DatabaseConnection {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    async fn insert(db: &DatabaseConnection, row: &TariffRow) {
        let now = Utc::now();
        freight_tariff::ActiveModel {
            origin_region: Set(row.route.origin_region.clone()),
            origin_classification: Set(row.route.origin_classification.clone()),
            destination_region: Set(row.route.destination_region.clone()),
            destination_classification: Set(row.route.destination_classification.clone()),
            weight_up_to_10: Set(row.weight_tiers.up_to_10),
            weight_up_to_20: Set(row.weight_tiers.up_to_20),
            weight_up_to_30: Set(row.weight_tiers.up_to_30),
            weight_up_to_50: Set(row.weight_tiers.up_to_50),
            weight_up_to_70: Set(row.weight_tiers.up_to_70),
            weight_up_to_100: Set(row.weight_tiers.up_to_100),
            per_kg_up_to_200: Set(row.weight_tiers.per_kg_up_to_200),
            per_kg_above_200: Set(row.weight_tiers.per_kg_above_200),
            ad_valorem_rate: Set(row.ad_valorem.rate),
            ad_valorem_min: Set(row.ad_valorem.min),
            dispatch_fee: Set(row.dispatch_fee),
            toll_fixed: Set(row.toll.fixed),
            toll_per_kg: Set(row.toll.per_kg),
            hazardous_percent: Set(row.hazardous.percent),
            hazardous_floor_up_to_100: Set(row.hazardous.floor_up_to_100),
            hazardous_floor_above_100: Set(row.hazardous.floor_above_100),
            tde1_percent: Set(row.difficult_delivery.tde1_percent),
            tde1_min: Set(row.difficult_delivery.tde1_min),
            tde1_max: Set(row.difficult_delivery.tde1_max),
            tde2_percent: Set(row.difficult_delivery.tde2_percent),
            tde2_min: Set(row.difficult_delivery.tde2_min),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    fn row_for(route: RouteKey) -> TariffRow {
        TariffRow {
            route,
            ..sample_row()
        }
    }

    #[tokio::test]
    async fn finds_row_by_exact_route() {
        let db = setup().await;
        insert(&db, &sample_row()).await;
        let repo = SeaOrmTariffRepository::new(db);

        let found = repo.find_by_route(&sample_row().route).await.unwrap();
        assert_eq!(found, Some(sample_row()));

        let reversed = RouteKey::new("SP", "CAPITAL", "MG", "METROPOLITANA");
        assert_eq!(repo.find_by_route(&reversed).await.unwrap(), None);

        let wrong_case = RouteKey::new("MG", "metropolitana", "SP", "CAPITAL");
        assert_eq!(repo.find_by_route(&wrong_case).await.unwrap(), None);
    }

    #[tokio::test]
    async fn lists_regions_and_classifications_sorted() {
        let db = setup().await;
        insert(&db, &sample_row()).await;
        insert(&db, &row_for(RouteKey::new("SP", "INTERIOR", "RJ", "CAPITAL"))).await;
        insert(&db, &row_for(RouteKey::new("MG", "INTERIOR", "SP", "CAPITAL"))).await;
        let repo = SeaOrmTariffRepository::new(db);

        assert_eq!(repo.list_regions().await.unwrap(), vec!["MG", "RJ", "SP"]);
        assert_eq!(
            repo.list_classifications("SP").await.unwrap(),
            vec!["CAPITAL", "INTERIOR"]
        );
        assert_eq!(
            repo.list_classifications("MG").await.unwrap(),
            vec!["INTERIOR", "METROPOLITANA"]
        );
        assert!(repo.list_classifications("AC").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_route_violates_unique_index() {
        let db = setup().await;
        insert(&db, &sample_row()).await;

        let now = Utc::now();
        let duplicate = freight_tariff::ActiveModel {
            origin_region: Set("MG".into()),
            origin_classification: Set("METROPOLITANA".into()),
            destination_region: Set("SP".into()),
            destination_classification: Set("CAPITAL".into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        assert!(duplicate.insert(&db).await.is_err());
    }

    #[tokio::test]
    async fn negative_field_is_a_storage_error() {
        let db = setup().await;
        let mut corrupt = sample_row();
        corrupt.toll.per_kg = -2;
        insert(&db, &corrupt).await;
        let repo = SeaOrmTariffRepository::new(db);

        let err = repo.find_by_route(&corrupt.route).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
    }
}
