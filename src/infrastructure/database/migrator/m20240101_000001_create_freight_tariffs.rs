//! Create freight_tariffs table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let money_columns = [
            FreightTariffs::WeightUpTo10,
            FreightTariffs::WeightUpTo20,
            FreightTariffs::WeightUpTo30,
            FreightTariffs::WeightUpTo50,
            FreightTariffs::WeightUpTo70,
            FreightTariffs::WeightUpTo100,
            FreightTariffs::PerKgUpTo200,
            FreightTariffs::PerKgAbove200,
            FreightTariffs::AdValoremRate,
            FreightTariffs::AdValoremMin,
            FreightTariffs::DispatchFee,
            FreightTariffs::TollFixed,
            FreightTariffs::TollPerKg,
            FreightTariffs::HazardousPercent,
            FreightTariffs::HazardousFloorUpTo100,
            FreightTariffs::HazardousFloorAbove100,
            FreightTariffs::Tde1Percent,
            FreightTariffs::Tde1Min,
            FreightTariffs::Tde1Max,
            FreightTariffs::Tde2Percent,
            FreightTariffs::Tde2Min,
        ];

        let mut table = Table::create();
        table
            .table(FreightTariffs::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(FreightTariffs::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(FreightTariffs::OriginRegion)
                    .string_len(2)
                    .not_null(),
            )
            .col(
                ColumnDef::new(FreightTariffs::OriginClassification)
                    .string_len(50)
                    .not_null(),
            )
            .col(
                ColumnDef::new(FreightTariffs::DestinationRegion)
                    .string_len(2)
                    .not_null(),
            )
            .col(
                ColumnDef::new(FreightTariffs::DestinationClassification)
                    .string_len(50)
                    .not_null(),
            );

        for column in money_columns {
            table.col(
                ColumnDef::new(column)
                    .big_integer()
                    .not_null()
                    .default(0),
            );
        }

        table
            .col(
                ColumnDef::new(FreightTariffs::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(FreightTariffs::UpdatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            );

        manager.create_table(table.to_owned()).await?;

        // A route resolves to at most one row
        manager
            .create_index(
                Index::create()
                    .name("idx_freight_tariffs_route")
                    .table(FreightTariffs::Table)
                    .col(FreightTariffs::OriginRegion)
                    .col(FreightTariffs::OriginClassification)
                    .col(FreightTariffs::DestinationRegion)
                    .col(FreightTariffs::DestinationClassification)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FreightTariffs::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
pub enum FreightTariffs {
    Table,
    Id,
    OriginRegion,
    OriginClassification,
    DestinationRegion,
    DestinationClassification,
    #[iden = "weight_up_to_10"]
    WeightUpTo10,
    #[iden = "weight_up_to_20"]
    WeightUpTo20,
    #[iden = "weight_up_to_30"]
    WeightUpTo30,
    #[iden = "weight_up_to_50"]
    WeightUpTo50,
    #[iden = "weight_up_to_70"]
    WeightUpTo70,
    #[iden = "weight_up_to_100"]
    WeightUpTo100,
    #[iden = "per_kg_up_to_200"]
    PerKgUpTo200,
    #[iden = "per_kg_above_200"]
    PerKgAbove200,
    AdValoremRate,
    AdValoremMin,
    DispatchFee,
    TollFixed,
    TollPerKg,
    HazardousPercent,
    #[iden = "hazardous_floor_up_to_100"]
    HazardousFloorUpTo100,
    #[iden = "hazardous_floor_above_100"]
    HazardousFloorAbove100,
    #[iden = "tde1_percent"]
    Tde1Percent,
    #[iden = "tde1_min"]
    Tde1Min,
    #[iden = "tde1_max"]
    Tde1Max,
    #[iden = "tde2_percent"]
    Tde2Percent,
    #[iden = "tde2_min"]
    Tde2Min,
    CreatedAt,
    UpdatedAt,
}
