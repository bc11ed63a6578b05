use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== STATIONS ==========
        manager
            .create_table(
                Table::create()
                    .table(Stations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stations::StationId)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Stations::Latitude).double())
                    .col(ColumnDef::new(Stations::Longitude).double())
                    .col(ColumnDef::new(Stations::BasinName).text())
                    .col(ColumnDef::new(Stations::RiverName).text())
                    .col(ColumnDef::new(Stations::StationName).text())
                    .col(ColumnDef::new(Stations::StationName2).text())
                    .col(ColumnDef::new(Stations::StationName3).text())
                    .col(ColumnDef::new(Stations::Description).text())
                    .col(ColumnDef::new(Stations::HasData).integer().default(0))
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_stations_has_data", Stations::HasData),
            ("idx_stations_basin", Stations::BasinName),
            ("idx_stations_river", Stations::RiverName),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Stations::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        // ========== STATION RECORDS ==========
        manager
            .create_table(
                Table::create()
                    .table(StationRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StationRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StationRecords::StationId).text())
                    .col(ColumnDef::new(StationRecords::StartTime).text())
                    .col(ColumnDef::new(StationRecords::PeakTime).text())
                    .col(ColumnDef::new(StationRecords::EndTime).text())
                    .col(ColumnDef::new(StationRecords::StartValue).double())
                    .col(ColumnDef::new(StationRecords::PeakValue).double())
                    .col(ColumnDef::new(StationRecords::EndValue).double())
                    .col(ColumnDef::new(StationRecords::RiseTime).double())
                    .col(ColumnDef::new(StationRecords::FallTime).double())
                    .col(ColumnDef::new(StationRecords::PeakTimeStr).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_station_records_station")
                            .from(StationRecords::Table, StationRecords::StationId)
                            .to(Stations::Table, Stations::StationId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_records_peak_value")
                    .table(StationRecords::Table)
                    .col(StationRecords::PeakValue)
                    .to_owned(),
            )
            .await?;

        // Serves both the per-station range filter and the recent-events ordering
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_records_station_time")
                    .table(StationRecords::Table)
                    .col(StationRecords::StationId)
                    .col(StationRecords::PeakTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_records_peak_time")
                    .table(StationRecords::Table)
                    .col(StationRecords::PeakTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StationRecords::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stations::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Stations {
    Table,
    StationId,
    Latitude,
    Longitude,
    BasinName,
    RiverName,
    StationName,
    #[sea_orm(iden = "station_name2")]
    StationName2,
    #[sea_orm(iden = "station_name3")]
    StationName3,
    Description,
    HasData,
}

#[derive(DeriveIden)]
enum StationRecords {
    Table,
    Id,
    StationId,
    StartTime,
    PeakTime,
    EndTime,
    StartValue,
    PeakValue,
    EndValue,
    RiseTime,
    FallTime,
    PeakTimeStr,
}
