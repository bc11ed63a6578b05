use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A monitoring site. Read-only; populated by the offline ingestion job.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub station_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub basin_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub river_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub station_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub station_name2: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub station_name3: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// 1 when event records exist for the station, 0 otherwise
    pub has_data: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::station_records::Entity")]
    StationRecords,
}

impl Related<super::station_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StationRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
