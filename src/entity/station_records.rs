use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One detected flash-flood event (rise, peak, fall) at a station.
///
/// Timestamps are stored as `YYYY-MM-DD HH:MM:SS` text, so range filters
/// compare them lexicographically. `peak_time_str` is the display label
/// produced at ingestion time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "station_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub station_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub start_time: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub peak_time: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub end_time: Option<String>,
    pub start_value: Option<f64>,
    pub peak_value: Option<f64>,
    pub end_value: Option<f64>,
    pub rise_time: Option<f64>,
    pub fall_time: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub peak_time_str: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stations::Entity",
        from = "Column::StationId",
        to = "super::stations::Column::StationId"
    )]
    Station,
}

impl Related<super::stations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Station.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
