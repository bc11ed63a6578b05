use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QueryResult, QuerySelect, RelationTrait, Select, Value,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{station_records, stations};

use super::filter::{EventScope, PeakRange};

/// Columns every event row carries, in response order.
const RECORD_COLUMNS: [station_records::Column; 10] = [
    station_records::Column::Id,
    station_records::Column::StartTime,
    station_records::Column::PeakTime,
    station_records::Column::EndTime,
    station_records::Column::StartValue,
    station_records::Column::PeakValue,
    station_records::Column::EndValue,
    station_records::Column::RiseTime,
    station_records::Column::FallTime,
    station_records::Column::PeakTimeStr,
];

/// Unfiltered aggregate over every event in a scope.
///
/// The time fields are `None` when no event has that column set.
#[derive(Debug, Clone, Default, PartialEq, FromQueryResult)]
pub struct EventSummary {
    pub total_events: i64,
    pub first_start_time: Option<String>,
    pub last_end_time: Option<String>,
    pub min_peak_time: Option<String>,
    pub max_peak_time: Option<String>,
}

/// Aggregate over the events whose peak falls inside a [`PeakRange`].
///
/// With zero matches every statistic is `None`, never zero.
#[derive(Debug, Clone, Default, PartialEq, FromQueryResult)]
pub struct FilteredSummary {
    pub matched_events: i64,
    pub max_peak_value: Option<f64>,
    pub avg_peak_value: Option<f64>,
    pub avg_rise_time: Option<f64>,
    pub avg_fall_time: Option<f64>,
}

/// One point of the peak-value timeline. Only events with both a peak time
/// and a peak value produce a point.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema, FromQueryResult)]
pub struct MatchedPoint {
    pub id: i32,
    pub peak_time: String,
    pub peak_value: f64,
    pub peak_time_str: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema, FromQueryResult)]
pub struct EventRecord {
    pub id: i32,
    pub start_time: Option<String>,
    pub peak_time: Option<String>,
    pub end_time: Option<String>,
    pub start_value: Option<f64>,
    pub peak_value: Option<f64>,
    pub end_value: Option<f64>,
    pub rise_time: Option<f64>,
    pub fall_time: Option<f64>,
    pub peak_time_str: Option<String>,
}

/// Event row with its owning station. `basin_name` is only filled in basin scope.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MatchedEvent {
    pub station_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basin_name: Option<String>,
    #[serde(flatten)]
    pub record: EventRecord,
}

impl FromQueryResult for MatchedEvent {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            station_id: res.try_get(pre, "station_id")?,
            basin_name: res.try_get(pre, "basin_name")?,
            record: EventRecord::from_query_result(res, pre)?,
        })
    }
}

fn record_col(column: station_records::Column) -> Expr {
    Expr::col((station_records::Entity, column))
}

/// Base query for a scope: station filter, or basin join + filter.
fn scoped(scope: &EventScope) -> Select<station_records::Entity> {
    let query = station_records::Entity::find();
    match scope {
        EventScope::Station(station_id) => {
            query.filter(station_records::Column::StationId.eq(station_id.as_str()))
        }
        EventScope::Basin(basin_name) => query
            .join(JoinType::InnerJoin, station_records::Relation::Station.def())
            .filter(stations::Column::BasinName.eq(basin_name.as_str())),
    }
}

/// Read-only access to `station_records`.
#[derive(Clone)]
pub struct EventRepository {
    db: DatabaseConnection,
}

impl EventRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Count and time extent of every event in the scope, ignoring any date range.
    pub async fn summary(&self, scope: &EventScope) -> Result<EventSummary, DbErr> {
        let summary = scoped(scope)
            .select_only()
            .column_as(
                SimpleExpr::from(Func::count(record_col(station_records::Column::Id))),
                "total_events",
            )
            .column_as(
                SimpleExpr::from(Func::min(record_col(station_records::Column::StartTime))),
                "first_start_time",
            )
            .column_as(
                SimpleExpr::from(Func::max(record_col(station_records::Column::EndTime))),
                "last_end_time",
            )
            .column_as(
                SimpleExpr::from(Func::min(record_col(station_records::Column::PeakTime))),
                "min_peak_time",
            )
            .column_as(
                SimpleExpr::from(Func::max(record_col(station_records::Column::PeakTime))),
                "max_peak_time",
            )
            .into_model::<EventSummary>()
            .one(&self.db)
            .await?
            .unwrap_or_default();

        tracing::debug!(scope = ?scope, total_events = summary.total_events, "event_summary");
        Ok(summary)
    }

    /// Peak/rise/fall statistics over the events whose peak lies in `range`.
    pub async fn filtered_summary(
        &self,
        scope: &EventScope,
        range: &PeakRange,
    ) -> Result<FilteredSummary, DbErr> {
        let summary = scoped(scope)
            .filter(range.condition())
            .select_only()
            .column_as(
                SimpleExpr::from(Func::count(record_col(station_records::Column::Id))),
                "matched_events",
            )
            .column_as(
                SimpleExpr::from(Func::max(record_col(station_records::Column::PeakValue))),
                "max_peak_value",
            )
            .column_as(
                SimpleExpr::from(Func::avg(record_col(station_records::Column::PeakValue))),
                "avg_peak_value",
            )
            .column_as(
                SimpleExpr::from(Func::avg(record_col(station_records::Column::RiseTime))),
                "avg_rise_time",
            )
            .column_as(
                SimpleExpr::from(Func::avg(record_col(station_records::Column::FallTime))),
                "avg_fall_time",
            )
            .into_model::<FilteredSummary>()
            .one(&self.db)
            .await?
            .unwrap_or_default();

        tracing::debug!(
            scope = ?scope,
            bounded = !range.is_unbounded(),
            start = ?range.start,
            end = ?range.end,
            matched_events = summary.matched_events,
            "event_filtered_summary"
        );
        Ok(summary)
    }

    /// Peak timeline for charting, ascending by peak time.
    pub async fn matched_series(
        &self,
        scope: &EventScope,
        range: &PeakRange,
    ) -> Result<Vec<MatchedPoint>, DbErr> {
        let points = scoped(scope)
            .filter(range.condition())
            .filter(station_records::Column::PeakTime.is_not_null())
            .filter(station_records::Column::PeakValue.is_not_null())
            .select_only()
            .columns([
                station_records::Column::Id,
                station_records::Column::PeakTime,
                station_records::Column::PeakValue,
                station_records::Column::PeakTimeStr,
            ])
            .order_by_asc(station_records::Column::PeakTime)
            .order_by_asc(station_records::Column::Id)
            .into_model::<MatchedPoint>()
            .all(&self.db)
            .await?;

        tracing::debug!(scope = ?scope, points = points.len(), "event_matched_series");
        Ok(points)
    }

    /// Full rows of the events whose peak lies in `range`, ascending by peak time.
    pub async fn matched_events(
        &self,
        scope: &EventScope,
        range: &PeakRange,
    ) -> Result<Vec<MatchedEvent>, DbErr> {
        let query = scoped(scope)
            .filter(range.condition())
            .select_only()
            .column(station_records::Column::StationId);

        let query = match scope {
            EventScope::Basin(_) => query.column(stations::Column::BasinName),
            EventScope::Station(_) => {
                query.column_as(SimpleExpr::Value(Value::String(None)), "basin_name")
            }
        };

        let events = query
            .columns(RECORD_COLUMNS)
            .order_by_asc(station_records::Column::PeakTime)
            .order_by_asc(station_records::Column::Id)
            .into_model::<MatchedEvent>()
            .all(&self.db)
            .await?;

        tracing::debug!(scope = ?scope, events = events.len(), "event_matched_detail");
        Ok(events)
    }

    /// The `limit` most recent events of a station by peak time. Never range-filtered.
    pub async fn recent_events(
        &self,
        station_id: &str,
        limit: u64,
    ) -> Result<Vec<EventRecord>, DbErr> {
        let events = scoped(&EventScope::Station(station_id.to_string()))
            .select_only()
            .columns(RECORD_COLUMNS)
            .order_by_desc(station_records::Column::PeakTime)
            .order_by_desc(station_records::Column::Id)
            .limit(limit)
            .into_model::<EventRecord>()
            .all(&self.db)
            .await?;

        tracing::debug!(station_id, limit, events = events.len(), "event_recent");
        Ok(events)
    }
}
