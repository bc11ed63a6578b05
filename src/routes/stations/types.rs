use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity::stations;
use crate::repository::{EventRecord, MatchedEvent, MatchedPoint};
use crate::routes::events::EventSummaryResponse;
use crate::routes::params::QueryPairs;

/// Query for `GET /api/stations`. Values are normalized leniently by the handler.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StationsQuery {
    /// Case-insensitive substring of id, names, river or basin
    pub q: Option<String>,
    /// `1` for stations with data, `0` for stations without; anything else is ignored
    pub has_data: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size (default 200, max 1000)
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StationResponse {
    pub station_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub basin_name: Option<String>,
    pub river_name: Option<String>,
    pub station_name: Option<String>,
    pub station_name2: Option<String>,
    pub station_name3: Option<String>,
    pub description: Option<String>,
    pub has_data: Option<i32>,
}

impl From<stations::Model> for StationResponse {
    fn from(s: stations::Model) -> Self {
        Self {
            station_id: s.station_id,
            latitude: s.latitude,
            longitude: s.longitude,
            basin_name: s.basin_name,
            river_name: s.river_name,
            station_name: s.station_name,
            station_name2: s.station_name2,
            station_name3: s.station_name3,
            description: s.description,
            has_data: s.has_data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl From<QueryPairs> for StationsQuery {
    fn from(query: QueryPairs) -> Self {
        Self {
            q: query.first("q"),
            has_data: query.first("hasData"),
            page: query.first("page"),
            page_size: query.first("pageSize"),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StationsResponse {
    pub items: Vec<StationResponse>,
    pub pagination: Pagination,
}

/// Query for `GET /api/stations/{station_id}/events`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StationEventsQuery {
    /// Number of recent events (default 20, max 100)
    pub limit: Option<String>,
    /// Attach the most recent events (default true)
    pub include_recent: Option<String>,
    /// Attach the peak timeline of matched events (default false)
    pub include_matched_series: Option<String>,
    /// Attach full rows of matched events (default false)
    pub include_matched_events: Option<String>,
    /// Return only the matched-event count (default false)
    pub count_only: Option<String>,
    /// Earliest peak date, `YYYY-MM-DD`, inclusive
    pub peak_start: Option<String>,
    /// Latest peak date, `YYYY-MM-DD`, inclusive
    pub peak_end: Option<String>,
}

impl From<QueryPairs> for StationEventsQuery {
    fn from(query: QueryPairs) -> Self {
        Self {
            limit: query.first("limit"),
            include_recent: query.first("includeRecent"),
            include_matched_series: query.first("includeMatchedSeries"),
            include_matched_events: query.first("includeMatchedEvents"),
            count_only: query.first("countOnly"),
            peak_start: query.first("peakStart"),
            peak_end: query.first("peakEnd"),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationEventsResponse {
    pub station_id: String,
    pub summary: EventSummaryResponse,
    /// Absent when `includeRecent` is false; `[]` when requested but the station has no events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_events: Option<Vec<EventRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_series: Option<Vec<MatchedPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_events_detail: Option<Vec<MatchedEvent>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationEventCount {
    pub station_id: String,
    pub matched_events: i64,
}

/// Either the full envelope or, with `countOnly`, just the count.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum StationEventsBody {
    Count(StationEventCount),
    Full(StationEventsResponse),
}
