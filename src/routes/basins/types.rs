use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::repository::{EventRecord, MatchedEvent, MatchedPoint};
use crate::routes::events::EventSummaryResponse;
use crate::routes::params::QueryPairs;

/// Query for `GET /api/basins/{basin_name}/events`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BasinEventsQuery {
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

impl From<QueryPairs> for BasinEventsQuery {
    fn from(query: QueryPairs) -> Self {
        Self {
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
pub struct BasinEventsResponse {
    pub basin_name: String,
    pub summary: EventSummaryResponse,
    /// Always empty: recent events are a station-level view
    pub recent_events: Vec<EventRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_series: Option<Vec<MatchedPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_events_detail: Option<Vec<MatchedEvent>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BasinEventCount {
    pub basin_name: String,
    pub matched_events: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum BasinEventsBody {
    Count(BasinEventCount),
    Full(BasinEventsResponse),
}
