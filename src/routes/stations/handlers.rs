use axum::{
    extract::{Path, Query, State},
    Json,
};
use sea_orm::DbErr;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::repository::{
    EventRepository, EventScope, StationFilter, DEFAULT_PAGE_SIZE, MAX_PAGE, MAX_PAGE_SIZE,
};
use crate::routes::events::{when_enabled, EventOptions, EventSummaryResponse};
use crate::routes::params::{
    clean_path_segment, parse_flag, parse_has_data, parse_positive_int, peak_range, QueryPairs,
};

use super::types::{
    Pagination, StationEventCount, StationEventsBody, StationEventsQuery, StationEventsResponse,
    StationsQuery, StationsResponse,
};

const STATIONS_FAILURE: &str = "Failed to query stations.";
const STATION_EVENTS_FAILURE: &str = "Failed to query station events.";

pub const DEFAULT_RECENT_LIMIT: u64 = 20;
pub const MAX_RECENT_LIMIT: u64 = 100;

/// List stations with keyword search and pagination
///
/// Stations with data come first, then ascending by station id.
#[utoipa::path(
    get,
    path = "/api/stations",
    params(StationsQuery),
    responses(
        (status = 200, description = "Stations retrieved successfully", body = StationsResponse),
        (status = 500, description = "Failed to query stations"),
        (status = 429, description = "Too many requests from this client"),
    ),
    tag = "stations"
)]
pub async fn list_stations(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<StationsResponse>> {
    let query = StationsQuery::from(QueryPairs::from(pairs));
    let filter = StationFilter {
        keyword: query.q.map(|q| q.trim().to_string()),
        has_data: parse_has_data(query.has_data.as_deref()),
        page: parse_positive_int(query.page.as_deref(), 1, MAX_PAGE),
        page_size: parse_positive_int(query.page_size.as_deref(), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
    };

    let page = state
        .stations
        .list(&filter)
        .await
        .map_err(|e| AppError::query_failed(STATIONS_FAILURE, e))?;

    Ok(Json(StationsResponse {
        items: page.items.into_iter().map(Into::into).collect(),
        pagination: Pagination {
            page: page.page,
            page_size: page.page_size,
            total: page.total,
            total_pages: page.total_pages,
        },
    }))
}

/// Event statistics for one station
///
/// Always includes the unfiltered summary merged with the statistics of events
/// whose peak falls in `[peakStart, peakEnd]`. `countOnly` returns just the count.
#[utoipa::path(
    get,
    path = "/api/stations/{station_id}/events",
    params(
        ("station_id" = String, Path, description = "Station identifier"),
        StationEventsQuery
    ),
    responses(
        (status = 200, description = "Station events retrieved successfully", body = StationEventsBody),
        (status = 400, description = "stationId is required"),
        (status = 500, description = "Failed to query station events"),
        (status = 429, description = "Too many requests from this client"),
    ),
    tag = "events"
)]
pub async fn get_station_events(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<StationEventsBody>> {
    let query = StationEventsQuery::from(QueryPairs::from(pairs));
    let Some(station_id) = clean_path_segment(&station_id) else {
        return Err(AppError::BadRequest("stationId is required.".to_string()));
    };

    let options = EventOptions {
        include_matched_series: parse_flag(query.include_matched_series.as_deref(), false),
        include_matched_events: parse_flag(query.include_matched_events.as_deref(), false),
        count_only: parse_flag(query.count_only.as_deref(), false),
        range: peak_range(query.peak_start.as_deref(), query.peak_end.as_deref()),
    };
    let include_recent = parse_flag(query.include_recent.as_deref(), true);
    let limit = parse_positive_int(query.limit.as_deref(), DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT);

    station_events(&state.events, station_id, &options, include_recent, limit)
        .await
        .map(Json)
        .map_err(|e| AppError::query_failed(STATION_EVENTS_FAILURE, e))
}

async fn station_events(
    events: &EventRepository,
    station_id: &str,
    options: &EventOptions,
    include_recent: bool,
    limit: u64,
) -> Result<StationEventsBody, DbErr> {
    let scope = EventScope::Station(station_id.to_string());
    let filtered = events.filtered_summary(&scope, &options.range).await?;

    if options.count_only {
        return Ok(StationEventsBody::Count(StationEventCount {
            station_id: scope.id().to_string(),
            matched_events: filtered.matched_events,
        }));
    }

    let (summary, recent_events, matched_series, matched_events_detail) = tokio::try_join!(
        events.summary(&scope),
        when_enabled(include_recent, events.recent_events(station_id, limit)),
        when_enabled(
            options.include_matched_series,
            events.matched_series(&scope, &options.range)
        ),
        when_enabled(
            options.include_matched_events,
            events.matched_events(&scope, &options.range)
        ),
    )?;

    Ok(StationEventsBody::Full(StationEventsResponse {
        station_id: station_id.to_string(),
        summary: EventSummaryResponse::merge(summary, filtered),
        recent_events,
        matched_series,
        matched_events_detail,
    }))
}
