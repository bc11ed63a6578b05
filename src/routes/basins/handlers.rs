use axum::{
    extract::{Path, Query, State},
    Json,
};
use sea_orm::DbErr;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::repository::{EventRepository, EventScope};
use crate::routes::events::{when_enabled, EventOptions, EventSummaryResponse};
use crate::routes::params::{clean_path_segment, parse_flag, peak_range, QueryPairs};

use super::types::{BasinEventCount, BasinEventsBody, BasinEventsQuery, BasinEventsResponse};

const BASIN_EVENTS_FAILURE: &str = "Failed to query basin events.";

/// Event statistics across every station in a basin
///
/// The basin name must match `stations.basin_name` exactly.
#[utoipa::path(
    get,
    path = "/api/basins/{basin_name}/events",
    params(
        ("basin_name" = String, Path, description = "Basin name (exact match)"),
        BasinEventsQuery
    ),
    responses(
        (status = 200, description = "Basin events retrieved successfully", body = BasinEventsBody),
        (status = 400, description = "basinName is required"),
        (status = 500, description = "Failed to query basin events"),
        (status = 429, description = "Too many requests from this client"),
    ),
    tag = "events"
)]
pub async fn get_basin_events(
    State(state): State<AppState>,
    Path(basin_name): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<BasinEventsBody>> {
    let query = BasinEventsQuery::from(QueryPairs::from(pairs));
    let Some(basin_name) = clean_path_segment(&basin_name) else {
        return Err(AppError::BadRequest("basinName is required.".to_string()));
    };

    let options = EventOptions {
        include_matched_series: parse_flag(query.include_matched_series.as_deref(), false),
        include_matched_events: parse_flag(query.include_matched_events.as_deref(), false),
        count_only: parse_flag(query.count_only.as_deref(), false),
        range: peak_range(query.peak_start.as_deref(), query.peak_end.as_deref()),
    };

    basin_events(&state.events, basin_name, &options)
        .await
        .map(Json)
        .map_err(|e| AppError::query_failed(BASIN_EVENTS_FAILURE, e))
}

async fn basin_events(
    events: &EventRepository,
    basin_name: &str,
    options: &EventOptions,
) -> Result<BasinEventsBody, DbErr> {
    let scope = EventScope::Basin(basin_name.to_string());
    let filtered = events.filtered_summary(&scope, &options.range).await?;

    if options.count_only {
        return Ok(BasinEventsBody::Count(BasinEventCount {
            basin_name: scope.id().to_string(),
            matched_events: filtered.matched_events,
        }));
    }

    let (summary, matched_series, matched_events_detail) = tokio::try_join!(
        events.summary(&scope),
        when_enabled(
            options.include_matched_series,
            events.matched_series(&scope, &options.range)
        ),
        when_enabled(
            options.include_matched_events,
            events.matched_events(&scope, &options.range)
        ),
    )?;

    Ok(BasinEventsBody::Full(BasinEventsResponse {
        basin_name: basin_name.to_string(),
        summary: EventSummaryResponse::merge(summary, filtered),
        recent_events: Vec::new(),
        matched_series,
        matched_events_detail,
    }))
}
