pub mod basins;
pub mod events;
pub mod health;
pub mod params;
mod rate_limit;
pub mod stations;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::repository::{EventRecord, MatchedEvent, MatchedPoint};
use rate_limit::ClientIpKeyExtractor;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        stations::list_stations,
        stations::get_station_events,
        basins::get_basin_events,
    ),
    components(
        schemas(
            stations::StationResponse,
            stations::Pagination,
            stations::StationsResponse,
            stations::StationEventsResponse,
            stations::StationEventCount,
            stations::StationEventsBody,
            basins::BasinEventsResponse,
            basins::BasinEventCount,
            basins::BasinEventsBody,
            events::EventSummaryResponse,
            EventRecord,
            MatchedEvent,
            MatchedPoint,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "stations", description = "Station search and listing"),
        (name = "events", description = "Flash-flood event statistics by station or basin"),
    ),
    info(
        title = "Hydro DB API",
        description = "Query API over flash-flood event records for Japanese hydrological stations",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    let api_routes_base = Router::new()
        .route("/stations", get(stations::list_stations))
        .route(
            "/stations/{station_id}/events",
            get(stations::get_station_events),
        )
        .route("/basins/{basin_name}/events", get(basins::get_basin_events));

    let api_routes = if config.disable_rate_limiting {
        tracing::warn!("Rate limiting DISABLED");
        api_routes_base
    } else {
        tracing::info!(
            per_second = config.rate_limit_per_second,
            burst = config.rate_limit_burst,
            "Rate limiting configured"
        );

        let limiter = GovernorConfigBuilder::default()
            .key_extractor(ClientIpKeyExtractor)
            .per_second(config.rate_limit_per_second.max(1))
            .burst_size(config.rate_limit_burst.max(1))
            .finish()
            .expect("rate limiter quota is non-zero");

        api_routes_base.layer(GovernorLayer {
            config: Arc::new(limiter),
        })
    }
    .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // Health check routes (NO rate limiting)
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_paths_document_rate_limiting() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/stations",
            "/api/stations/{station_id}/events",
            "/api/basins/{basin_name}/events",
        ] {
            let operation = doc.paths.paths[path].get.as_ref().unwrap();
            assert!(operation.responses.responses.contains_key("429"), "{path}");
            assert!(operation.responses.responses.contains_key("500"), "{path}");
        }
    }
}
