mod handlers;
mod types;

pub use handlers::{get_station_events, list_stations, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT};
pub use types::{
    Pagination, StationEventCount, StationEventsBody, StationEventsQuery, StationEventsResponse,
    StationResponse, StationsQuery, StationsResponse,
};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{__path_get_station_events, __path_list_stations};
