mod handlers;
mod types;

pub use handlers::get_basin_events;
pub use types::{BasinEventCount, BasinEventsBody, BasinEventsQuery, BasinEventsResponse};

pub use handlers::__path_get_basin_events;
