//! Read-only data access over the `stations` and `station_records` relations.
//!
//! Repositories are built once at startup (see [`crate::common::AppState`])
//! and shared by every request. All SQL is produced by the sea-query builder,
//! so the same code runs against the SQLite dataset and against Postgres.

mod events;
mod filter;
mod stations;

pub use events::{
    EventRecord, EventRepository, EventSummary, FilteredSummary, MatchedEvent, MatchedPoint,
};
pub use filter::{EventScope, PeakRange};
pub use stations::{
    StationFilter, StationPage, StationRepository, DEFAULT_PAGE_SIZE, MAX_PAGE, MAX_PAGE_SIZE,
};
