use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;
use crate::repository::{EventRepository, StationRepository};

/// Shared, read-only request context. Cloned per request; holds no per-request state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub stations: StationRepository,
    pub events: EventRepository,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            stations: StationRepository::new(db.clone()),
            events: EventRepository::new(db),
            config: Arc::new(config),
        }
    }
}
