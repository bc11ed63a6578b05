use sea_orm::{ColumnTrait, Condition};

use crate::entity::station_records;

/// Which events a query covers: one station, or every station in a basin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventScope {
    /// Exact match on `station_records.station_id`.
    Station(String),
    /// Exact, case-sensitive match on `stations.basin_name` through a join.
    Basin(String),
}

impl EventScope {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Station(id) | Self::Basin(id) => id,
        }
    }
}

/// Optional inclusive bounds on an event's peak timestamp.
///
/// Bounds are full `YYYY-MM-DD HH:MM:SS` strings; an absent bound leaves that
/// side of the range open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeakRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl PeakRange {
    /// Range covering whole days: `start` from `00:00:00`, `end` through `23:59:59`.
    ///
    /// Dates are expected in `YYYY-MM-DD` form; if both are given and out of
    /// order they are swapped.
    #[must_use]
    pub fn from_dates(start: Option<&str>, end: Option<&str>) -> Self {
        let (start, end) = match (start, end) {
            (Some(s), Some(e)) if s > e => (Some(e), Some(s)),
            other => other,
        };

        Self {
            start: start.map(|d| format!("{d} 00:00:00")),
            end: end.map(|d| format!("{d} 23:59:59")),
        }
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Predicate on `station_records.peak_time`. Empty (always true) when unbounded.
    #[must_use]
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(start) = &self.start {
            condition = condition.add(station_records::Column::PeakTime.gte(start.as_str()));
        }
        if let Some(end) = &self.end {
            condition = condition.add(station_records::Column::PeakTime.lte(end.as_str()));
        }
        condition
    }
}
