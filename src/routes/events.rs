use sea_orm::DbErr;
use serde::Serialize;
use std::future::Future;
use utoipa::ToSchema;

use crate::repository::{EventSummary, FilteredSummary, PeakRange};

/// Normalized switches shared by the station and basin event endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOptions {
    pub include_matched_series: bool,
    pub include_matched_events: bool,
    pub count_only: bool,
    pub range: PeakRange,
}

/// Unfiltered extent plus range-filtered statistics, merged into one object.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventSummaryResponse {
    pub total_events: i64,
    pub matched_events: i64,
    pub first_start_time: Option<String>,
    pub last_end_time: Option<String>,
    pub min_peak_time: Option<String>,
    pub max_peak_time: Option<String>,
    pub max_peak_value: Option<f64>,
    pub avg_peak_value: Option<f64>,
    pub avg_rise_time: Option<f64>,
    pub avg_fall_time: Option<f64>,
}

impl EventSummaryResponse {
    #[must_use]
    pub fn merge(summary: EventSummary, filtered: FilteredSummary) -> Self {
        Self {
            total_events: summary.total_events,
            matched_events: filtered.matched_events,
            first_start_time: summary.first_start_time,
            last_end_time: summary.last_end_time,
            min_peak_time: summary.min_peak_time,
            max_peak_time: summary.max_peak_time,
            max_peak_value: filtered.max_peak_value,
            avg_peak_value: filtered.avg_peak_value,
            avg_rise_time: filtered.avg_rise_time,
            avg_fall_time: filtered.avg_fall_time,
        }
    }
}

/// Runs `query` only when `enabled`, so disabled sections cost nothing.
pub async fn when_enabled<T, F>(enabled: bool, query: F) -> Result<Option<T>, DbErr>
where
    F: Future<Output = Result<T, DbErr>>,
{
    if enabled {
        query.await.map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn merged_summary_keeps_nulls_as_null() {
        let merged = EventSummaryResponse::merge(
            EventSummary {
                total_events: 4,
                first_start_time: Some("2018-07-05 03:00:00".to_string()),
                last_end_time: Some("2021-08-14 22:00:00".to_string()),
                min_peak_time: Some("2018-07-06 11:00:00".to_string()),
                max_peak_time: Some("2021-08-14 09:00:00".to_string()),
            },
            FilteredSummary::default(),
        );

        assert_eq!(
            serde_json::to_value(&merged).unwrap(),
            json!({
                "totalEvents": 4,
                "matchedEvents": 0,
                "firstStartTime": "2018-07-05 03:00:00",
                "lastEndTime": "2021-08-14 22:00:00",
                "minPeakTime": "2018-07-06 11:00:00",
                "maxPeakTime": "2021-08-14 09:00:00",
                "maxPeakValue": null,
                "avgPeakValue": null,
                "avgRiseTime": null,
                "avgFallTime": null,
            })
        );
    }

    #[tokio::test]
    async fn disabled_section_is_not_run() {
        let ran = AtomicBool::new(false);
        let skipped = when_enabled(false, async {
            ran.store(true, Ordering::SeqCst);
            Ok::<_, DbErr>(1)
        })
        .await
        .unwrap();
        assert!(skipped.is_none());
        assert!(!ran.load(Ordering::SeqCst));

        let run = when_enabled(true, async { Ok::<_, DbErr>(7) }).await.unwrap();
        assert_eq!(run, Some(7));
    }
}
