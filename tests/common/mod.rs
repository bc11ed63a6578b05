//! Shared fixtures: an in-memory SQLite database with a small station dataset.

#![allow(dead_code)]

use hydro_db::entity::{station_records, stations};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

pub const KISO: &str = "木曽川";

/// Single-connection pool: every SQLite `:memory:` connection is its own database.
pub async fn empty_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(options).await.unwrap()
}

pub async fn migrated_db() -> DatabaseConnection {
    let db = empty_db().await;
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

pub struct StationSeed {
    pub station_id: &'static str,
    pub basin_name: Option<&'static str>,
    pub river_name: Option<&'static str>,
    pub station_name: Option<&'static str>,
    pub station_name2: Option<&'static str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub has_data: i32,
}

pub async fn add_station(db: &DatabaseConnection, seed: StationSeed) {
    stations::ActiveModel {
        station_id: Set(seed.station_id.to_string()),
        latitude: Set(seed.latitude),
        longitude: Set(seed.longitude),
        basin_name: Set(seed.basin_name.map(str::to_string)),
        river_name: Set(seed.river_name.map(str::to_string)),
        station_name: Set(seed.station_name.map(str::to_string)),
        station_name2: Set(seed.station_name2.map(str::to_string)),
        station_name3: Set(None),
        description: Set(None),
        has_data: Set(Some(seed.has_data)),
    }
    .insert(db)
    .await
    .unwrap();
}

#[derive(Default)]
pub struct EventSeed {
    pub start_time: Option<&'static str>,
    pub peak_time: Option<&'static str>,
    pub end_time: Option<&'static str>,
    pub peak_value: Option<f64>,
    pub rise_time: Option<f64>,
    pub fall_time: Option<f64>,
}

pub async fn add_event(db: &DatabaseConnection, station_id: &str, seed: EventSeed) -> i32 {
    station_records::ActiveModel {
        station_id: Set(Some(station_id.to_string())),
        start_time: Set(seed.start_time.map(str::to_string)),
        peak_time: Set(seed.peak_time.map(str::to_string)),
        end_time: Set(seed.end_time.map(str::to_string)),
        start_value: Set(seed.peak_value.map(|v| v / 4.0)),
        peak_value: Set(seed.peak_value),
        end_value: Set(seed.peak_value.map(|v| v / 2.0)),
        rise_time: Set(seed.rise_time),
        fall_time: Set(seed.fall_time),
        peak_time_str: Set(seed.peak_time.map(|t| format!("{t} JST"))),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

/// Stations:
/// - `A001`, `A002`: basin 木曽川, with data
/// - `B001`: basin `Tone`, with data
/// - `C001`: basin `Tonegawa`, no data, unlocated
/// - `D001`: no basin, no data
///
/// Events:
/// - `A001`: peaks 1.0 @ 2020-01-01 00:00:00, 5.0 @ 2020-03-15 12:00:00, 3.0 @ 2020-06-01 23:59:59
/// - `A002`: 2.5 @ 2021-07-10 09:00:00, null value @ 2021-08-01 10:00:00, 4.0 with no peak time
/// - `B001`: 7.0 @ 2020-06-02 00:00:00
/// - `C001`: 9.0 @ 2020-05-05 05:00:00
pub async fn seeded_db() -> DatabaseConnection {
    let db = migrated_db().await;

    add_station(
        &db,
        StationSeed {
            station_id: "A001",
            basin_name: Some(KISO),
            river_name: Some(KISO),
            station_name: Some("今渡"),
            station_name2: Some("Imawatari"),
            latitude: Some(35.43),
            longitude: Some(137.04),
            has_data: 1,
        },
    )
    .await;
    add_station(
        &db,
        StationSeed {
            station_id: "A002",
            basin_name: Some(KISO),
            river_name: Some("飛騨川"),
            station_name: Some("上麻生"),
            station_name2: None,
            latitude: Some(35.55),
            longitude: Some(137.12),
            has_data: 1,
        },
    )
    .await;
    add_station(
        &db,
        StationSeed {
            station_id: "B001",
            basin_name: Some("Tone"),
            river_name: Some("Tone River"),
            station_name: Some("Yattajima"),
            station_name2: Some("八斗島"),
            latitude: Some(36.27),
            longitude: Some(139.17),
            has_data: 1,
        },
    )
    .await;
    add_station(
        &db,
        StationSeed {
            station_id: "C001",
            basin_name: Some("Tonegawa"),
            river_name: None,
            station_name: Some("Unlocated gauge"),
            station_name2: None,
            latitude: None,
            longitude: None,
            has_data: 0,
        },
    )
    .await;
    add_station(
        &db,
        StationSeed {
            station_id: "D001",
            basin_name: None,
            river_name: None,
            station_name: None,
            station_name2: None,
            latitude: Some(33.0),
            longitude: Some(131.0),
            has_data: 0,
        },
    )
    .await;

    add_event(
        &db,
        "A001",
        EventSeed {
            start_time: Some("2019-12-31 20:00:00"),
            peak_time: Some("2020-01-01 00:00:00"),
            end_time: Some("2020-01-01 06:00:00"),
            peak_value: Some(1.0),
            rise_time: Some(2.0),
            fall_time: Some(4.0),
        },
    )
    .await;
    add_event(
        &db,
        "A001",
        EventSeed {
            start_time: Some("2020-03-15 08:00:00"),
            peak_time: Some("2020-03-15 12:00:00"),
            end_time: Some("2020-03-16 00:00:00"),
            peak_value: Some(5.0),
            rise_time: Some(4.0),
            fall_time: Some(6.0),
        },
    )
    .await;
    add_event(
        &db,
        "A001",
        EventSeed {
            start_time: Some("2020-06-01 20:00:00"),
            peak_time: Some("2020-06-01 23:59:59"),
            end_time: Some("2020-06-02 04:00:00"),
            peak_value: Some(3.0),
            rise_time: Some(3.0),
            fall_time: Some(5.0),
        },
    )
    .await;

    add_event(
        &db,
        "A002",
        EventSeed {
            start_time: Some("2021-07-10 05:00:00"),
            peak_time: Some("2021-07-10 09:00:00"),
            end_time: Some("2021-07-10 18:00:00"),
            peak_value: Some(2.5),
            rise_time: Some(1.0),
            fall_time: Some(2.0),
        },
    )
    .await;
    add_event(
        &db,
        "A002",
        EventSeed {
            start_time: Some("2021-08-01 06:00:00"),
            peak_time: Some("2021-08-01 10:00:00"),
            end_time: Some("2021-08-01 20:00:00"),
            peak_value: None,
            rise_time: None,
            fall_time: None,
        },
    )
    .await;
    add_event(
        &db,
        "A002",
        EventSeed {
            start_time: Some("2021-09-01 00:00:00"),
            peak_value: Some(4.0),
            ..EventSeed::default()
        },
    )
    .await;

    add_event(
        &db,
        "B001",
        EventSeed {
            start_time: Some("2020-06-01 18:00:00"),
            peak_time: Some("2020-06-02 00:00:00"),
            end_time: Some("2020-06-02 09:00:00"),
            peak_value: Some(7.0),
            rise_time: Some(6.0),
            fall_time: Some(9.0),
        },
    )
    .await;
    add_event(
        &db,
        "C001",
        EventSeed {
            peak_time: Some("2020-05-05 05:00:00"),
            peak_value: Some(9.0),
            ..EventSeed::default()
        },
    )
    .await;

    db
}
