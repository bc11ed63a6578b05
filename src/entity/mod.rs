pub mod station_records;
pub mod stations;
