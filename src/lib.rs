//! Hydro DB - Query API over flash-flood event records for Japanese hydrological stations
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod repository;
pub mod routes;
