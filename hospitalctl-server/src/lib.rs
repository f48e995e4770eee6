//! hospitalctl-server: HTTP backend for hospital administration
//!
//! Patients, doctors and appointments over PostgreSQL, plus dashboard
//! counts. Each request takes one pooled connection, hands it to the
//! repositories it needs, and releases it when the handler returns.

pub mod db;
pub mod http;
pub mod models;
pub mod stats;

pub use db::{DatabaseConfig, DbError};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
