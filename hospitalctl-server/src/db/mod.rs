//! Database layer - connection provider, migrations and repositories
//!
//! # Design Principles
//!
//! - One pooled connection per request, released when the guard drops
//! - Repositories borrow that connection; they never touch the pool
//! - Appointment listing enriches names with LEFT JOINs (no N+1)
//! - Inserts use RETURNING so the generated id comes back atomically

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use pool::{acquire, create_lazy_pool, create_pool, ping, Conn, DatabaseConfig};
pub use repos::*;
