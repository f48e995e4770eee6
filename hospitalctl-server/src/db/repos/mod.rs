//! Repository implementations for database access
//!
//! Each repository borrows the request's connection:
//! - Single-statement writes with RETURNING for generated ids
//! - NotFound for targeted updates/deletes that match no row
//! - LEFT JOIN enrichment for appointment listing

pub mod patients;
pub mod doctors;
pub mod appointments;

pub use patients::{PatientRepo, Patient};
pub use doctors::{DoctorRepo, Doctor};
pub use appointments::{AppointmentRepo, AppointmentDetails};
