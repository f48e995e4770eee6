//! Domain models with validation at construction
//!
//! Request bodies deserialize into lenient `*Payload` structs, then
//! convert via `TryFrom` into the validated `New*` types the repositories
//! accept. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod fields;
pub mod patient;
pub mod doctor;
pub mod appointment;

pub use validation::ValidationError;
pub use fields::FormValue;
pub use patient::{BloodGroup, Gender, NewPatient, PatientPayload};
pub use doctor::{AvailableDays, DoctorPayload, NewDoctor};
pub use appointment::{AppointmentPayload, AppointmentStatus, NewAppointment, StatusPayload};
