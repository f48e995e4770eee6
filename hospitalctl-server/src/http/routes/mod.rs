//! Route handlers organized by resource

pub mod health;
pub mod patients;
pub mod doctors;
pub mod appointments;
pub mod stats;

use serde::Serialize;

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
