//! Appointment endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;

use crate::db::{AppointmentDetails, AppointmentRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId};
use crate::http::server::AppState;
use crate::models::{AppointmentPayload, AppointmentStatus, NewAppointment, StatusPayload};
use super::MessageResponse;

/// Enriched appointment response; date and time rendered as text
#[derive(Serialize)]
pub struct AppointmentResponse {
    pub appointment_id: i64,
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub appointment_date: String,
    pub appointment_time: String,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub specialization: Option<String>,
}

impl From<AppointmentDetails> for AppointmentResponse {
    fn from(a: AppointmentDetails) -> Self {
        Self {
            appointment_id: a.appointment_id,
            patient_id: a.patient_id,
            doctor_id: a.doctor_id,
            appointment_date: a.appointment_date.format("%Y-%m-%d").to_string(),
            appointment_time: a.appointment_time.format("%H:%M:%S").to_string(),
            status: a.status,
            reason: a.reason,
            notes: a.notes,
            patient_name: a.patient_name,
            doctor_name: a.doctor_name,
            specialization: a.specialization,
        }
    }
}

/// Created appointment response
#[derive(Serialize)]
pub struct AppointmentCreated {
    pub message: &'static str,
    pub appointment_id: i64,
}

/// GET /api/appointments - all appointments with patient/doctor names
async fn list_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AppointmentResponse>>, ApiError> {
    let mut conn = state.acquire().await?;
    let appointments = AppointmentRepo::new(&mut conn).list().await?;
    tracing::debug!(count = appointments.len(), "Listed appointments");

    Ok(Json(
        appointments
            .into_iter()
            .map(AppointmentResponse::from)
            .collect(),
    ))
}

/// POST /api/appointments - book an appointment
async fn create_appointment(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<AppointmentPayload>,
) -> Result<(StatusCode, Json<AppointmentCreated>), ApiError> {
    let appointment = NewAppointment::try_from(payload)?;

    let mut conn = state.acquire().await?;
    let appointment_id = AppointmentRepo::new(&mut conn).create(&appointment).await?;
    tracing::info!(
        appointment_id,
        patient_id = appointment.patient_id,
        doctor_id = appointment.doctor_id,
        "Appointment scheduled"
    );

    Ok((
        StatusCode::CREATED,
        Json(AppointmentCreated {
            message: "Appointment scheduled successfully",
            appointment_id,
        }),
    ))
}

/// PUT /api/appointments/{id} - change status only
async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    JsonBody(payload): JsonBody<StatusPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    let status = AppointmentStatus::try_from(payload)?;

    let mut conn = state.acquire().await?;
    AppointmentRepo::new(&mut conn).update_status(id, status).await?;
    tracing::info!(appointment_id = id, %status, "Appointment status updated");

    Ok(Json(MessageResponse {
        message: "Appointment updated successfully",
    }))
}

/// Appointment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route("/api/appointments/{id}", put(update_appointment_status))
}
