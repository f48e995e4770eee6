//! Doctor endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::db::{Doctor, DoctorRepo};
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::{DoctorPayload, NewDoctor};

/// Doctor response
#[derive(Serialize)]
pub struct DoctorResponse {
    pub doctor_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub experience_years: Option<i32>,
    pub consultation_fee: Option<f64>,
    pub available_days: Option<String>,
    pub created_at: String,
}

impl From<Doctor> for DoctorResponse {
    fn from(d: Doctor) -> Self {
        Self {
            doctor_id: d.doctor_id,
            first_name: d.first_name,
            last_name: d.last_name,
            specialization: d.specialization,
            phone: d.phone,
            email: d.email,
            experience_years: d.experience_years,
            consultation_fee: d.consultation_fee,
            available_days: d.available_days,
            created_at: d.created_at.to_rfc3339(),
        }
    }
}

/// Created doctor response
#[derive(Serialize)]
pub struct DoctorCreated {
    pub message: &'static str,
    pub doctor_id: i64,
}

/// GET /api/doctors - all doctors, newest first
async fn list_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DoctorResponse>>, ApiError> {
    let mut conn = state.acquire().await?;
    let doctors = DoctorRepo::new(&mut conn).list().await?;

    Ok(Json(doctors.into_iter().map(DoctorResponse::from).collect()))
}

/// POST /api/doctors - register a doctor
async fn create_doctor(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<DoctorPayload>,
) -> Result<(StatusCode, Json<DoctorCreated>), ApiError> {
    let doctor = NewDoctor::try_from(payload)?;

    let mut conn = state.acquire().await?;
    let doctor_id = DoctorRepo::new(&mut conn).create(&doctor).await?;
    tracing::info!(doctor_id, "Doctor created");

    Ok((
        StatusCode::CREATED,
        Json(DoctorCreated {
            message: "Doctor added successfully",
            doctor_id,
        }),
    ))
}

/// Doctor routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/doctors", get(list_doctors).post(create_doctor))
}
