//! Patient endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;

use crate::db::{DbError, Patient, PatientRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId};
use crate::http::server::AppState;
use crate::models::{NewPatient, PatientPayload};
use super::MessageResponse;

/// Patient response
#[derive(Serialize)]
pub struct PatientResponse {
    pub patient_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub created_at: String,
}

impl From<Patient> for PatientResponse {
    fn from(p: Patient) -> Self {
        Self {
            patient_id: p.patient_id,
            first_name: p.first_name,
            last_name: p.last_name,
            date_of_birth: p.date_of_birth.map(|d| d.to_string()),
            gender: p.gender,
            phone: p.phone,
            email: p.email,
            address: p.address,
            blood_group: p.blood_group,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Created patient response
#[derive(Serialize)]
pub struct PatientCreated {
    pub message: &'static str,
    pub patient_id: i64,
}

/// GET /api/patients - all patients, newest first
async fn list_patients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PatientResponse>>, ApiError> {
    let mut conn = state.acquire().await?;
    let patients = PatientRepo::new(&mut conn).list().await?;

    Ok(Json(patients.into_iter().map(PatientResponse::from).collect()))
}

/// POST /api/patients - register a patient
async fn create_patient(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<PatientPayload>,
) -> Result<(StatusCode, Json<PatientCreated>), ApiError> {
    let patient = NewPatient::try_from(payload)?;

    let mut conn = state.acquire().await?;
    let patient_id = PatientRepo::new(&mut conn).create(&patient).await?;
    tracing::info!(patient_id, "Patient created");

    Ok((
        StatusCode::CREATED,
        Json(PatientCreated {
            message: "Patient added successfully",
            patient_id,
        }),
    ))
}

/// DELETE /api/patients/{id} - idempotent: a missing id still succeeds
async fn delete_patient(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut conn = state.acquire().await?;

    match PatientRepo::new(&mut conn).delete(id).await {
        Ok(()) => tracing::info!(patient_id = id, "Patient deleted"),
        Err(DbError::NotFound { .. }) => {
            tracing::debug!(patient_id = id, "Delete of absent patient ignored")
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Json(MessageResponse {
        message: "Patient deleted successfully",
    }))
}

/// Patient routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/patients", get(list_patients).post(create_patient))
        .route("/api/patients/{id}", delete(delete_patient))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn response_renders_dates_as_text() {
        let patient = Patient {
            patient_id: 4,
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17),
            gender: Some("Female".into()),
            phone: None,
            email: None,
            address: None,
            blood_group: Some("O+".into()),
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        };

        let json = serde_json::to_value(PatientResponse::from(patient)).unwrap();
        assert_eq!(json["patient_id"], 4);
        assert_eq!(json["date_of_birth"], "1990-05-17");
        assert_eq!(json["created_at"], "2025-01-02T03:04:05+00:00");
        assert!(json["email"].is_null());
    }
}
