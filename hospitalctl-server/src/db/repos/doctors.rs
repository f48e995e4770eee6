//! Doctor repository
//!
//! consultation_fee is NUMERIC(10,2) in the store and crosses the
//! boundary as FLOAT8 in both directions.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};

use crate::models::NewDoctor;
use crate::db::DbError;

/// Doctor record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Doctor {
    pub doctor_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub experience_years: Option<i32>,
    pub consultation_fee: Option<f64>,
    /// Delimited weekday text, e.g. "Mon, Wed, Fri"
    pub available_days: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Doctor repository
pub struct DoctorRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> DoctorRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// List all doctors, newest first.
    pub async fn list(&mut self) -> Result<Vec<Doctor>, DbError> {
        let doctors = sqlx::query_as::<_, Doctor>(
            r#"
            SELECT
                doctor_id, first_name, last_name, specialization, phone, email,
                experience_years,
                consultation_fee::FLOAT8 AS consultation_fee,
                available_days, created_at
            FROM doctors
            ORDER BY created_at DESC, doctor_id DESC
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(doctors)
    }

    /// Insert a doctor and return its generated id.
    pub async fn create(&mut self, doctor: &NewDoctor) -> Result<i64, DbError> {
        let available_days =
            (!doctor.available_days.is_empty()).then(|| doctor.available_days.to_text());

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO doctors
                (first_name, last_name, specialization, phone, email,
                 experience_years, consultation_fee, available_days)
            VALUES ($1, $2, $3, $4, $5, $6, CAST($7 AS NUMERIC(10, 2)), $8)
            RETURNING doctor_id
            "#,
        )
        .bind(&doctor.first_name)
        .bind(&doctor.last_name)
        .bind(&doctor.specialization)
        .bind(doctor.phone.as_deref())
        .bind(doctor.email.as_deref())
        .bind(doctor.experience_years)
        .bind(doctor.consultation_fee)
        .bind(available_days)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    /// Total number of doctors.
    pub async fn count(&mut self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM doctors")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}
