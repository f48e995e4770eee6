//! Patient repository
//!
//! - list: newest first
//! - create: INSERT ... RETURNING patient_id
//! - delete: NotFound when no row matched

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgConnection};

use crate::models::NewPatient;
use crate::db::DbError;

/// Patient record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Patient {
    pub patient_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Patient repository
pub struct PatientRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PatientRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// List all patients, newest first.
    pub async fn list(&mut self) -> Result<Vec<Patient>, DbError> {
        let patients = sqlx::query_as::<_, Patient>(
            r#"
            SELECT
                patient_id, first_name, last_name, date_of_birth, gender,
                phone, email, address, blood_group, created_at
            FROM patients
            ORDER BY created_at DESC, patient_id DESC
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(patients)
    }

    /// Insert a patient and return its generated id.
    pub async fn create(&mut self, patient: &NewPatient) -> Result<i64, DbError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO patients
                (first_name, last_name, date_of_birth, gender, phone, email, address, blood_group)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING patient_id
            "#,
        )
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(patient.date_of_birth)
        .bind(patient.gender.map(|g| g.as_str()))
        .bind(patient.phone.as_deref())
        .bind(patient.email.as_deref())
        .bind(patient.address.as_deref())
        .bind(patient.blood_group.map(|g| g.as_str()))
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    /// Delete a patient by id.
    ///
    /// Appointments referencing the patient keep existing with a NULL
    /// patient_id (ON DELETE SET NULL).
    pub async fn delete(&mut self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM patients WHERE patient_id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("patient", id));
        }
        Ok(())
    }

    /// Total number of patients.
    pub async fn count(&mut self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM patients")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}
