//! Appointment repository
//!
//! Listing LEFT JOINs patients and doctors so every appointment comes
//! back with display names; a dangling reference yields NULL names
//! instead of dropping the row or failing the list.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{FromRow, PgConnection};

use crate::models::{AppointmentStatus, NewAppointment};
use crate::db::DbError;

/// Appointment enriched with patient and doctor display fields
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AppointmentDetails {
    pub appointment_id: i64,
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    #[sqlx(try_from = "String")]
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub specialization: Option<String>,
}

/// Appointment repository
pub struct AppointmentRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> AppointmentRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// List appointments with names, latest slot first.
    pub async fn list(&mut self) -> Result<Vec<AppointmentDetails>, DbError> {
        let appointments = sqlx::query_as::<_, AppointmentDetails>(
            r#"
            SELECT
                a.appointment_id,
                a.patient_id,
                a.doctor_id,
                a.appointment_date,
                a.appointment_time,
                a.status,
                a.reason,
                a.notes,
                a.created_at,
                p.first_name || ' ' || p.last_name AS patient_name,
                d.first_name || ' ' || d.last_name AS doctor_name,
                d.specialization
            FROM appointments a
            LEFT JOIN patients p ON p.patient_id = a.patient_id
            LEFT JOIN doctors d ON d.doctor_id = a.doctor_id
            ORDER BY a.appointment_date DESC, a.appointment_time DESC, a.appointment_id DESC
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(appointments)
    }

    /// Insert an appointment (status defaults to Scheduled) and return its id.
    pub async fn create(&mut self, appointment: &NewAppointment) -> Result<i64, DbError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO appointments
                (patient_id, doctor_id, appointment_date, appointment_time, status, reason, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING appointment_id
            "#,
        )
        .bind(appointment.patient_id)
        .bind(appointment.doctor_id)
        .bind(appointment.appointment_date)
        .bind(appointment.appointment_time)
        .bind(AppointmentStatus::default().as_str())
        .bind(appointment.reason.as_deref())
        .bind(appointment.notes.as_deref())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    /// Change only the status column of one appointment.
    pub async fn update_status(
        &mut self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE appointments SET status = $1 WHERE appointment_id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("appointment", id));
        }
        Ok(())
    }

    /// Number of appointments currently in `status`.
    pub async fn count_by_status(&mut self, status: AppointmentStatus) -> Result<i64, DbError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM appointments WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(&mut *self.conn)
                .await?;
        Ok(count)
    }

    /// Number of appointments booked on `date`.
    pub async fn count_on(&mut self, date: NaiveDate) -> Result<i64, DbError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM appointments WHERE appointment_date = $1")
                .bind(date)
                .fetch_one(&mut *self.conn)
                .await?;
        Ok(count)
    }
}
