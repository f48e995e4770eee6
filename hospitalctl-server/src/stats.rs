//! Dashboard statistics
//!
//! Four independent counts composed from the repositories on one
//! connection. They are not read in a shared snapshot, so under
//! concurrent writes they may reflect slightly different instants.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use sqlx::PgConnection;

use crate::db::{AppointmentRepo, DbError, DoctorRepo, PatientRepo};
use crate::models::AppointmentStatus;

/// Dashboard counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_patients: i64,
    pub total_doctors: i64,
    /// Appointments still in `Scheduled`
    pub pending_appointments: i64,
    /// Appointments whose date is today
    pub today_appointments: i64,
}

/// Aggregation service over the entity repositories
pub struct StatsService<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> StatsService<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Compute all counters, with `today` deciding `today_appointments`.
    pub async fn compute(&mut self, today: NaiveDate) -> Result<DashboardStats, DbError> {
        let total_patients = PatientRepo::new(&mut *self.conn).count().await?;
        let total_doctors = DoctorRepo::new(&mut *self.conn).count().await?;

        let mut appointments = AppointmentRepo::new(&mut *self.conn);
        let pending_appointments = appointments
            .count_by_status(AppointmentStatus::Scheduled)
            .await?;
        let today_appointments = appointments.count_on(today).await?;

        Ok(DashboardStats {
            total_patients,
            total_doctors,
            pending_appointments,
            today_appointments,
        })
    }
}

/// Current calendar date in `tz`, read from the clock at call time.
pub fn today_in(tz: Tz) -> NaiveDate {
    date_at(Utc::now(), tz)
}

/// Calendar date of `instant` as seen in `tz`.
pub fn date_at(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}
