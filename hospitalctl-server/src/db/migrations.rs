//! Schema migrations for the hospital tables
//!
//! Every statement is idempotent, so running at each startup is safe.
//! Appointment references use ON DELETE SET NULL: removing a patient or
//! doctor keeps its appointments and drops the link.

use sqlx::PgPool;

use super::DbError;

/// Run all migrations
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running hospital migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS patients (
            patient_id BIGSERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            date_of_birth DATE,
            gender TEXT CHECK (gender IN ('Male', 'Female', 'Other')),
            phone TEXT,
            email TEXT,
            address TEXT,
            blood_group TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctors (
            doctor_id BIGSERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            specialization TEXT NOT NULL,
            phone TEXT,
            email TEXT,
            experience_years INTEGER CHECK (experience_years >= 0),
            consultation_fee NUMERIC(10, 2) CHECK (consultation_fee >= 0),
            available_days TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            appointment_id BIGSERIAL PRIMARY KEY,
            patient_id BIGINT REFERENCES patients(patient_id) ON DELETE SET NULL,
            doctor_id BIGINT REFERENCES doctors(doctor_id) ON DELETE SET NULL,
            appointment_date DATE NOT NULL,
            appointment_time TIME NOT NULL,
            status TEXT NOT NULL DEFAULT 'Scheduled'
                CHECK (status IN ('Scheduled', 'Completed', 'Cancelled')),
            reason TEXT,
            notes TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Hospital migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_patients_created ON patients(created_at DESC)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_doctors_created ON doctors(created_at DESC)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_appointments_schedule ON appointments(appointment_date DESC, appointment_time DESC)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_appointments_status ON appointments(status)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_appointments_doctor ON appointments(doctor_id)")
        .execute(pool)
        .await?;

    Ok(())
}
