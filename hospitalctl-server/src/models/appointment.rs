//! Appointment payload validation and status lifecycle

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::fields::{self, FormValue, MAX_TEXT_LEN};
use super::ValidationError;

/// Appointment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 3] = [Self::Scheduled, Self::Completed, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "status",
                value: s.to_owned(),
            })
    }
}

impl TryFrom<String> for AppointmentStatus {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Raw POST /api/appointments body
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentPayload {
    pub patient_id: Option<FormValue>,
    pub doctor_id: Option<FormValue>,
    pub appointment_date: Option<FormValue>,
    pub appointment_time: Option<FormValue>,
    pub reason: Option<FormValue>,
    pub notes: Option<FormValue>,
}

/// Validated appointment ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<AppointmentPayload> for NewAppointment {
    type Error = ValidationError;

    fn try_from(p: AppointmentPayload) -> Result<Self, Self::Error> {
        let patient_id = fields::required_id(p.patient_id, "patient_id")?;
        let doctor_id = fields::required_id(p.doctor_id, "doctor_id")?;
        let appointment_date = fields::date(p.appointment_date, "appointment_date")?
            .ok_or(ValidationError::Missing {
                field: "appointment_date",
            })?;
        let appointment_time = fields::time(p.appointment_time, "appointment_time")?
            .ok_or(ValidationError::Missing {
                field: "appointment_time",
            })?;
        let reason = fields::optional_text(p.reason, "reason", MAX_TEXT_LEN)?;
        let notes = fields::optional_text(p.notes, "notes", MAX_TEXT_LEN)?;

        Ok(Self {
            patient_id,
            doctor_id,
            appointment_date,
            appointment_time,
            reason,
            notes,
        })
    }
}

/// Raw PUT /api/appointments/{id} body
#[derive(Debug, Default, Deserialize)]
pub struct StatusPayload {
    pub status: Option<FormValue>,
}

impl TryFrom<StatusPayload> for AppointmentStatus {
    type Error = ValidationError;

    fn try_from(p: StatusPayload) -> Result<Self, Self::Error> {
        fields::text(p.status, "status")?
            .ok_or(ValidationError::Missing { field: "status" })?
            .parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> AppointmentPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn accepts_string_ids_from_forms() {
        let a = NewAppointment::try_from(payload(
            r#"{
                "patient_id": "3",
                "doctor_id": 7,
                "appointment_date": "2025-01-20",
                "appointment_time": "10:15",
                "reason": "Follow-up"
            }"#,
        ))
        .unwrap();

        assert_eq!(a.patient_id, 3);
        assert_eq!(a.doctor_id, 7);
        assert_eq!(a.appointment_time, NaiveTime::from_hms_opt(10, 15, 0).unwrap());
        assert_eq!(a.reason.as_deref(), Some("Follow-up"));
        assert_eq!(a.notes, None);
    }

    #[test]
    fn each_mandatory_field_is_reported() {
        let full = r#""patient_id": 1, "doctor_id": 2, "appointment_date": "2025-01-20", "appointment_time": "10:00""#;
        for field in ["patient_id", "doctor_id", "appointment_date", "appointment_time"] {
            let body: serde_json::Value = serde_json::from_str(&format!("{{{}}}", full)).unwrap();
            let mut body = body.as_object().unwrap().clone();
            body.remove(field);
            let p: AppointmentPayload =
                serde_json::from_value(serde_json::Value::Object(body)).unwrap();
            assert_eq!(
                NewAppointment::try_from(p).unwrap_err(),
                ValidationError::Missing { field }
            );
        }
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            "completed".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Completed
        );
        assert!("Pending".parse::<AppointmentStatus>().is_err());
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Scheduled);
    }

    #[test]
    fn status_payload_requires_status() {
        let err = AppointmentStatus::try_from(StatusPayload::default()).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "status" });

        let p: StatusPayload = serde_json::from_str(r#"{"status": "Cancelled"}"#).unwrap();
        assert_eq!(
            AppointmentStatus::try_from(p).unwrap(),
            AppointmentStatus::Cancelled
        );
    }
}
