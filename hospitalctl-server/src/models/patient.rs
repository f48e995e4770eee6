//! Patient payload validation

use chrono::NaiveDate;
use serde::Deserialize;

use super::fields::{self, FormValue, MAX_NAME_LEN, MAX_TEXT_LEN};
use super::ValidationError;

/// Recorded gender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    /// Parse case-insensitively.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(ValidationError::InvalidVariant {
                field: "gender",
                value: s.to_owned(),
            }),
        }
    }
}

/// ABO/Rh blood group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloodGroup {
    APos,
    ANeg,
    BPos,
    BNeg,
    AbPos,
    AbNeg,
    OPos,
    ONeg,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        Self::APos,
        Self::ANeg,
        Self::BPos,
        Self::BNeg,
        Self::AbPos,
        Self::AbNeg,
        Self::OPos,
        Self::ONeg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APos => "A+",
            Self::ANeg => "A-",
            Self::BPos => "B+",
            Self::BNeg => "B-",
            Self::AbPos => "AB+",
            Self::AbNeg => "AB-",
            Self::OPos => "O+",
            Self::ONeg => "O-",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == upper)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "blood_group",
                value: s.to_owned(),
            })
    }
}

/// Raw POST /api/patients body
#[derive(Debug, Default, Deserialize)]
pub struct PatientPayload {
    pub first_name: Option<FormValue>,
    pub last_name: Option<FormValue>,
    pub date_of_birth: Option<FormValue>,
    pub gender: Option<FormValue>,
    pub phone: Option<FormValue>,
    pub email: Option<FormValue>,
    pub address: Option<FormValue>,
    pub blood_group: Option<FormValue>,
}

/// Validated patient ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<BloodGroup>,
}

impl TryFrom<PatientPayload> for NewPatient {
    type Error = ValidationError;

    fn try_from(p: PatientPayload) -> Result<Self, Self::Error> {
        let first_name = fields::required_text(p.first_name, "first_name", MAX_NAME_LEN)?;
        let last_name = fields::required_text(p.last_name, "last_name", MAX_NAME_LEN)?;
        let date_of_birth = fields::date(p.date_of_birth, "date_of_birth")?;
        let gender = fields::text(p.gender, "gender")?
            .map(|g| Gender::parse(&g))
            .transpose()?;
        let phone = fields::phone(p.phone, "phone")?;
        let email = fields::email(p.email, "email")?;
        let address = fields::optional_text(p.address, "address", MAX_TEXT_LEN)?;
        let blood_group = fields::text(p.blood_group, "blood_group")?
            .map(|g| BloodGroup::parse(&g))
            .transpose()?;

        Ok(Self {
            first_name,
            last_name,
            date_of_birth,
            gender,
            phone,
            email,
            address,
            blood_group,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> PatientPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn accepts_form_style_payload() {
        let p = NewPatient::try_from(payload(
            r#"{
                "first_name": "Asha",
                "last_name": "Rao",
                "date_of_birth": "1990-05-17",
                "gender": "female",
                "phone": "9876543210",
                "email": "",
                "address": "12 Lake Rd",
                "blood_group": "ab+"
            }"#,
        ))
        .unwrap();

        assert_eq!(p.first_name, "Asha");
        assert_eq!(p.gender, Some(Gender::Female));
        assert_eq!(p.blood_group, Some(BloodGroup::AbPos));
        assert_eq!(p.email, None);
        assert_eq!(p.date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 17));
    }

    #[test]
    fn names_are_required() {
        let err = NewPatient::try_from(payload(r#"{"last_name": "Rao"}"#)).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "first_name" });
    }

    #[test]
    fn rejects_unknown_blood_group() {
        let err = NewPatient::try_from(payload(
            r#"{"first_name": "A", "last_name": "B", "blood_group": "C+"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { field: "blood_group", .. }));
    }

    #[test]
    fn rejects_bad_date() {
        let err = NewPatient::try_from(payload(
            r#"{"first_name": "A", "last_name": "B", "date_of_birth": "17/05/1990"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.field(), "date_of_birth");
    }

    #[test]
    fn blood_group_round_trips_canonical_text() {
        for g in BloodGroup::ALL {
            assert_eq!(BloodGroup::parse(g.as_str()).unwrap(), g);
        }
    }
}
