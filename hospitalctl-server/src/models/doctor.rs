//! Doctor payload validation

use chrono::Weekday;
use serde::Deserialize;

use super::fields::{self, FormValue, MAX_NAME_LEN};
use super::ValidationError;

/// Upper bound for a plausible career length
const MAX_EXPERIENCE_YEARS: i64 = 80;

/// Largest fee that fits NUMERIC(10, 2)
const MAX_CONSULTATION_FEE: f64 = 99_999_999.99;

/// Separator used when storing available days as text
const DAY_SEPARATOR: &str = ", ";

/// Set of weekdays a doctor consults on, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableDays(Vec<Weekday>);

impl AvailableDays {
    /// Build from free-form tokens ("mon", "Monday", "MON"...).
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut days = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            let day: Weekday = token.parse().map_err(|_| ValidationError::InvalidVariant {
                field: "available_days",
                value: token.to_owned(),
            })?;
            if !days.contains(&day) {
                days.push(day);
            }
        }
        Ok(Self(days))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn days(&self) -> &[Weekday] {
        &self.0
    }

    /// Delimited text form stored in the database, e.g. `"Mon, Wed, Fri"`.
    pub fn to_text(&self) -> String {
        self.0
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(DAY_SEPARATOR)
    }
}

/// Raw POST /api/doctors body
#[derive(Debug, Default, Deserialize)]
pub struct DoctorPayload {
    pub first_name: Option<FormValue>,
    pub last_name: Option<FormValue>,
    pub specialization: Option<FormValue>,
    pub phone: Option<FormValue>,
    pub email: Option<FormValue>,
    pub experience_years: Option<FormValue>,
    pub consultation_fee: Option<FormValue>,
    pub available_days: Option<FormValue>,
}

/// Validated doctor ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewDoctor {
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub experience_years: Option<i32>,
    /// Rounded to two decimal places
    pub consultation_fee: Option<f64>,
    pub available_days: AvailableDays,
}

impl TryFrom<DoctorPayload> for NewDoctor {
    type Error = ValidationError;

    fn try_from(p: DoctorPayload) -> Result<Self, Self::Error> {
        let first_name = fields::required_text(p.first_name, "first_name", MAX_NAME_LEN)?;
        let last_name = fields::required_text(p.last_name, "last_name", MAX_NAME_LEN)?;
        let specialization =
            fields::required_text(p.specialization, "specialization", MAX_NAME_LEN)?;
        let phone = fields::phone(p.phone, "phone")?;
        let email = fields::email(p.email, "email")?;

        let experience_years = match fields::integer(p.experience_years, "experience_years")? {
            Some(n) if !(0..=MAX_EXPERIENCE_YEARS).contains(&n) => {
                return Err(ValidationError::OutOfRange {
                    field: "experience_years",
                    reason: "must be between 0 and 80",
                })
            }
            Some(n) => Some(n as i32),
            None => None,
        };

        let consultation_fee = match fields::decimal(p.consultation_fee, "consultation_fee")? {
            Some(fee) if fee < 0.0 => {
                return Err(ValidationError::OutOfRange {
                    field: "consultation_fee",
                    reason: "must not be negative",
                })
            }
            Some(fee) => {
                let cents = (fee * 100.0).round() / 100.0;
                if cents > MAX_CONSULTATION_FEE {
                    return Err(ValidationError::OutOfRange {
                        field: "consultation_fee",
                        reason: "must not exceed 99999999.99",
                    });
                }
                Some(cents)
            }
            None => None,
        };

        let available_days =
            AvailableDays::from_tokens(fields::tokens(p.available_days, "available_days")?)?;

        Ok(Self {
            first_name,
            last_name,
            specialization,
            phone,
            email,
            experience_years,
            consultation_fee,
            available_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> DoctorPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn coerces_form_strings() {
        let d = NewDoctor::try_from(payload(
            r#"{
                "first_name": "Vikram",
                "last_name": "Shah",
                "specialization": "Cardiology",
                "experience_years": "12",
                "consultation_fee": "750.456",
                "available_days": "monday, WED, fri, Mon"
            }"#,
        ))
        .unwrap();

        assert_eq!(d.experience_years, Some(12));
        assert_eq!(d.consultation_fee, Some(750.46));
        assert_eq!(d.available_days.to_text(), "Mon, Wed, Fri");
    }

    #[test]
    fn accepts_day_list() {
        let d = NewDoctor::try_from(payload(
            r#"{"first_name": "A", "last_name": "B", "specialization": "ENT",
                "available_days": ["Tue", "Thu"]}"#,
        ))
        .unwrap();
        assert_eq!(d.available_days.days(), &[Weekday::Tue, Weekday::Thu]);
    }

    #[test]
    fn specialization_is_required() {
        let err = NewDoctor::try_from(payload(r#"{"first_name": "A", "last_name": "B"}"#))
            .unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "specialization" });
    }

    #[test]
    fn rejects_negative_numbers() {
        let err = NewDoctor::try_from(payload(
            r#"{"first_name": "A", "last_name": "B", "specialization": "ENT",
                "experience_years": -1}"#,
        ))
        .unwrap_err();
        assert_eq!(err.field(), "experience_years");

        let err = NewDoctor::try_from(payload(
            r#"{"first_name": "A", "last_name": "B", "specialization": "ENT",
                "consultation_fee": "-5"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.field(), "consultation_fee");
    }

    #[test]
    fn rejects_fee_beyond_column_precision() {
        let err = NewDoctor::try_from(payload(
            r#"{"first_name": "Big", "last_name": "Fee", "specialization": "X",
                "consultation_fee": 1000000000}"#,
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange { field: "consultation_fee", .. }
        ));

        // rounds up past the limit
        let err = NewDoctor::try_from(payload(
            r#"{"first_name": "A", "last_name": "B", "specialization": "X",
                "consultation_fee": "99999999.999"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.field(), "consultation_fee");

        let d = NewDoctor::try_from(payload(
            r#"{"first_name": "A", "last_name": "B", "specialization": "X",
                "consultation_fee": "99999999.99"}"#,
        ))
        .unwrap();
        assert_eq!(d.consultation_fee, Some(99_999_999.99));
    }

    #[test]
    fn rejects_unknown_day() {
        let err = AvailableDays::from_tokens(["Mon", "Funday"]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { field: "available_days", .. }));
    }

    #[test]
    fn empty_days_render_empty_text() {
        assert!(AvailableDays::default().is_empty());
        assert_eq!(AvailableDays::default().to_text(), "");
    }
}
