//! Lenient scalar coercion for request payloads
//!
//! The browser client posts raw form values, so numbers, ids and dates
//! may arrive either as JSON scalars or as strings. Everything funnels
//! through [`FormValue`] and the helpers here, which turn it into typed
//! values or a [`ValidationError`]. Blank strings count as absent.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::ValidationError;

/// Maximum length for person names
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length for email addresses
pub const MAX_EMAIL_LEN: usize = 255;

/// Maximum length for phone numbers
pub const MAX_PHONE_LEN: usize = 20;

/// Maximum length for free text (address, reason, notes)
pub const MAX_TEXT_LEN: usize = 2000;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ().-]*$").expect("invalid phone regex"));

/// A scalar as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// Trimmed text, `None` for absent or blank values.
pub fn text(value: Option<FormValue>, field: &'static str) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(FormValue::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.contains('\0') {
                Err(ValidationError::InvalidFormat {
                    field,
                    reason: "must not contain NUL characters",
                })
            } else if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_owned()))
            }
        }
        Some(FormValue::Int(n)) => Ok(Some(n.to_string())),
        Some(FormValue::Float(n)) => Ok(Some(n.to_string())),
        Some(FormValue::List(_)) => Err(ValidationError::InvalidFormat {
            field,
            reason: "expected a single value, not a list",
        }),
    }
}

/// Optional text bounded by `max` characters.
pub fn optional_text(
    value: Option<FormValue>,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let Some(s) = text(value, field)? else {
        return Ok(None);
    };
    if s.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(Some(s))
}

/// Required text bounded by `max` characters.
pub fn required_text(
    value: Option<FormValue>,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let present = value.is_some();
    match optional_text(value, field, max)? {
        Some(s) => Ok(s),
        None if present => Err(ValidationError::Empty { field }),
        None => Err(ValidationError::Missing { field }),
    }
}

/// Optional email address.
pub fn email(value: Option<FormValue>, field: &'static str) -> Result<Option<String>, ValidationError> {
    let Some(s) = optional_text(value, field, MAX_EMAIL_LEN)? else {
        return Ok(None);
    };
    if !EMAIL_RE.is_match(&s) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must be an email address",
        });
    }
    Ok(Some(s))
}

/// Optional phone number (digits, spaces, `+ ( ) - .`).
pub fn phone(value: Option<FormValue>, field: &'static str) -> Result<Option<String>, ValidationError> {
    let Some(s) = optional_text(value, field, MAX_PHONE_LEN)? else {
        return Ok(None);
    };
    if !PHONE_RE.is_match(&s) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must contain only digits and + ( ) - . separators",
        });
    }
    Ok(Some(s))
}

/// Optional integer, accepting numeric strings.
pub fn integer(value: Option<FormValue>, field: &'static str) -> Result<Option<i64>, ValidationError> {
    let invalid = ValidationError::InvalidFormat {
        field,
        reason: "must be an integer",
    };
    match value {
        None => Ok(None),
        Some(FormValue::Int(n)) => Ok(Some(n)),
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        Some(FormValue::Float(n))
            if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 =>
        {
            Ok(Some(n as i64))
        }
        Some(FormValue::Float(_)) | Some(FormValue::List(_)) => Err(invalid),
        Some(FormValue::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<i64>().map(Some).map_err(|_| invalid)
        }
    }
}

/// Required positive integer identifier.
pub fn required_id(value: Option<FormValue>, field: &'static str) -> Result<i64, ValidationError> {
    let id = integer(value, field)?.ok_or(ValidationError::Missing { field })?;
    if id <= 0 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: "must be a positive id",
        });
    }
    Ok(id)
}

/// Optional finite decimal, accepting numeric strings.
pub fn decimal(value: Option<FormValue>, field: &'static str) -> Result<Option<f64>, ValidationError> {
    let invalid = ValidationError::InvalidFormat {
        field,
        reason: "must be a number",
    };
    let n = match value {
        None => return Ok(None),
        Some(FormValue::Int(n)) => n as f64,
        Some(FormValue::Float(n)) => n,
        Some(FormValue::List(_)) => return Err(invalid),
        Some(FormValue::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<f64>().map_err(|_| invalid.clone())?
        }
    };
    if !n.is_finite() {
        return Err(invalid);
    }
    Ok(Some(n))
}

/// Optional calendar date in `YYYY-MM-DD` form.
pub fn date(value: Option<FormValue>, field: &'static str) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(s) = text(value, field)? else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidFormat {
            field,
            reason: "must be a date in YYYY-MM-DD format",
        })
}

/// Optional time of day in `HH:MM` or `HH:MM:SS` form.
pub fn time(value: Option<FormValue>, field: &'static str) -> Result<Option<NaiveTime>, ValidationError> {
    let Some(s) = text(value, field)? else {
        return Ok(None);
    };
    NaiveTime::parse_from_str(&s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M"))
        .map(Some)
        .map_err(|_| ValidationError::InvalidFormat {
            field,
            reason: "must be a time in HH:MM or HH:MM:SS format",
        })
}

/// Split a list-ish value into trimmed, non-empty tokens.
///
/// Accepts a JSON array of strings or a comma-separated string.
pub fn tokens(value: Option<FormValue>, field: &'static str) -> Result<Vec<String>, ValidationError> {
    let raw: Vec<String> = match value {
        None => return Ok(Vec::new()),
        Some(FormValue::List(items)) => items,
        Some(FormValue::Text(s)) => s.split(',').map(str::to_owned).collect(),
        Some(FormValue::Int(_)) | Some(FormValue::Float(_)) => {
            return Err(ValidationError::InvalidFormat {
                field,
                reason: "expected a list or comma-separated text",
            })
        }
    };
    Ok(raw
        .into_iter()
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Option<FormValue> {
        Some(FormValue::from(s))
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(text(t("   "), "x").unwrap(), None);
        assert_eq!(text(t(" Ann "), "x").unwrap(), Some("Ann".into()));
    }

    #[test]
    fn required_text_distinguishes_missing_from_blank() {
        assert_eq!(
            required_text(None, "first_name", 10).unwrap_err(),
            ValidationError::Missing { field: "first_name" }
        );
        assert_eq!(
            required_text(t(""), "first_name", 10).unwrap_err(),
            ValidationError::Empty { field: "first_name" }
        );
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert!(optional_text(t("ééé"), "x", 3).is_ok());
        assert!(matches!(
            optional_text(t("éééé"), "x", 3).unwrap_err(),
            ValidationError::TooLong { max: 3, .. }
        ));
    }

    #[test]
    fn integers_accept_numeric_strings() {
        assert_eq!(integer(t("42"), "n").unwrap(), Some(42));
        assert_eq!(integer(Some(FormValue::Int(7)), "n").unwrap(), Some(7));
        assert_eq!(integer(Some(FormValue::Float(3.0)), "n").unwrap(), Some(3));
        assert!(integer(Some(FormValue::Float(3.5)), "n").is_err());
        assert!(integer(t("4x"), "n").is_err());
        assert_eq!(integer(t(""), "n").unwrap(), None);
    }

    #[test]
    fn integers_reject_floats_outside_i64() {
        assert!(integer(Some(FormValue::Float(1e19)), "n").is_err());
        assert!(integer(Some(FormValue::Float(-1e19)), "n").is_err());
        assert!(integer(Some(FormValue::Float(f64::INFINITY)), "n").is_err());
        assert_eq!(integer(Some(FormValue::Float(1e15)), "n").unwrap(), Some(1_000_000_000_000_000));
    }

    #[test]
    fn nul_characters_are_rejected() {
        assert!(matches!(
            text(t("A\u{0}b"), "first_name").unwrap_err(),
            ValidationError::InvalidFormat { field: "first_name", .. }
        ));
        assert!(required_text(t("\u{0}"), "first_name", 10).is_err());
    }

    #[test]
    fn required_id_rejects_missing_and_non_positive() {
        assert_eq!(
            required_id(None, "patient_id").unwrap_err(),
            ValidationError::Missing { field: "patient_id" }
        );
        assert_eq!(
            required_id(t(""), "patient_id").unwrap_err(),
            ValidationError::Missing { field: "patient_id" }
        );
        assert!(matches!(
            required_id(t("0"), "patient_id").unwrap_err(),
            ValidationError::OutOfRange { .. }
        ));
        assert_eq!(required_id(t("12"), "patient_id").unwrap(), 12);
    }

    #[test]
    fn decimals() {
        assert_eq!(decimal(t("500.50"), "fee").unwrap(), Some(500.5));
        assert_eq!(decimal(Some(FormValue::Int(5)), "fee").unwrap(), Some(5.0));
        assert!(decimal(t("NaN"), "fee").is_err());
        assert!(decimal(t("abc"), "fee").is_err());
    }

    #[test]
    fn dates_and_times() {
        assert_eq!(
            date(t("2024-03-01"), "d").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert!(date(t("01/03/2024"), "d").is_err());
        assert_eq!(time(t("09:30"), "t").unwrap(), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(
            time(t("09:30:15"), "t").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 15)
        );
        assert!(time(t("25:00"), "t").is_err());
    }

    #[test]
    fn email_and_phone_shapes() {
        assert!(email(t("a@b.org"), "email").unwrap().is_some());
        assert!(email(t("not-an-email"), "email").is_err());
        assert!(phone(t("+1 (555) 010-2000"), "phone").unwrap().is_some());
        assert!(phone(t("call me"), "phone").is_err());
    }

    #[test]
    fn tokens_from_text_or_list() {
        assert_eq!(tokens(t("Mon, Wed,,Fri "), "d").unwrap(), vec!["Mon", "Wed", "Fri"]);
        let list = Some(FormValue::List(vec!["Tue".into(), " ".into()]));
        assert_eq!(tokens(list, "d").unwrap(), vec!["Tue"]);
    }

    #[test]
    fn form_value_deserializes_mixed_scalars() {
        let v: Vec<FormValue> = serde_json::from_str(r#"[1, 2.5, "x", ["a"]]"#).unwrap();
        assert_eq!(
            v,
            vec![
                FormValue::Int(1),
                FormValue::Float(2.5),
                FormValue::Text("x".into()),
                FormValue::List(vec!["a".into()]),
            ]
        );
    }
}
