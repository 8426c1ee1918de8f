//! Employee input validation and identifier handling.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::DomainError;
use crate::types::DbId;
use crate::validation::{optional_date, required_date, required_text, ValidationErrors};

/// Number of digits in a CPF.
pub const CPF_LENGTH: usize = 11;

/// True when `cpf` is exactly [`CPF_LENGTH`] ASCII digits.
pub fn is_valid_cpf(cpf: &str) -> bool {
    cpf.len() == CPF_LENGTH && cpf.bytes().all(|b| b.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Lookup key
// ---------------------------------------------------------------------------

/// An employee lookup key parsed from a URL path segment.
///
/// Resolution is by shape: exactly 11 ASCII digits is always a CPF, any
/// other all-digit string is a numeric id. An 11-digit segment therefore
/// never falls back to an id lookup, even when no employee has that CPF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeKey {
    Id(DbId),
    Cpf(String),
}

impl FromStr for EmployeeKey {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::BadIdentifier(format!(
                "Identifier '{raw}' must be a numeric id or an 11-digit CPF"
            )));
        }
        if raw.len() == CPF_LENGTH {
            return Ok(EmployeeKey::Cpf(raw.to_string()));
        }
        raw.parse::<DbId>()
            .map(EmployeeKey::Id)
            .map_err(|_| DomainError::BadIdentifier(format!("Identifier '{raw}' is out of range")))
    }
}

impl fmt::Display for EmployeeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeKey::Id(id) => write!(f, "{id}"),
            EmployeeKey::Cpf(cpf) => f.write_str(cpf),
        }
    }
}

// ---------------------------------------------------------------------------
// Request input
// ---------------------------------------------------------------------------

/// Request body for employee create and update (update is a full replace).
///
/// Every field is optional at the deserialization layer so missing values
/// surface as field-level validation errors rather than a rejected body.
/// Dates arrive as `YYYY-MM-DD` strings and are parsed during validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeInput {
    pub cpf: Option<String>,
    pub full_name: Option<String>,
    pub birth_date: Option<String>,
    pub date_first_dose: Option<String>,
    pub date_second_dose: Option<String>,
    pub date_third_dose: Option<String>,
    pub vaccine_id: Option<DbId>,
    pub comorbidity_carrier: Option<bool>,
}

/// A fully validated employee record ready for persistence.
///
/// CPF uniqueness and `vaccine_id` existence are relational rules the
/// caller checks against the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub cpf: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub date_first_dose: Option<NaiveDate>,
    pub date_second_dose: Option<NaiveDate>,
    pub date_third_dose: Option<NaiveDate>,
    pub vaccine_id: Option<DbId>,
    pub comorbidity_carrier: bool,
}

impl EmployeeInput {
    /// Validate every field, collecting all failures before returning.
    pub fn validate(&self) -> Result<NewEmployee, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let cpf = match self.cpf.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add("cpf", "The cpf field is required.");
                None
            }
            Some(cpf) if !is_valid_cpf(cpf) => {
                errors.add("cpf", "The cpf must be exactly 11 digits.");
                None
            }
            Some(cpf) => Some(cpf.to_string()),
        };

        let full_name = required_text(&mut errors, "full_name", "full name", self.full_name.as_deref());

        let birth_date = required_date(
            &mut errors,
            "birth_date",
            "birth date",
            self.birth_date.as_deref(),
        );
        let date_first_dose = optional_date(
            &mut errors,
            "date_first_dose",
            "date first dose",
            self.date_first_dose.as_deref(),
        );
        let date_second_dose = optional_date(
            &mut errors,
            "date_second_dose",
            "date second dose",
            self.date_second_dose.as_deref(),
        );
        let date_third_dose = optional_date(
            &mut errors,
            "date_third_dose",
            "date third dose",
            self.date_third_dose.as_deref(),
        );

        let comorbidity_carrier = match self.comorbidity_carrier {
            None => {
                errors.add("comorbidity_carrier", "The comorbidity carrier field is required.");
                None
            }
            Some(flag) => Some(flag),
        };

        // Required values are all Some exactly when no rule above failed.
        match (cpf, full_name, birth_date, comorbidity_carrier) {
            (Some(cpf), Some(full_name), Some(birth_date), Some(comorbidity_carrier))
                if errors.is_empty() =>
            {
                Ok(NewEmployee {
                    cpf,
                    full_name,
                    birth_date,
                    date_first_dose,
                    date_second_dose,
                    date_third_dose,
                    vaccine_id: self.vaccine_id,
                    comorbidity_carrier,
                })
            }
            _ => Err(errors),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn valid_input() -> EmployeeInput {
        EmployeeInput {
            cpf: Some("12345678901".to_string()),
            full_name: Some("Maria Souza".to_string()),
            birth_date: Some("1988-03-02".to_string()),
            date_first_dose: Some("2021-04-10".to_string()),
            date_second_dose: None,
            date_third_dose: None,
            vaccine_id: Some(7),
            comorbidity_carrier: Some(false),
        }
    }

    // -- is_valid_cpf --------------------------------------------------------

    #[test]
    fn cpf_accepts_exactly_eleven_digits() {
        assert!(is_valid_cpf("12345678901"));
        assert!(is_valid_cpf("00000000000"));
    }

    #[test]
    fn cpf_rejects_wrong_length() {
        assert!(!is_valid_cpf(""));
        assert!(!is_valid_cpf("1234567890"));
        assert!(!is_valid_cpf("123456789012"));
    }

    #[test]
    fn cpf_rejects_non_digits() {
        assert!(!is_valid_cpf("123.456.789"));
        assert!(!is_valid_cpf("1234567890a"));
        assert!(!is_valid_cpf("١٢٣٤٥٦٧٨٩٠١")); // non-ASCII digits
    }

    // -- EmployeeKey ---------------------------------------------------------

    #[test]
    fn eleven_digit_segment_is_always_a_cpf() {
        assert_eq!(
            "12345678901".parse::<EmployeeKey>().unwrap(),
            EmployeeKey::Cpf("12345678901".to_string())
        );
    }

    #[test]
    fn other_digit_lengths_are_ids() {
        assert_eq!("7".parse::<EmployeeKey>().unwrap(), EmployeeKey::Id(7));
        assert_eq!(
            "123456789012".parse::<EmployeeKey>().unwrap(),
            EmployeeKey::Id(123_456_789_012)
        );
    }

    #[test]
    fn non_numeric_segment_is_rejected() {
        assert_matches!(
            "abc".parse::<EmployeeKey>(),
            Err(DomainError::BadIdentifier(_))
        );
        assert_matches!(
            "123-456".parse::<EmployeeKey>(),
            Err(DomainError::BadIdentifier(_))
        );
        assert_matches!("".parse::<EmployeeKey>(), Err(DomainError::BadIdentifier(_)));
    }

    #[test]
    fn oversized_numeric_segment_is_rejected() {
        // 30 digits overflows i64 and is not CPF-shaped.
        assert_matches!(
            "999999999999999999999999999999".parse::<EmployeeKey>(),
            Err(DomainError::BadIdentifier(_))
        );
    }

    #[test]
    fn key_displays_as_path_segment() {
        assert_eq!(EmployeeKey::Id(42).to_string(), "42");
        assert_eq!(
            EmployeeKey::Cpf("12345678901".to_string()).to_string(),
            "12345678901"
        );
    }

    // -- EmployeeInput::validate ---------------------------------------------

    #[test]
    fn valid_input_passes() {
        let new = valid_input().validate().unwrap();
        assert_eq!(new.cpf, "12345678901");
        assert_eq!(new.full_name, "Maria Souza");
        assert_eq!(new.birth_date, NaiveDate::from_ymd_opt(1988, 3, 2).unwrap());
        assert_eq!(
            new.date_first_dose,
            NaiveDate::from_ymd_opt(2021, 4, 10)
        );
        assert_eq!(new.date_second_dose, None);
        assert_eq!(new.vaccine_id, Some(7));
        assert!(!new.comorbidity_carrier);
    }

    #[test]
    fn empty_input_reports_every_required_field() {
        let errors = EmployeeInput::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.field("cpf").is_some());
        assert!(errors.field("full_name").is_some());
        assert!(errors.field("birth_date").is_some());
        assert!(errors.field("comorbidity_carrier").is_some());
    }

    #[test]
    fn short_cpf_is_rejected() {
        let input = EmployeeInput {
            cpf: Some("123".to_string()),
            ..valid_input()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.field("cpf"),
            Some(&["The cpf must be exactly 11 digits.".to_string()][..])
        );
    }

    #[test]
    fn formatted_cpf_is_rejected() {
        let input = EmployeeInput {
            cpf: Some("123.456.789-01".to_string()),
            ..valid_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn malformed_birth_date_is_rejected() {
        let input = EmployeeInput {
            birth_date: Some("02/03/1988".to_string()),
            ..valid_input()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.field("birth_date"),
            Some(&["The birth date is not a valid date.".to_string()][..])
        );
    }

    #[test]
    fn malformed_dose_date_is_rejected() {
        let input = EmployeeInput {
            date_second_dose: Some("yesterday".to_string()),
            ..valid_input()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field("date_second_dose").is_some());
    }

    #[test]
    fn multiple_failures_are_collected_together() {
        let input = EmployeeInput {
            cpf: Some("12".to_string()),
            full_name: Some("".to_string()),
            birth_date: Some("bad".to_string()),
            ..valid_input()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn names_are_trimmed() {
        let input = EmployeeInput {
            full_name: Some("  João Lima  ".to_string()),
            ..valid_input()
        };
        assert_eq!(input.validate().unwrap().full_name, "João Lima");
    }
}
