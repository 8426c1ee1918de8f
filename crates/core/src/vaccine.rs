//! Vaccine input validation.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::validation::{required_date, required_text, ValidationErrors};

/// Request body for vaccine create and update (update is a full replace).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VaccineInput {
    pub name: Option<String>,
    pub batch: Option<String>,
    pub expiration_date: Option<String>,
}

/// A fully validated vaccine record ready for persistence.
///
/// `batch` is an opaque identifier kept as text so values with leading
/// zeros survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVaccine {
    pub name: String,
    pub batch: String,
    pub expiration_date: NaiveDate,
}

impl VaccineInput {
    /// Validate every field, collecting all failures before returning.
    pub fn validate(&self) -> Result<NewVaccine, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required_text(&mut errors, "name", "name", self.name.as_deref());
        let batch = required_text(&mut errors, "batch", "batch", self.batch.as_deref());
        let expiration_date = required_date(
            &mut errors,
            "expiration_date",
            "expiration date",
            self.expiration_date.as_deref(),
        );

        match (name, batch, expiration_date) {
            (Some(name), Some(batch), Some(expiration_date)) if errors.is_empty() => {
                Ok(NewVaccine {
                    name,
                    batch,
                    expiration_date,
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
    use super::*;

    fn valid_input() -> VaccineInput {
        VaccineInput {
            name: Some("CoronaVac".to_string()),
            batch: Some("0012345".to_string()),
            expiration_date: Some("2027-11-30".to_string()),
        }
    }

    #[test]
    fn valid_input_passes() {
        let new = valid_input().validate().unwrap();
        assert_eq!(new.name, "CoronaVac");
        assert_eq!(new.batch, "0012345");
        assert_eq!(
            new.expiration_date,
            NaiveDate::from_ymd_opt(2027, 11, 30).unwrap()
        );
    }

    #[test]
    fn empty_input_reports_every_field() {
        let errors = VaccineInput::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.field("name").is_some());
        assert!(errors.field("batch").is_some());
        assert!(errors.field("expiration_date").is_some());
    }

    #[test]
    fn batch_keeps_leading_zeros() {
        let input = VaccineInput {
            batch: Some("0000001".to_string()),
            ..valid_input()
        };
        assert_eq!(input.validate().unwrap().batch, "0000001");
    }

    #[test]
    fn non_numeric_batch_is_accepted() {
        let input = VaccineInput {
            batch: Some("LOT-2024-A".to_string()),
            ..valid_input()
        };
        assert_eq!(input.validate().unwrap().batch, "LOT-2024-A");
    }

    #[test]
    fn blank_name_is_rejected() {
        let input = VaccineInput {
            name: Some("   ".to_string()),
            ..valid_input()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.field("name"),
            Some(&["The name field is required.".to_string()][..])
        );
    }

    #[test]
    fn malformed_expiration_date_is_rejected() {
        let input = VaccineInput {
            expiration_date: Some("30-11-2027".to_string()),
            ..valid_input()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.field("expiration_date"),
            Some(&["The expiration date is not a valid date.".to_string()][..])
        );
    }
}
