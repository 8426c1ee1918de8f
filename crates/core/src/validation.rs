//! Field-level validation error collection and shared field rules.
//!
//! Validation collects every failure before reporting, so a response can
//! list all broken fields at once rather than one per round trip.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Maximum length accepted for free-text fields.
pub const MAX_TEXT_LENGTH: usize = 255;

// ---------------------------------------------------------------------------
// Error collection
// ---------------------------------------------------------------------------

/// Accumulated validation failures keyed by request field name.
///
/// Fields keep insertion order so serialized payloads list errors in the
/// order the rules ran. Serializes as `{"<field>": ["<message>", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.fields.push((field.to_string(), vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with at least one recorded failure.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Messages recorded for one field, in the order they were added.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Iterate `(field, messages)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, messages) in &self.fields {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Shared field rules
// ---------------------------------------------------------------------------

/// Validate a required free-text field: present, non-empty after trimming,
/// at most [`MAX_TEXT_LENGTH`] characters.
///
/// `label` is the human-readable field name used in messages.
pub fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: Option<&str>,
) -> Option<String> {
    match value.map(str::trim) {
        None | Some("") => {
            errors.add(field, format!("The {label} field is required."));
            None
        }
        Some(text) if text.chars().count() > MAX_TEXT_LENGTH => {
            errors.add(
                field,
                format!("The {label} may not be greater than {MAX_TEXT_LENGTH} characters."),
            );
            None
        }
        Some(text) => Some(text.to_string()),
    }
}

/// Parse a required `YYYY-MM-DD` date field.
pub fn required_date(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: Option<&str>,
) -> Option<NaiveDate> {
    match value.map(str::trim) {
        None | Some("") => {
            errors.add(field, format!("The {label} field is required."));
            None
        }
        Some(raw) => parse_date(errors, field, label, raw),
    }
}

/// Parse an optional `YYYY-MM-DD` date field. Absent or empty input is
/// `None` without an error.
pub fn optional_date(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: Option<&str>,
) -> Option<NaiveDate> {
    match value.map(str::trim) {
        None | Some("") => None,
        Some(raw) => parse_date(errors, field, label, raw),
    }
}

fn parse_date(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    raw: &str,
) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, format!("The {label} is not a valid date."));
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
