//! Modal form state shared by the create and edit flows.
//!
//! Validation here duplicates the subset of server rules that can be
//! decided without the database, so obvious mistakes fail before a round
//! trip. The server stays authoritative; its 422 field errors land in
//! the same per-field slots.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use imuna_client::{Employee, EmployeePayload, Vaccine, VaccinePayload};
use tui_input::Input;

/// How a form field is edited and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text edited through the input widget.
    Text,
    /// Boolean toggled with the space bar.
    Flag,
}

/// One editable field in the modal form.
#[derive(Debug)]
pub struct FormField {
    /// Wire name, matching the keys of server-side field errors.
    pub key: &'static str,
    /// Label rendered next to the input.
    pub label: &'static str,
    pub kind: FieldKind,
    pub input: Input,
    pub flag: bool,
}

impl FormField {
    fn text(key: &'static str, label: &'static str, value: String) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Text,
            input: Input::new(value),
            flag: false,
        }
    }

    fn flag(key: &'static str, label: &'static str, value: bool) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Flag,
            input: Input::default(),
            flag: value,
        }
    }

    pub fn toggle(&mut self) {
        self.flag = !self.flag;
    }

    /// Trimmed text value, `None` when empty.
    fn value(&self) -> Option<String> {
        let trimmed = self.input.value().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Which record a submitted form writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    CreateEmployee,
    EditEmployee(i64),
    CreateVaccine,
    EditVaccine(i64),
}

/// State behind the create/edit modal.
#[derive(Debug)]
pub struct FormState {
    pub title: String,
    pub target: FormTarget,
    pub fields: Vec<FormField>,
    pub active: usize,
    /// Field-level messages, client-side or from a 422 response.
    pub errors: BTreeMap<String, Vec<String>>,
    /// Non-field failure shown at the top of the form.
    pub banner: Option<String>,
}

/// Form for creating or editing an employee; `existing` pre-fills fields.
pub fn employee_form(existing: Option<&Employee>) -> FormState {
    let (title, target) = match existing {
        Some(employee) => (
            format!("Edit employee {}", employee.id),
            FormTarget::EditEmployee(employee.id),
        ),
        None => ("New employee".to_string(), FormTarget::CreateEmployee),
    };

    let text = |value: Option<String>| value.unwrap_or_default();
    let date = |value: Option<NaiveDate>| value.map(|d| d.to_string()).unwrap_or_default();

    let fields = vec![
        FormField::text("cpf", "CPF", text(existing.map(|e| e.cpf.clone()))),
        FormField::text(
            "full_name",
            "Full name",
            text(existing.map(|e| e.full_name.clone())),
        ),
        FormField::text(
            "birth_date",
            "Birth date",
            text(existing.map(|e| e.birth_date.to_string())),
        ),
        FormField::text(
            "date_first_dose",
            "First dose",
            date(existing.and_then(|e| e.date_first_dose)),
        ),
        FormField::text(
            "date_second_dose",
            "Second dose",
            date(existing.and_then(|e| e.date_second_dose)),
        ),
        FormField::text(
            "date_third_dose",
            "Third dose",
            date(existing.and_then(|e| e.date_third_dose)),
        ),
        FormField::text(
            "vaccine_id",
            "Vaccine id",
            text(existing.and_then(|e| e.vaccine_id).map(|id| id.to_string())),
        ),
        FormField::flag(
            "comorbidity_carrier",
            "Comorbidity carrier",
            existing.map(|e| e.comorbidity_carrier).unwrap_or(false),
        ),
    ];

    FormState::new(title, target, fields)
}

/// Form for creating or editing a vaccine; `existing` pre-fills fields.
pub fn vaccine_form(existing: Option<&Vaccine>) -> FormState {
    let (title, target) = match existing {
        Some(vaccine) => (
            format!("Edit vaccine {}", vaccine.id),
            FormTarget::EditVaccine(vaccine.id),
        ),
        None => ("New vaccine".to_string(), FormTarget::CreateVaccine),
    };

    let text = |value: Option<String>| value.unwrap_or_default();

    let fields = vec![
        FormField::text("name", "Name", text(existing.map(|v| v.name.clone()))),
        FormField::text("batch", "Batch", text(existing.map(|v| v.batch.clone()))),
        FormField::text(
            "expiration_date",
            "Expiration date",
            text(existing.map(|v| v.expiration_date.to_string())),
        ),
    ];

    FormState::new(title, target, fields)
}

impl FormState {
    fn new(title: String, target: FormTarget, fields: Vec<FormField>) -> Self {
        Self {
            title,
            target,
            fields,
            active: 0,
            errors: BTreeMap::new(),
            banner: None,
        }
    }

    pub fn next_field(&mut self) {
        self.active = (self.active + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.active = if self.active == 0 {
            self.fields.len() - 1
        } else {
            self.active - 1
        };
    }

    pub fn active_field_mut(&mut self) -> &mut FormField {
        &mut self.fields[self.active]
    }

    /// Messages recorded for one field.
    pub fn field_errors(&self, key: &str) -> Option<&[String]> {
        self.errors.get(key).map(Vec::as_slice)
    }

    /// Replace the error map with field errors from a 422 response.
    pub fn set_server_errors(&mut self, errors: BTreeMap<String, Vec<String>>) {
        self.errors = errors;
        self.banner = None;
    }

    /// Run the client-side checks, returning `true` when the form can be
    /// submitted.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        self.banner = None;

        match self.target {
            FormTarget::CreateEmployee | FormTarget::EditEmployee(_) => self.validate_employee(),
            FormTarget::CreateVaccine | FormTarget::EditVaccine(_) => self.validate_vaccine(),
        }

        self.errors.is_empty()
    }

    /// Employee payload from the current field values.
    pub fn employee_payload(&self) -> EmployeePayload {
        EmployeePayload {
            cpf: self.value_of("cpf"),
            full_name: self.value_of("full_name"),
            birth_date: self.value_of("birth_date"),
            date_first_dose: self.value_of("date_first_dose"),
            date_second_dose: self.value_of("date_second_dose"),
            date_third_dose: self.value_of("date_third_dose"),
            vaccine_id: self.value_of("vaccine_id").and_then(|raw| raw.parse().ok()),
            comorbidity_carrier: self.flag_of("comorbidity_carrier"),
        }
    }

    /// Vaccine payload from the current field values.
    pub fn vaccine_payload(&self) -> VaccinePayload {
        VaccinePayload {
            name: self.value_of("name"),
            batch: self.value_of("batch"),
            expiration_date: self.value_of("expiration_date"),
        }
    }

    fn validate_employee(&mut self) {
        match self.value_of("cpf") {
            None => self.add_error("cpf", "The cpf field is required."),
            Some(cpf) if !is_cpf_shaped(&cpf) => {
                self.add_error("cpf", "The cpf must be exactly 11 digits.");
            }
            Some(_) => {}
        }

        if self.value_of("full_name").is_none() {
            self.add_error("full_name", "The full name field is required.");
        }

        match self.value_of("birth_date") {
            None => self.add_error("birth_date", "The birth date field is required."),
            Some(raw) if parse_date(&raw).is_none() => {
                self.add_error("birth_date", "The birth date is not a valid date.");
            }
            Some(_) => {}
        }

        for (key, label) in [
            ("date_first_dose", "date first dose"),
            ("date_second_dose", "date second dose"),
            ("date_third_dose", "date third dose"),
        ] {
            if let Some(raw) = self.value_of(key) {
                if parse_date(&raw).is_none() {
                    self.add_error(key, format!("The {label} is not a valid date."));
                }
            }
        }

        if let Some(raw) = self.value_of("vaccine_id") {
            if raw.parse::<i64>().is_err() {
                self.add_error("vaccine_id", "The vaccine id must be a number.");
            }
        }
    }

    fn validate_vaccine(&mut self) {
        if self.value_of("name").is_none() {
            self.add_error("name", "The name field is required.");
        }
        if self.value_of("batch").is_none() {
            self.add_error("batch", "The batch field is required.");
        }
        match self.value_of("expiration_date") {
            None => self.add_error("expiration_date", "The expiration date field is required."),
            Some(raw) if parse_date(&raw).is_none() => {
                self.add_error("expiration_date", "The expiration date is not a valid date.");
            }
            Some(_) => {}
        }
    }

    fn value_of(&self, key: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .and_then(FormField::value)
    }

    fn flag_of(&self, key: &str) -> bool {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.flag)
            .unwrap_or(false)
    }

    fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[cfg(test)]
    fn set_value(&mut self, key: &str, value: &str) {
        let field = self
            .fields
            .iter_mut()
            .find(|field| field.key == key)
            .unwrap();
        field.input = Input::new(value.to_string());
    }
}

fn is_cpf_shaped(cpf: &str) -> bool {
    cpf.len() == 11 && cpf.chars().all(|c| c.is_ascii_digit())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
