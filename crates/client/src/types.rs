//! Wire types mirroring the API JSON.
//!
//! These are serde mirrors kept independent of the server crates so the
//! client builds on its own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Vaccine record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Vaccine {
    pub id: i64,
    pub name: String,
    pub batch: String,
    pub expiration_date: NaiveDate,
}

/// Employee record as returned by the API.
///
/// List and lookup responses nest the referenced vaccine under
/// `"vaccine"`; create and update responses omit the key entirely.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub cpf: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub date_first_dose: Option<NaiveDate>,
    pub date_second_dose: Option<NaiveDate>,
    pub date_third_dose: Option<NaiveDate>,
    pub vaccine_id: Option<i64>,
    pub comorbidity_carrier: bool,
    #[serde(default)]
    pub vaccine: Option<Vaccine>,
}

/// One page of results in the list envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: i64,
    pub last_page: i64,
    pub total: i64,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Create/update body for an employee (update replaces every field).
///
/// Values are forwarded as typed by the user; the server validates and
/// reports per-field messages, so nothing is filtered or parsed here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeePayload {
    pub cpf: Option<String>,
    pub full_name: Option<String>,
    pub birth_date: Option<String>,
    pub date_first_dose: Option<String>,
    pub date_second_dose: Option<String>,
    pub date_third_dose: Option<String>,
    pub vaccine_id: Option<i64>,
    pub comorbidity_carrier: bool,
}

/// Create/update body for a vaccine.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VaccinePayload {
    pub name: Option<String>,
    pub batch: Option<String>,
    pub expiration_date: Option<String>,
}

// ---------------------------------------------------------------------------
// List filters
// ---------------------------------------------------------------------------

/// Substring filters for `GET /employees`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    /// Sent as `fullName` on the wire.
    #[serde(rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Substring filters for `GET /vaccines`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VaccineFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
}
