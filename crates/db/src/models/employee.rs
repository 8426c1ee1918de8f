//! Employee row types and list parameters.

use chrono::NaiveDate;
use imuna_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::vaccine::Vaccine;

/// A row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub cpf: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub date_first_dose: Option<NaiveDate>,
    pub date_second_dose: Option<NaiveDate>,
    pub date_third_dose: Option<NaiveDate>,
    pub vaccine_id: Option<DbId>,
    pub comorbidity_carrier: bool,
}

/// An employee together with the vaccine it references, if any.
///
/// Serializes with the employee columns inlined and the vaccine nested
/// under `"vaccine"`, the shape the list and detail endpoints return.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeWithVaccine {
    #[serde(flatten)]
    pub employee: Employee,
    pub vaccine: Option<Vaccine>,
}

/// Query parameters for `GET /employees`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Substring filter on `cpf`.
    pub cpf: Option<String>,
    /// Substring filter on `full_name`. Sent as `fullName` on the wire.
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}
