//! Vaccine row type and list parameters.

use chrono::NaiveDate;
use imuna_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `vaccines` table.
///
/// `batch` is stored as text: lot codes can carry leading zeros and
/// letters, and nothing does arithmetic on them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vaccine {
    pub id: DbId,
    pub name: String,
    pub batch: String,
    pub expiration_date: NaiveDate,
}

/// Query parameters for `GET /vaccines`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VaccineListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Substring filter on `name`.
    pub name: Option<String>,
    /// Substring filter on `batch`.
    pub batch: Option<String>,
}
