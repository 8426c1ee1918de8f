//! Repository for the `employees` table.
//!
//! Read queries left-join the referenced vaccine so callers get the
//! employee and its vaccine in one round trip.

use sqlx::PgPool;

use imuna_core::employee::{EmployeeKey, NewEmployee};
use imuna_core::search::{clamp_page, clamp_per_page, contains_pattern};
use imuna_core::types::DbId;

use crate::models::employee::{Employee, EmployeeListParams, EmployeeWithVaccine};
use crate::models::page::Page;
use crate::models::vaccine::Vaccine;

/// Column list for `employees` queries.
const EMPLOYEE_COLUMNS: &str = "\
    id, cpf, full_name, birth_date, date_first_dose, date_second_dose, \
    date_third_dose, vaccine_id, comorbidity_carrier";

/// Column list for employee queries joined with the `vaccines` table.
/// The vaccine columns are aliased so they land in [`EmployeeJoinRow`].
const JOINED_COLUMNS: &str = "\
    e.id, e.cpf, e.full_name, e.birth_date, e.date_first_dose, \
    e.date_second_dose, e.date_third_dose, e.vaccine_id, e.comorbidity_carrier, \
    v.name AS vaccine_name, v.batch AS vaccine_batch, \
    v.expiration_date AS vaccine_expiration_date";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// List employees joined with their vaccine, ordered by id, with
    /// optional substring filters on `cpf` and `full_name`.
    ///
    /// Both filtered columns are `NOT NULL`, so an absent filter binds
    /// as `%%` and matches every row.
    pub async fn paginate(
        pool: &PgPool,
        params: &EmployeeListParams,
    ) -> Result<Page<EmployeeWithVaccine>, sqlx::Error> {
        let page = clamp_page(params.page);
        let per_page = clamp_per_page(params.per_page);
        let offset = (page - 1) * per_page;

        let cpf_pattern = contains_pattern(params.cpf.as_deref().unwrap_or(""));
        let name_pattern = contains_pattern(params.full_name.as_deref().unwrap_or(""));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM employees WHERE cpf LIKE $1 AND full_name LIKE $2",
        )
        .bind(&cpf_pattern)
        .bind(&name_pattern)
        .fetch_one(pool)
        .await?;

        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM employees e \
             LEFT JOIN vaccines v ON v.id = e.vaccine_id \
             WHERE e.cpf LIKE $1 AND e.full_name LIKE $2 \
             ORDER BY e.id \
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, EmployeeJoinRow>(&query)
            .bind(&cpf_pattern)
            .bind(&name_pattern)
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let data = rows.into_iter().map(EmployeeWithVaccine::from).collect();
        Ok(Page::new(data, page, per_page, total))
    }

    /// Find an employee by a resolved identifier, id or CPF.
    pub async fn find_by_key(
        pool: &PgPool,
        key: &EmployeeKey,
    ) -> Result<Option<EmployeeWithVaccine>, sqlx::Error> {
        match key {
            EmployeeKey::Id(id) => Self::find_by_id(pool, *id).await,
            EmployeeKey::Cpf(cpf) => Self::find_by_cpf(pool, cpf).await,
        }
    }

    /// Find an employee (with vaccine) by its numeric ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EmployeeWithVaccine>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM employees e \
             LEFT JOIN vaccines v ON v.id = e.vaccine_id \
             WHERE e.id = $1"
        );
        let row = sqlx::query_as::<_, EmployeeJoinRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(EmployeeWithVaccine::from))
    }

    /// Find an employee (with vaccine) by exact CPF.
    pub async fn find_by_cpf(
        pool: &PgPool,
        cpf: &str,
    ) -> Result<Option<EmployeeWithVaccine>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM employees e \
             LEFT JOIN vaccines v ON v.id = e.vaccine_id \
             WHERE e.cpf = $1"
        );
        let row = sqlx::query_as::<_, EmployeeJoinRow>(&query)
            .bind(cpf)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(EmployeeWithVaccine::from))
    }

    /// Check whether a CPF is already taken, optionally ignoring one record.
    ///
    /// The exclusion is used on update so a record may keep its own CPF.
    pub async fn cpf_exists(
        pool: &PgPool,
        cpf: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (\
                 SELECT 1 FROM employees \
                 WHERE cpf = $1 AND ($2::BIGINT IS NULL OR id <> $2)\
             )",
        )
        .bind(cpf)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Insert a new employee and return the stored row.
    pub async fn create(pool: &PgPool, input: &NewEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees \
                 (cpf, full_name, birth_date, date_first_dose, date_second_dose, \
                  date_third_dose, vaccine_id, comorbidity_carrier) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.cpf)
            .bind(&input.full_name)
            .bind(input.birth_date)
            .bind(input.date_first_dose)
            .bind(input.date_second_dose)
            .bind(input.date_third_dose)
            .bind(input.vaccine_id)
            .bind(input.comorbidity_carrier)
            .fetch_one(pool)
            .await
    }

    /// Replace all fields of an employee.
    ///
    /// Returns `None` if no employee with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET \
                 cpf = $2, full_name = $3, birth_date = $4, date_first_dose = $5, \
                 date_second_dose = $6, date_third_dose = $7, vaccine_id = $8, \
                 comorbidity_carrier = $9 \
             WHERE id = $1 \
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(&input.cpf)
            .bind(&input.full_name)
            .bind(input.birth_date)
            .bind(input.date_first_dose)
            .bind(input.date_second_dose)
            .bind(input.date_third_dose)
            .bind(input.vaccine_id)
            .bind(input.comorbidity_carrier)
            .fetch_optional(pool)
            .await
    }

    /// Delete an employee by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Join mapping
// ---------------------------------------------------------------------------

/// Flat row produced by the employee-vaccine left join.
///
/// sqlx cannot hydrate a nested optional struct from one row, so the
/// vaccine columns arrive aliased and are regrouped in Rust.
#[derive(sqlx::FromRow)]
struct EmployeeJoinRow {
    id: DbId,
    cpf: String,
    full_name: String,
    birth_date: chrono::NaiveDate,
    date_first_dose: Option<chrono::NaiveDate>,
    date_second_dose: Option<chrono::NaiveDate>,
    date_third_dose: Option<chrono::NaiveDate>,
    vaccine_id: Option<DbId>,
    comorbidity_carrier: bool,
    vaccine_name: Option<String>,
    vaccine_batch: Option<String>,
    vaccine_expiration_date: Option<chrono::NaiveDate>,
}

impl From<EmployeeJoinRow> for EmployeeWithVaccine {
    fn from(row: EmployeeJoinRow) -> Self {
        let vaccine = match (
            row.vaccine_id,
            row.vaccine_name,
            row.vaccine_batch,
            row.vaccine_expiration_date,
        ) {
            (Some(id), Some(name), Some(batch), Some(expiration_date)) => Some(Vaccine {
                id,
                name,
                batch,
                expiration_date,
            }),
            _ => None,
        };

        EmployeeWithVaccine {
            employee: Employee {
                id: row.id,
                cpf: row.cpf,
                full_name: row.full_name,
                birth_date: row.birth_date,
                date_first_dose: row.date_first_dose,
                date_second_dose: row.date_second_dose,
                date_third_dose: row.date_third_dose,
                vaccine_id: row.vaccine_id,
                comorbidity_carrier: row.comorbidity_carrier,
            },
            vaccine,
        }
    }
}
