//! Repository for the `vaccines` table.

use sqlx::PgPool;

use imuna_core::search::{clamp_page, clamp_per_page, contains_pattern};
use imuna_core::types::DbId;
use imuna_core::vaccine::NewVaccine;

use crate::models::page::Page;
use crate::models::vaccine::{Vaccine, VaccineListParams};

/// Column list for `vaccines` queries.
const VACCINE_COLUMNS: &str = "id, name, batch, expiration_date";

/// Provides CRUD operations for vaccines.
pub struct VaccineRepo;

impl VaccineRepo {
    /// List vaccines ordered by id, with optional substring filters on
    /// `name` and `batch`.
    ///
    /// Both columns are `NOT NULL`, so an absent filter binds as `%%`
    /// and matches every row.
    pub async fn paginate(
        pool: &PgPool,
        params: &VaccineListParams,
    ) -> Result<Page<Vaccine>, sqlx::Error> {
        let page = clamp_page(params.page);
        let per_page = clamp_per_page(params.per_page);
        let offset = (page - 1) * per_page;

        let name_pattern = contains_pattern(params.name.as_deref().unwrap_or(""));
        let batch_pattern = contains_pattern(params.batch.as_deref().unwrap_or(""));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM vaccines WHERE name LIKE $1 AND batch LIKE $2",
        )
        .bind(&name_pattern)
        .bind(&batch_pattern)
        .fetch_one(pool)
        .await?;

        let query = format!(
            "SELECT {VACCINE_COLUMNS} FROM vaccines \
             WHERE name LIKE $1 AND batch LIKE $2 \
             ORDER BY id \
             LIMIT $3 OFFSET $4"
        );
        let data = sqlx::query_as::<_, Vaccine>(&query)
            .bind(&name_pattern)
            .bind(&batch_pattern)
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(Page::new(data, page, per_page, total))
    }

    /// Find a vaccine by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vaccine>, sqlx::Error> {
        let query = format!("SELECT {VACCINE_COLUMNS} FROM vaccines WHERE id = $1");
        sqlx::query_as::<_, Vaccine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new vaccine and return the stored row.
    pub async fn create(pool: &PgPool, input: &NewVaccine) -> Result<Vaccine, sqlx::Error> {
        let query = format!(
            "INSERT INTO vaccines (name, batch, expiration_date) \
             VALUES ($1, $2, $3) \
             RETURNING {VACCINE_COLUMNS}"
        );
        sqlx::query_as::<_, Vaccine>(&query)
            .bind(&input.name)
            .bind(&input.batch)
            .bind(input.expiration_date)
            .fetch_one(pool)
            .await
    }

    /// Replace all fields of a vaccine.
    ///
    /// Returns `None` if no vaccine with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewVaccine,
    ) -> Result<Option<Vaccine>, sqlx::Error> {
        let query = format!(
            "UPDATE vaccines SET name = $2, batch = $3, expiration_date = $4 \
             WHERE id = $1 \
             RETURNING {VACCINE_COLUMNS}"
        );
        sqlx::query_as::<_, Vaccine>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.batch)
            .bind(input.expiration_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a vaccine by ID. Returns `true` if a row was deleted.
    ///
    /// The `employees.vaccine_id` foreign key is `ON DELETE RESTRICT`,
    /// so this fails while any employee still references the vaccine.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vaccines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether any employee references this vaccine.
    pub async fn is_referenced(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM employees WHERE vaccine_id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
