//! Bulk random-record generation backing the `generate` endpoints.

use sqlx::PgPool;

use imuna_core::factory;

use crate::models::employee::Employee;
use crate::models::vaccine::Vaccine;
use crate::repositories::{EmployeeRepo, VaccineRepo};

/// Insert `quantity` randomly generated vaccines.
pub async fn generate_vaccines(pool: &PgPool, quantity: i64) -> Result<Vec<Vaccine>, sqlx::Error> {
    let mut created = Vec::with_capacity(quantity as usize);
    for _ in 0..quantity {
        created.push(VaccineRepo::create(pool, &factory::random_vaccine()).await?);
    }
    Ok(created)
}

/// Insert `quantity` randomly generated employees.
///
/// Each employee gets its own freshly inserted vaccine. The CPF is
/// re-rolled while taken so the unique constraint cannot trip.
pub async fn generate_employees(
    pool: &PgPool,
    quantity: i64,
) -> Result<Vec<Employee>, sqlx::Error> {
    let mut created = Vec::with_capacity(quantity as usize);
    for _ in 0..quantity {
        let vaccine = VaccineRepo::create(pool, &factory::random_vaccine()).await?;
        let mut input = factory::random_employee();
        input.vaccine_id = Some(vaccine.id);
        while EmployeeRepo::cpf_exists(pool, &input.cpf, None).await? {
            input.cpf = factory::random_cpf();
        }
        created.push(EmployeeRepo::create(pool, &input).await?);
    }
    Ok(created)
}
