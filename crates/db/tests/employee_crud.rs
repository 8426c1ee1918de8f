//! Integration tests for employee repository operations.
//!
//! Exercises the repository layer against a real database:
//! - Create, lookup by id and by CPF, update, delete
//! - Unique constraint on cpf
//! - Foreign key to vaccines (restrict on delete)
//! - Pagination, filtering, and LIKE wildcard escaping

use chrono::NaiveDate;
use sqlx::PgPool;

use imuna_core::employee::{EmployeeKey, NewEmployee};
use imuna_core::vaccine::NewVaccine;
use imuna_db::models::employee::EmployeeListParams;
use imuna_db::repositories::{EmployeeRepo, VaccineRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_employee(cpf: &str, full_name: &str) -> NewEmployee {
    NewEmployee {
        cpf: cpf.to_string(),
        full_name: full_name.to_string(),
        birth_date: date(1990, 4, 12),
        date_first_dose: None,
        date_second_dose: None,
        date_third_dose: None,
        vaccine_id: None,
        comorbidity_carrier: false,
    }
}

fn new_vaccine(name: &str, batch: &str) -> NewVaccine {
    NewVaccine {
        name: name.to_string(),
        batch: batch.to_string(),
        expiration_date: date(2027, 1, 1),
    }
}

// ---------------------------------------------------------------------------
// Test: create and lookup, with and without a linked vaccine
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_by_id(pool: PgPool) {
    let vaccine = VaccineRepo::create(&pool, &new_vaccine("Coronavac", "1234567"))
        .await
        .unwrap();

    let mut input = new_employee("52998224725", "Maria Souza");
    input.vaccine_id = Some(vaccine.id);
    input.date_first_dose = Some(date(2024, 3, 1));
    let created = EmployeeRepo::create(&pool, &input).await.unwrap();
    assert_eq!(created.cpf, "52998224725");
    assert_eq!(created.vaccine_id, Some(vaccine.id));

    let found = EmployeeRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("employee should exist");
    assert_eq!(found.employee.full_name, "Maria Souza");
    assert_eq!(found.employee.date_first_dose, Some(date(2024, 3, 1)));
    let linked = found.vaccine.expect("vaccine should be joined");
    assert_eq!(linked.name, "Coronavac");
    assert_eq!(linked.batch, "1234567");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_without_vaccine_yields_none(pool: PgPool) {
    let created = EmployeeRepo::create(&pool, &new_employee("11144477735", "Carlos Lima"))
        .await
        .unwrap();

    let found = EmployeeRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("employee should exist");
    assert!(found.vaccine.is_none());
}

// ---------------------------------------------------------------------------
// Test: lookup by CPF and by resolved key
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_cpf(pool: PgPool) {
    let created = EmployeeRepo::create(&pool, &new_employee("98765432100", "Joana Alves"))
        .await
        .unwrap();

    let by_cpf = EmployeeRepo::find_by_cpf(&pool, "98765432100")
        .await
        .unwrap()
        .expect("lookup by cpf should hit");
    assert_eq!(by_cpf.employee.id, created.id);

    let by_key = EmployeeRepo::find_by_key(&pool, &EmployeeKey::Id(created.id))
        .await
        .unwrap()
        .expect("lookup by id key should hit");
    assert_eq!(by_key.employee.cpf, "98765432100");

    assert!(EmployeeRepo::find_by_cpf(&pool, "00000000000")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: unique constraint on cpf
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_cpf_rejected(pool: PgPool) {
    EmployeeRepo::create(&pool, &new_employee("12345678901", "Primeira Pessoa"))
        .await
        .unwrap();
    let result = EmployeeRepo::create(&pool, &new_employee("12345678901", "Segunda Pessoa")).await;
    assert!(result.is_err(), "Duplicate cpf should fail");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cpf_exists_excludes_own_record(pool: PgPool) {
    let created = EmployeeRepo::create(&pool, &new_employee("12345678901", "Pessoa"))
        .await
        .unwrap();

    assert!(EmployeeRepo::cpf_exists(&pool, "12345678901", None)
        .await
        .unwrap());
    assert!(
        !EmployeeRepo::cpf_exists(&pool, "12345678901", Some(created.id))
            .await
            .unwrap()
    );
    assert!(!EmployeeRepo::cpf_exists(&pool, "99999999999", None)
        .await
        .unwrap());
}

// ---------------------------------------------------------------------------
// Test: update replaces every column
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_all_fields(pool: PgPool) {
    let created = EmployeeRepo::create(&pool, &new_employee("12345678901", "Antes"))
        .await
        .unwrap();

    let mut replacement = new_employee("12345678901", "Depois");
    replacement.date_second_dose = Some(date(2024, 6, 15));
    replacement.comorbidity_carrier = true;
    let updated = EmployeeRepo::update(&pool, created.id, &replacement)
        .await
        .unwrap()
        .expect("update should hit");
    assert_eq!(updated.full_name, "Depois");
    assert_eq!(updated.date_second_dose, Some(date(2024, 6, 15)));
    assert!(updated.comorbidity_carrier);

    let missing = EmployeeRepo::update(&pool, created.id + 1000, &replacement)
        .await
        .unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Test: delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete(pool: PgPool) {
    let created = EmployeeRepo::create(&pool, &new_employee("12345678901", "Temporaria"))
        .await
        .unwrap();

    assert!(EmployeeRepo::delete(&pool, created.id).await.unwrap());
    assert!(EmployeeRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
    assert!(!EmployeeRepo::delete(&pool, created.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: vaccine deletion is blocked while referenced
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_vaccine_delete_restricted_while_referenced(pool: PgPool) {
    let vaccine = VaccineRepo::create(&pool, &new_vaccine("Pfizer", "7654321"))
        .await
        .unwrap();
    let mut input = new_employee("52998224725", "Vinculada");
    input.vaccine_id = Some(vaccine.id);
    let employee = EmployeeRepo::create(&pool, &input).await.unwrap();

    let blocked = VaccineRepo::delete(&pool, vaccine.id).await;
    assert!(blocked.is_err(), "Referenced vaccine should not delete");

    EmployeeRepo::delete(&pool, employee.id).await.unwrap();
    assert!(VaccineRepo::delete(&pool, vaccine.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: pagination and filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_paginate_filters_and_pages(pool: PgPool) {
    EmployeeRepo::create(&pool, &new_employee("11111111111", "Ana Silva"))
        .await
        .unwrap();
    EmployeeRepo::create(&pool, &new_employee("22222222222", "Bruno Costa"))
        .await
        .unwrap();
    EmployeeRepo::create(&pool, &new_employee("33333333333", "Ana Paula"))
        .await
        .unwrap();

    let by_name = EmployeeRepo::paginate(
        &pool,
        &EmployeeListParams {
            full_name: Some("Ana".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_name.total, 2);
    assert!(by_name
        .data
        .iter()
        .all(|e| e.employee.full_name.contains("Ana")));

    let by_cpf = EmployeeRepo::paginate(
        &pool,
        &EmployeeListParams {
            cpf: Some("222".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_cpf.total, 1);
    assert_eq!(by_cpf.data[0].employee.cpf, "22222222222");

    let second_page = EmployeeRepo::paginate(
        &pool,
        &EmployeeListParams {
            page: Some(2),
            per_page: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(second_page.data.len(), 1);
    assert_eq!(second_page.current_page, 2);
    assert_eq!(second_page.last_page, 2);
    assert_eq!(second_page.total, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_paginate_escapes_like_wildcards(pool: PgPool) {
    EmployeeRepo::create(&pool, &new_employee("44444444444", "100% Match"))
        .await
        .unwrap();
    EmployeeRepo::create(&pool, &new_employee("55555555555", "100x Match"))
        .await
        .unwrap();

    let filtered = EmployeeRepo::paginate(
        &pool,
        &EmployeeListParams {
            full_name: Some("100%".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(filtered.total, 1);
    assert_eq!(filtered.data[0].employee.full_name, "100% Match");
}
