//! Synthetic record generation for the `generate` endpoints.
//!
//! Pure value construction only; the repository layer owns persistence of
//! the generated rows.

use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;

use crate::employee::{NewEmployee, CPF_LENGTH};
use crate::vaccine::NewVaccine;

// ---------------------------------------------------------------------------
// Value pools
// ---------------------------------------------------------------------------

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Camila", "Diego", "Elisa", "Felipe", "Gabriela", "Heitor", "Isabela",
    "João", "Larissa", "Marcos", "Natália", "Otávio", "Paula", "Rafael", "Sofia", "Thiago",
    "Valentina", "William",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Barbosa", "Cardoso", "Dias", "Ferreira", "Gomes", "Lima", "Martins",
    "Nascimento", "Oliveira", "Pereira", "Ribeiro", "Santos", "Silva", "Souza", "Teixeira",
];

const VACCINE_NAMES: &[&str] = &[
    "CoronaVac", "AstraZeneca", "Pfizer", "Janssen", "Moderna", "Sputnik V", "Covaxin",
    "Novavax",
];

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Generate a random employee record with `vaccine_id` unset.
///
/// The CPF is a random 11-digit string, the birth date is at least 18
/// years in the past, and every dose date falls within the last year.
pub fn random_employee() -> NewEmployee {
    let mut rng = rand::rng();
    let today = Utc::now().date_naive();

    NewEmployee {
        cpf: random_cpf(),
        full_name: random_full_name(&mut rng),
        birth_date: today - Duration::days(rng.random_range(18 * 365..80 * 365)),
        date_first_dose: Some(random_recent_date(&mut rng, today)),
        date_second_dose: Some(random_recent_date(&mut rng, today)),
        date_third_dose: Some(random_recent_date(&mut rng, today)),
        vaccine_id: None,
        comorbidity_carrier: rng.random_bool(0.5),
    }
}

/// Generate a random vaccine record.
///
/// The batch is a seven-digit number rendered as text, and the expiration
/// date lands one to five years out.
pub fn random_vaccine() -> NewVaccine {
    let mut rng = rand::rng();
    let today = Utc::now().date_naive();

    NewVaccine {
        name: VACCINE_NAMES[rng.random_range(0..VACCINE_NAMES.len())].to_string(),
        batch: rng.random_range(1_000_000..=9_999_999i64).to_string(),
        expiration_date: today + Duration::days(rng.random_range(365..=5 * 365)),
    }
}

/// Generate a random 11-digit CPF string.
pub fn random_cpf() -> String {
    let mut rng = rand::rng();
    (0..CPF_LENGTH)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

fn random_full_name(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
    format!("{first} {last}")
}

fn random_recent_date(rng: &mut impl Rng, today: NaiveDate) -> NaiveDate {
    today - Duration::days(rng.random_range(0..365))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
