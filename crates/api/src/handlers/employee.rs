//! Handlers for the `/employees` resource.
//!
//! Employees are addressed by a dual identifier: an 11-digit path segment
//! is treated as a CPF, anything else numeric as a database id. Resolution
//! lives in [`EmployeeKey`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use imuna_core::employee::{is_valid_cpf, EmployeeInput, EmployeeKey, NewEmployee};
use imuna_core::error::DomainError;
use imuna_core::types::DbId;
use imuna_core::validation::ValidationErrors;
use imuna_db::factory;
use imuna_db::models::employee::{Employee, EmployeeListParams, EmployeeWithVaccine};
use imuna_db::models::page::Page;
use imuna_db::repositories::{EmployeeRepo, VaccineRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::query::GenerateParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /employees
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<EmployeeListParams>,
) -> AppResult<Json<Page<EmployeeWithVaccine>>> {
    let page = EmployeeRepo::paginate(&state.pool, &params).await?;
    Ok(Json(page))
}

/// GET /employees/{id_or_cpf}
pub async fn get_by_key(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> AppResult<Json<EmployeeWithVaccine>> {
    let key = raw.parse::<EmployeeKey>()?;
    let employee = EmployeeRepo::find_by_key(&state.pool, &key)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Employee",
        }))?;
    Ok(Json(employee))
}

/// POST /employees
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<EmployeeInput>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let new_employee = validate_against_db(&state, &input, None).await?;
    let employee = EmployeeRepo::create(&state.pool, &new_employee).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// PUT /employees/{id_or_cpf}
///
/// Replaces every field. The CPF uniqueness check excludes the record's
/// own id so an unchanged CPF passes.
pub async fn update(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    AppJson(input): AppJson<EmployeeInput>,
) -> AppResult<Json<Employee>> {
    let key = raw.parse::<EmployeeKey>()?;
    let existing = EmployeeRepo::find_by_key(&state.pool, &key)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Employee",
        }))?;

    let new_employee = validate_against_db(&state, &input, Some(existing.employee.id)).await?;
    let updated = EmployeeRepo::update(&state.pool, existing.employee.id, &new_employee)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Employee",
        }))?;
    Ok(Json(updated))
}

/// DELETE /employees/{id_or_cpf}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let key = raw.parse::<EmployeeKey>()?;
    let existing = EmployeeRepo::find_by_key(&state.pool, &key)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Employee",
        }))?;

    EmployeeRepo::delete(&state.pool, existing.employee.id).await?;
    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}

/// POST /employees/generate?quantity=
///
/// Inserts randomly generated employees, each with its own fresh vaccine.
pub async fn generate(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<GenerateParams>,
) -> AppResult<Json<MessageResponse>> {
    let quantity = params.resolve_quantity()?;
    let created = factory::generate_employees(&state.pool, quantity).await?;
    Ok(Json(MessageResponse::new(format!(
        "{} employee(s) generated with success!",
        created.len()
    ))))
}

/// Run the field rules plus the database-backed rules (CPF uniqueness,
/// vaccine existence), merging everything into one validation response.
///
/// Uniqueness is checked whenever the submitted CPF is well formed, even
/// if another field failed, so the client sees every problem at once.
async fn validate_against_db(
    state: &AppState,
    input: &EmployeeInput,
    exclude_id: Option<DbId>,
) -> Result<NewEmployee, AppError> {
    let (candidate, mut errors) = match input.validate() {
        Ok(candidate) => (Some(candidate), ValidationErrors::new()),
        Err(errors) => (None, errors),
    };

    if let Some(cpf) = input.cpf.as_deref().map(str::trim) {
        if is_valid_cpf(cpf) && EmployeeRepo::cpf_exists(&state.pool, cpf, exclude_id).await? {
            errors.add("cpf", "The cpf has already been taken.");
        }
    }

    if let Some(vaccine_id) = input.vaccine_id {
        if VaccineRepo::find_by_id(&state.pool, vaccine_id)
            .await?
            .is_none()
        {
            errors.add("vaccine_id", "The selected vaccine id is invalid.");
        }
    }

    match candidate {
        Some(candidate) if errors.is_empty() => Ok(candidate),
        _ => Err(DomainError::Validation(errors).into()),
    }
}
