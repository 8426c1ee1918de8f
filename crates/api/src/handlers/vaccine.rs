//! Handlers for the `/vaccines` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use imuna_core::error::DomainError;
use imuna_core::types::DbId;
use imuna_core::vaccine::VaccineInput;
use imuna_db::factory;
use imuna_db::models::page::Page;
use imuna_db::models::vaccine::{Vaccine, VaccineListParams};
use imuna_db::repositories::VaccineRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::query::GenerateParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /vaccines
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<VaccineListParams>,
) -> AppResult<Json<Page<Vaccine>>> {
    let page = VaccineRepo::paginate(&state.pool, &params).await?;
    Ok(Json(page))
}

/// GET /vaccines/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> AppResult<Json<Vaccine>> {
    let id = parse_vaccine_id(&raw)?;
    let vaccine = VaccineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Vaccine",
        }))?;
    Ok(Json(vaccine))
}

/// POST /vaccines
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<VaccineInput>,
) -> AppResult<(StatusCode, Json<Vaccine>)> {
    let new_vaccine = input.validate().map_err(DomainError::Validation)?;
    let vaccine = VaccineRepo::create(&state.pool, &new_vaccine).await?;
    Ok((StatusCode::CREATED, Json(vaccine)))
}

/// PUT /vaccines/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    AppJson(input): AppJson<VaccineInput>,
) -> AppResult<Json<Vaccine>> {
    let id = parse_vaccine_id(&raw)?;
    let new_vaccine = input.validate().map_err(DomainError::Validation)?;
    let updated = VaccineRepo::update(&state.pool, id, &new_vaccine)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "Vaccine",
        }))?;
    Ok(Json(updated))
}

/// DELETE /vaccines/{id}
///
/// Refused with a 409 while any employee still references the vaccine;
/// the foreign key is `ON DELETE RESTRICT`, so the pre-check only
/// supplies a clearer message than the constraint would.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_vaccine_id(&raw)?;
    if VaccineRepo::is_referenced(&state.pool, id).await? {
        return Err(AppError::Domain(DomainError::Conflict(
            "Vaccine is referenced by employees and cannot be deleted".to_string(),
        )));
    }

    let deleted = VaccineRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(MessageResponse::new("Vaccine deleted successfully")))
    } else {
        Err(AppError::Domain(DomainError::NotFound {
            entity: "Vaccine",
        }))
    }
}

/// POST /vaccines/generate?quantity=
pub async fn generate(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<GenerateParams>,
) -> AppResult<Json<MessageResponse>> {
    let quantity = params.resolve_quantity()?;
    let created = factory::generate_vaccines(&state.pool, quantity).await?;
    Ok(Json(MessageResponse::new(format!(
        "{} vaccine(s) generated with success!",
        created.len()
    ))))
}

/// A non-numeric path segment cannot match any vaccine id, so it reads
/// as not found rather than as a malformed request.
fn parse_vaccine_id(raw: &str) -> Result<DbId, AppError> {
    raw.parse::<DbId>()
        .map_err(|_| AppError::Domain(DomainError::NotFound { entity: "Vaccine" }))
}
