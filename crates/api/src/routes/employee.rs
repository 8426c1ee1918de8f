//! Route definitions for the `/employees` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::employee;
use crate::state::AppState;

/// Routes mounted at `/employees`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// POST   /generate        -> generate
/// GET    /{id_or_cpf}     -> get_by_key
/// PUT    /{id_or_cpf}     -> update
/// DELETE /{id_or_cpf}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(employee::list).post(employee::create))
        .route("/generate", post(employee::generate))
        .route(
            "/{id_or_cpf}",
            get(employee::get_by_key)
                .put(employee::update)
                .delete(employee::delete),
        )
}
