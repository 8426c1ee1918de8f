//! Route definitions for the `/vaccines` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::vaccine;
use crate::state::AppState;

/// Routes mounted at `/vaccines`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// POST   /generate        -> generate
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vaccine::list).post(vaccine::create))
        .route("/generate", post(vaccine::generate))
        .route(
            "/{id}",
            get(vaccine::get_by_id)
                .put(vaccine::update)
                .delete(vaccine::delete),
        )
}
