pub mod employee;
pub mod health;
pub mod vaccine;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree, mounted at the application root.
///
/// ```text
/// /employees                 list, create
/// /employees/generate        bulk random creation
/// /employees/{id_or_cpf}     get, update, delete
///
/// /vaccines                  list, create
/// /vaccines/generate         bulk random creation
/// /vaccines/{id}             get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/employees", employee::router())
        .nest("/vaccines", vaccine::router())
}
