//! Tests for the error envelope.
//!
//! The first half calls `IntoResponse` directly on `AppError` values to
//! verify the status and body mapping without an HTTP server. The second
//! half goes through the full router so bodies axum itself rejects also
//! come back as JSON with a `message` field.

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use imuna_api::error::AppError;
use imuna_core::error::DomainError;
use imuna_core::validation::ValidationErrors;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Direct AppError mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_not_found_maps_to_404() {
    let err = AppError::Domain(DomainError::NotFound { entity: "Employee" });

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Employee not found");
}

#[tokio::test]
async fn test_bad_identifier_maps_to_400() {
    let err = AppError::Domain(DomainError::BadIdentifier(
        "Identifier 'abc' must be a numeric id or an 11-digit CPF".into(),
    ));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["message"],
        "Identifier 'abc' must be a numeric id or an 11-digit CPF"
    );
}

#[tokio::test]
async fn test_validation_maps_to_422_with_field_map() {
    let mut errors = ValidationErrors::new();
    errors.add("cpf", "The cpf field is required.");
    errors.add("cpf", "The cpf must be exactly 11 digits.");
    errors.add("full_name", "The full name field is required.");
    let err = AppError::Domain(DomainError::Validation(errors));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["message"], "Validation failed");
    assert_eq!(json["errors"]["cpf"].as_array().unwrap().len(), 2);
    assert_eq!(
        json["errors"]["full_name"][0],
        "The full name field is required."
    );
}

#[tokio::test]
async fn test_conflict_maps_to_409() {
    let err = AppError::Domain(DomainError::Conflict(
        "Vaccine is referenced by employees and cannot be deleted".into(),
    ));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        json["message"],
        "Vaccine is referenced by employees and cannot be deleted"
    );
}

#[tokio::test]
async fn test_row_not_found_maps_to_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Resource not found");
}

#[tokio::test]
async fn test_unexpected_database_error_is_sanitized() {
    let err = AppError::Database(sqlx::Error::PoolTimedOut);

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // The response body must NOT contain the original error details.
    let body_text = json.to_string();
    assert!(
        !body_text.contains("pool"),
        "Internal error response must not leak driver details"
    );
    assert_eq!(json["message"], "An internal error occurred");
}

#[tokio::test]
async fn test_bad_request_maps_to_400() {
    let err = AppError::BadRequest("quantity must be numeric".into());

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "quantity must be numeric");
}

// ---------------------------------------------------------------------------
// Rejections through the full router
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_json_body_is_enveloped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/employees")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert!(json["message"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_wrong_field_type_is_enveloped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::post_json(
        app,
        "/employees",
        serde_json::json!({ "vaccine_id": "not-a-number" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = common::body_json(response).await;
    assert!(json["message"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_content_type_is_enveloped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/employees")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let json = common::body_json(response).await;
    assert!(json["message"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bad_query_parameter_is_enveloped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/employees?page=abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert!(json["message"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
