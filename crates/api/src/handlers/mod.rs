//! Request handlers for the registry entities.
//!
//! Each submodule provides async handler functions (list, create, get,
//! update, delete, generate) for a single entity type. Handlers delegate
//! to the corresponding repository in `imuna_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod employee;
pub mod vaccine;
