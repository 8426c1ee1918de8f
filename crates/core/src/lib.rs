//! Domain logic for the vaccination registry.
//!
//! Pure types and rules shared by the persistence and HTTP layers:
//! identifier parsing, request validation, list-filter helpers, and
//! synthetic record generation. No database or network dependencies.

pub mod employee;
pub mod error;
pub mod factory;
pub mod search;
pub mod types;
pub mod vaccine;
pub mod validation;
