//! HTTP client for the immunization records API.
//!
//! Thin typed wrapper over the REST endpoints: one async method per
//! operation, a status-code error taxonomy, and display helpers for
//! terminal front ends.

pub mod client;
pub mod error;
pub mod mask;
pub mod types;

pub use client::ApiClient;
pub use error::{ClientError, ClientResult};
pub use mask::mask_cpf;
pub use types::{
    Employee, EmployeeFilter, EmployeePayload, Page, Vaccine, VaccineFilter, VaccinePayload,
};
