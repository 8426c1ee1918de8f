//! Row structs and list parameters.
//!
//! Each entity submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` params struct for the list endpoint filters

pub mod employee;
pub mod page;
pub mod vaccine;
