//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Joined read models where a query enriches the base row

pub mod campaign;
pub mod curriculum;
pub mod politician;
pub mod promise;
pub mod promise_update;
pub mod registration;
pub mod student;
pub mod subject;
