//! Domain rules for the recordbook backend.
//!
//! Two independent rule sets live here: subject registration and grading
//! for students, and progress updates for tracked political promises. This
//! crate has no database dependency; rules reach persisted records through
//! the traits in [`store`], which the `db` crate implements for Postgres.

pub mod curriculum;
pub mod eligibility;
pub mod error;
pub mod grading;
pub mod promise_update;
pub mod registration;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
