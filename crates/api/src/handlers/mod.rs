//! Request handlers, grouped by resource.
//!
//! Mutating handlers open a transaction, run the domain rules over a
//! [`recordbook_db::PgStore`] borrowing it, and commit only on success.
//! Any early return drops the transaction, which rolls it back.

pub mod politicians;
pub mod promises;
pub mod registrations;
pub mod reports;
pub mod students;
pub mod subjects;

use recordbook_core::types::Date;

/// Current UTC calendar date, the reference day for age checks.
pub(crate) fn today() -> Date {
    chrono::Utc::now().date_naive()
}
