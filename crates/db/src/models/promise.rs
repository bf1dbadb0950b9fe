//! Promise entity model, DTOs, and the politician-joined read model.

use recordbook_core::types::{Date, PromiseId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `promises` table. `status` holds the wire string
/// (`NOT_STARTED`, `IN_PROGRESS`, `SILENT`, `COMPLETED`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Promise {
    pub id: PromiseId,
    pub politician_id: String,
    pub description: String,
    pub announcement_date: Date,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePromise {
    pub id: PromiseId,
    pub politician_id: String,
    pub description: String,
    pub announcement_date: Date,
    /// Defaults to `NOT_STARTED` if omitted.
    pub status: Option<String>,
}

/// A promise together with the name and party of the politician who made it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromiseWithPolitician {
    pub id: PromiseId,
    pub politician_id: String,
    pub description: String,
    pub announcement_date: Date,
    pub status: String,
    pub politician_name: String,
    pub party: String,
}
