//! Promise progress update model.

use recordbook_core::types::{Date, PromiseId, PromiseUpdateId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `promise_updates` table. Rows are never modified.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromiseUpdate {
    pub id: PromiseUpdateId,
    pub promise_id: PromiseId,
    pub update_date: Date,
    pub detail: String,
    pub created_at: Timestamp,
}

/// Request body for `POST /promises/{id}/updates`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePromiseUpdate {
    pub detail: Option<String>,
    /// `YYYY-MM-DD`. Optional here so a missing date is reported by the
    /// update rules in their usual order.
    pub update_date: Option<String>,
    pub new_status: Option<String>,
}
