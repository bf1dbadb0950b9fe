//! Campaign entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: String,
    pub politician_id: String,
    pub election_year: i32,
    pub district: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaign {
    pub id: String,
    pub politician_id: String,
    pub election_year: i32,
    pub district: String,
}
