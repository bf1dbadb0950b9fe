//! Politician entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `politicians` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Politician {
    pub id: String,
    pub name: String,
    pub party: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePolitician {
    pub id: String,
    pub name: String,
    pub party: String,
}
