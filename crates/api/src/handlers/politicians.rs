//! Handlers for the `/politicians` resource.

use axum::extract::{Path, State};
use axum::Json;
use recordbook_core::error::CoreError;
use recordbook_db::models::campaign::Campaign;
use recordbook_db::models::politician::Politician;
use recordbook_db::models::promise::Promise;
use recordbook_db::repositories::{CampaignRepo, PoliticianRepo, PromiseRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PoliticianProfile {
    #[serde(flatten)]
    pub politician: Politician,
    /// Most recent election first.
    pub campaigns: Vec<Campaign>,
    pub promises: Vec<Promise>,
}

/// GET /api/v1/politicians
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Politician>>>> {
    let politicians = PoliticianRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: politicians }))
}

/// GET /api/v1/politicians/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<PoliticianProfile>>> {
    let politician = PoliticianRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::not_found("Politician", &id))?;
    let campaigns = CampaignRepo::list_by_politician(&state.pool, &id).await?;
    let promises = PromiseRepo::list_by_politician(&state.pool, &id).await?;

    Ok(Json(DataResponse {
        data: PoliticianProfile {
            politician,
            campaigns,
            promises,
        },
    }))
}
