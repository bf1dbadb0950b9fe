//! Handlers for the `/promises` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use recordbook_core::error::CoreError;
use recordbook_core::promise_update::{self, AddUpdateOutcome, AddUpdateRequest, PromiseStatus};
use recordbook_core::store::PromiseUpdateRecord;
use recordbook_core::types::PromiseId;
use recordbook_db::models::promise::PromiseWithPolitician;
use recordbook_db::models::promise_update::{CreatePromiseUpdate, PromiseUpdate};
use recordbook_db::repositories::{PromiseRepo, PromiseUpdateRepo};
use recordbook_db::PgStore;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PromiseDetail {
    #[serde(flatten)]
    pub promise: PromiseWithPolitician,
    /// Newest update first.
    pub updates: Vec<PromiseUpdate>,
}

/// Body of a rejected status change that did not undo the update.
#[derive(Debug, Serialize)]
pub struct StatusErrorBody {
    pub code: &'static str,
    pub error: String,
}

/// Wire form of [`AddUpdateOutcome`], tagged by `outcome`.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddUpdateResponse {
    Applied {
        update: PromiseUpdateRecord,
        status: Option<PromiseStatus>,
    },
    UpdateOnly {
        update: PromiseUpdateRecord,
        status_error: StatusErrorBody,
    },
}

impl From<AddUpdateOutcome> for AddUpdateResponse {
    fn from(outcome: AddUpdateOutcome) -> Self {
        match outcome {
            AddUpdateOutcome::Applied { update, status } => Self::Applied { update, status },
            AddUpdateOutcome::UpdateOnly {
                update,
                status_error,
            } => Self::UpdateOnly {
                update,
                status_error: StatusErrorBody {
                    code: status_error.code(),
                    error: status_error.to_string(),
                },
            },
        }
    }
}

/// GET /api/v1/promises
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PromiseWithPolitician>>>> {
    let promises = PromiseRepo::list_with_politician(&state.pool).await?;
    Ok(Json(DataResponse { data: promises }))
}

/// GET /api/v1/promises/{id}
pub async fn get_detail(
    State(state): State<AppState>,
    Path(id): Path<PromiseId>,
) -> AppResult<Json<DataResponse<PromiseDetail>>> {
    let promise = PromiseRepo::find_with_politician(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::not_found("Promise", &id))?;
    let updates = PromiseUpdateRepo::list_by_promise(&state.pool, &id).await?;

    Ok(Json(DataResponse {
        data: PromiseDetail { promise, updates },
    }))
}

/// POST /api/v1/promises/{id}/updates
///
/// Returns 201 whenever the update row was written, including when the
/// requested status change was rejected (`outcome: "update_only"`).
pub async fn add_update(
    State(state): State<AppState>,
    Path(id): Path<PromiseId>,
    AppJson(input): AppJson<CreatePromiseUpdate>,
) -> AppResult<(StatusCode, Json<DataResponse<AddUpdateResponse>>)> {
    let request = AddUpdateRequest {
        promise_id: id,
        detail: input.detail,
        update_date: input.update_date,
        new_status: input.new_status,
    };

    let mut tx = state.pool.begin().await?;
    let outcome = promise_update::add_update(&mut PgStore::new(&mut tx), &request).await?;
    tx.commit().await?;

    match &outcome {
        AddUpdateOutcome::Applied { update, status } => tracing::info!(
            promise_id = %update.promise_id,
            update_id = %update.id,
            status = status.map(|s| s.as_str()),
            "Promise update recorded"
        ),
        AddUpdateOutcome::UpdateOnly {
            update,
            status_error,
        } => tracing::warn!(
            promise_id = %update.promise_id,
            update_id = %update.id,
            error = %status_error,
            "Promise update recorded without status change"
        ),
    }

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: outcome.into(),
        }),
    ))
}
