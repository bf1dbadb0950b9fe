//! Progress updates for tracked promises.
//!
//! A new update must respect the promise's timeline: it cannot predate the
//! announcement, and it cannot predate the latest update already recorded
//! for that promise (same-day updates are fine). Promises marked `SILENT`
//! accept no further updates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::store::{PromiseStore, PromiseUpdateRecord, PromiseUpdateStore, StoreError};
use crate::types::{Date, PromiseId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_NOT_STARTED: &str = "NOT_STARTED";
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";
pub const STATUS_SILENT: &str = "SILENT";
pub const STATUS_COMPLETED: &str = "COMPLETED";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_NOT_STARTED,
    STATUS_IN_PROGRESS,
    STATUS_SILENT,
    STATUS_COMPLETED,
];

/// Status value meaning "leave the promise's status as it is".
pub const STATUS_UNCHANGED: &str = "UNCHANGED";

/// Id given to the very first update in an empty table.
pub const SEED_UPDATE_ID: &str = "U001";

/// Accepted format for update dates.
pub const UPDATE_DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// PromiseStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromiseStatus {
    NotStarted,
    InProgress,
    Silent,
    Completed,
}

impl PromiseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => STATUS_NOT_STARTED,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Silent => STATUS_SILENT,
            Self::Completed => STATUS_COMPLETED,
        }
    }
}

impl fmt::Display for PromiseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromiseStatus {
    type Err = PromiseUpdateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_NOT_STARTED => Ok(Self::NotStarted),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_SILENT => Ok(Self::Silent),
            STATUS_COMPLETED => Ok(Self::Completed),
            _ => Err(PromiseUpdateError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PromiseUpdateError {
    #[error("Promise {0} not found")]
    PromiseNotFound(PromiseId),

    #[error("Promise {0} is marked SILENT and no longer accepts updates")]
    StatusSilent(PromiseId),

    #[error("Invalid update date '{0}', expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("Update date {update_date} is before the announcement date {announcement_date}")]
    DateBeforeAnnouncement {
        update_date: Date,
        announcement_date: Date,
    },

    #[error("Update date {update_date} is before the latest recorded update ({latest})")]
    DateBeforeLatestUpdate { update_date: Date, latest: Date },

    #[error("Update detail is required")]
    DetailRequired,

    #[error(
        "Invalid status '{0}'. Must be one of: {valid}",
        valid = VALID_STATUSES.join(", ")
    )]
    InvalidStatus(String),

    #[error("Update id {0} is already taken")]
    DuplicateKey(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PromiseUpdateError {
    /// Machine-readable reason string for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PromiseNotFound(_) => "PROMISE_NOT_FOUND",
            Self::StatusSilent(_) => "STATUS_SILENT",
            Self::InvalidDateFormat(_) => "INVALID_DATE_FORMAT",
            Self::DateBeforeAnnouncement { .. } => "DATE_BEFORE_ANNOUNCEMENT",
            Self::DateBeforeLatestUpdate { .. } => "DATE_BEFORE_LATEST_UPDATE",
            Self::DetailRequired => "DETAIL_REQUIRED",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::DuplicateKey(_) => "DUPLICATE_KEY",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}

// ---------------------------------------------------------------------------
// Request / outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct AddUpdateRequest {
    pub promise_id: PromiseId,
    pub detail: Option<String>,
    /// `YYYY-MM-DD`. Absent is reported as an invalid date, after the
    /// promise checks.
    pub update_date: Option<String>,
    /// New status, or absent / blank / [`STATUS_UNCHANGED`] to keep it.
    pub new_status: Option<String>,
}

/// Result of a successful [`add_update`] call.
#[derive(Debug)]
pub enum AddUpdateOutcome {
    /// The update was recorded and the requested status change, if any,
    /// was applied.
    Applied {
        update: PromiseUpdateRecord,
        status: Option<PromiseStatus>,
    },
    /// The update was recorded but the status change was rejected. The
    /// update is kept.
    UpdateOnly {
        update: PromiseUpdateRecord,
        status_error: PromiseUpdateError,
    },
}

impl AddUpdateOutcome {
    pub fn update(&self) -> &PromiseUpdateRecord {
        match self {
            Self::Applied { update, .. } | Self::UpdateOnly { update, .. } => update,
        }
    }

    pub fn is_full_success(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

pub fn parse_update_date(raw: &str) -> Result<Date, PromiseUpdateError> {
    Date::parse_from_str(raw.trim(), UPDATE_DATE_FORMAT)
        .map_err(|_| PromiseUpdateError::InvalidDateFormat(raw.to_string()))
}

/// Latest update date among `updates`, the date every new update must reach.
pub fn latest_update_date(updates: &[PromiseUpdateRecord]) -> Option<Date> {
    updates.iter().map(|u| u.update_date).max()
}

/// Next update id after `latest`.
///
/// The first character is kept as the prefix and the rest is read as a
/// number, incremented and zero-padded to three digits. A suffix that is not
/// a number restarts at 1. No previous id yields [`SEED_UPDATE_ID`].
pub fn next_update_id(latest: Option<&str>) -> String {
    let mut chars = match latest {
        Some(id) if !id.is_empty() => id.chars(),
        _ => return SEED_UPDATE_ID.to_string(),
    };
    let prefix = chars.next().unwrap_or('U');
    let number = chars
        .as_str()
        .parse::<u32>()
        .ok()
        .and_then(|n| n.checked_add(1))
        .unwrap_or(1);
    format!("{prefix}{number:03}")
}

/// Status requested by the caller, uppercased, or `None` when it should stay
/// as is. Status names are matched case-insensitively, like grades.
fn requested_status(raw: Option<&str>) -> Option<String> {
    raw.map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty() && s != STATUS_UNCHANGED)
}

// ---------------------------------------------------------------------------
// add_update
// ---------------------------------------------------------------------------

/// Validate and record a progress update, then apply the optional status
/// change.
///
/// Checks run in a fixed order and the first failure is returned with
/// nothing written: promise exists, promise not silent, date parses, date
/// not before the announcement, date not before the latest update, detail
/// present. The status change is validated only after the update is stored;
/// an invalid status yields [`AddUpdateOutcome::UpdateOnly`].
///
/// Two concurrent calls for the same promise can both pass the latest-date
/// check against the same snapshot. No locking is taken to prevent that.
pub async fn add_update<S>(
    store: &mut S,
    request: &AddUpdateRequest,
) -> Result<AddUpdateOutcome, PromiseUpdateError>
where
    S: PromiseStore + PromiseUpdateStore,
{
    let promise_id = request.promise_id.as_str();

    let promise = store
        .promise_by_id(promise_id)
        .await?
        .ok_or_else(|| PromiseUpdateError::PromiseNotFound(promise_id.to_string()))?;

    if promise.status == PromiseStatus::Silent {
        return Err(PromiseUpdateError::StatusSilent(promise.id));
    }

    let raw_date = request
        .update_date
        .as_deref()
        .ok_or_else(|| PromiseUpdateError::InvalidDateFormat(String::new()))?;
    let update_date = parse_update_date(raw_date)?;

    if update_date < promise.announcement_date {
        return Err(PromiseUpdateError::DateBeforeAnnouncement {
            update_date,
            announcement_date: promise.announcement_date,
        });
    }

    let existing = store.updates_for_promise(promise_id).await?;
    if let Some(latest) = latest_update_date(&existing) {
        if update_date < latest {
            return Err(PromiseUpdateError::DateBeforeLatestUpdate {
                update_date,
                latest,
            });
        }
    }

    let detail = request
        .detail
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .ok_or(PromiseUpdateError::DetailRequired)?;

    let latest_id = store.latest_update_id().await?;
    let record = PromiseUpdateRecord {
        id: next_update_id(latest_id.as_deref()),
        promise_id: promise.id.clone(),
        update_date,
        detail: detail.to_string(),
    };

    let update = match store.insert_update(&record).await {
        Ok(update) => update,
        Err(StoreError::DuplicateKey(_)) => return Err(PromiseUpdateError::DuplicateKey(record.id)),
        Err(err) => return Err(err.into()),
    };

    let Some(raw_status) = requested_status(request.new_status.as_deref()) else {
        return Ok(AddUpdateOutcome::Applied {
            update,
            status: None,
        });
    };

    let status = match raw_status.parse::<PromiseStatus>() {
        Ok(status) => status,
        Err(status_error) => {
            return Ok(AddUpdateOutcome::UpdateOnly {
                update,
                status_error,
            });
        }
    };

    if store.update_status(&promise.id, status).await? {
        Ok(AddUpdateOutcome::Applied {
            update,
            status: Some(status),
        })
    } else {
        Ok(AddUpdateOutcome::UpdateOnly {
            update,
            status_error: PromiseUpdateError::PromiseNotFound(promise.id),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
