//! Repository for the `promises` table.

use sqlx::PgExecutor;

use crate::models::promise::{CreatePromise, Promise, PromiseWithPolitician};

const COLUMNS: &str = "id, politician_id, description, announcement_date, status";

/// Column list for promise queries joined with `politicians` (aliased `pol`).
const JOINED_COLUMNS: &str = "p.id, p.politician_id, p.description, p.announcement_date, \
    p.status, pol.name AS politician_name, pol.party";

pub struct PromiseRepo;

impl PromiseRepo {
    /// Insert a new promise. Status defaults to `NOT_STARTED`.
    pub async fn create<'e, E>(executor: E, input: &CreatePromise) -> Result<Promise, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO promises (id, politician_id, description, announcement_date, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'NOT_STARTED'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Promise>(&query)
            .bind(&input.id)
            .bind(&input.politician_id)
            .bind(&input.description)
            .bind(input.announcement_date)
            .bind(&input.status)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<Promise>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM promises WHERE id = $1");
        sqlx::query_as::<_, Promise>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Set the status. Returns `true` if a row was updated.
    pub async fn update_status<'e, E>(executor: E, id: &str, status: &str) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("UPDATE promises SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Every promise with its politician, newest announcement first.
    pub async fn list_with_politician<'e, E>(
        executor: E,
    ) -> Result<Vec<PromiseWithPolitician>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM promises p
             JOIN politicians pol ON pol.id = p.politician_id
             ORDER BY p.announcement_date DESC, p.id"
        );
        sqlx::query_as::<_, PromiseWithPolitician>(&query)
            .fetch_all(executor)
            .await
    }

    pub async fn find_with_politician<'e, E>(
        executor: E,
        id: &str,
    ) -> Result<Option<PromiseWithPolitician>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM promises p
             JOIN politicians pol ON pol.id = p.politician_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, PromiseWithPolitician>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Promises made by one politician, newest announcement first.
    pub async fn list_by_politician<'e, E>(
        executor: E,
        politician_id: &str,
    ) -> Result<Vec<Promise>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM promises
             WHERE politician_id = $1
             ORDER BY announcement_date DESC, id"
        );
        sqlx::query_as::<_, Promise>(&query)
            .bind(politician_id)
            .fetch_all(executor)
            .await
    }
}
