//! Repository for the append-only `promise_updates` table.

use recordbook_core::types::Date;
use sqlx::PgExecutor;

use crate::models::promise_update::PromiseUpdate;

const COLUMNS: &str = "id, promise_id, update_date, detail, created_at";

pub struct PromiseUpdateRepo;

impl PromiseUpdateRepo {
    /// Append an update. A taken `id` fails with a primary-key violation.
    pub async fn create<'e, E>(
        executor: E,
        id: &str,
        promise_id: &str,
        update_date: Date,
        detail: &str,
    ) -> Result<PromiseUpdate, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO promise_updates (id, promise_id, update_date, detail)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromiseUpdate>(&query)
            .bind(id)
            .bind(promise_id)
            .bind(update_date)
            .bind(detail)
            .fetch_one(executor)
            .await
    }

    /// Update history of one promise, newest update date first.
    pub async fn list_by_promise<'e, E>(
        executor: E,
        promise_id: &str,
    ) -> Result<Vec<PromiseUpdate>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM promise_updates
             WHERE promise_id = $1
             ORDER BY update_date DESC, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PromiseUpdate>(&query)
            .bind(promise_id)
            .fetch_all(executor)
            .await
    }

    /// Highest id in the table. Ids are compared by length first, then as
    /// text. A plain string max would rank `U999` above `U1000` and hand out
    /// `U1000` again once the counter passes three digits; for ids of equal
    /// width both orderings agree.
    pub async fn latest_id<'e, E>(executor: E) -> Result<Option<String>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, String>(
            "SELECT id FROM promise_updates ORDER BY length(id) DESC, id DESC LIMIT 1",
        )
        .fetch_optional(executor)
        .await
    }
}
