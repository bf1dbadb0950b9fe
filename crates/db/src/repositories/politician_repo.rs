//! Repository for the `politicians` table.

use sqlx::PgExecutor;

use crate::models::politician::{CreatePolitician, Politician};

const COLUMNS: &str = "id, name, party";

pub struct PoliticianRepo;

impl PoliticianRepo {
    pub async fn create<'e, E>(executor: E, input: &CreatePolitician) -> Result<Politician, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO politicians (id, name, party) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Politician>(&query)
            .bind(&input.id)
            .bind(&input.name)
            .bind(&input.party)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<Politician>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM politicians WHERE id = $1");
        sqlx::query_as::<_, Politician>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// All politicians ordered by name.
    pub async fn list<'e, E>(executor: E) -> Result<Vec<Politician>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM politicians ORDER BY name, id");
        sqlx::query_as::<_, Politician>(&query)
            .fetch_all(executor)
            .await
    }
}
