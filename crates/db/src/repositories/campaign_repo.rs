//! Repository for the `campaigns` table.

use sqlx::PgExecutor;

use crate::models::campaign::{Campaign, CreateCampaign};

const COLUMNS: &str = "id, politician_id, election_year, district";

pub struct CampaignRepo;

impl CampaignRepo {
    pub async fn create<'e, E>(executor: E, input: &CreateCampaign) -> Result<Campaign, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO campaigns (id, politician_id, election_year, district)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&input.id)
            .bind(&input.politician_id)
            .bind(input.election_year)
            .bind(&input.district)
            .fetch_one(executor)
            .await
    }

    /// Campaign history for a politician, most recent election first.
    pub async fn list_by_politician<'e, E>(
        executor: E,
        politician_id: &str,
    ) -> Result<Vec<Campaign>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns
             WHERE politician_id = $1
             ORDER BY election_year DESC, id"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(politician_id)
            .fetch_all(executor)
            .await
    }
}
