//! Promise repositories and the update rules against a real database.

mod common;

use assert_matches::assert_matches;
use common::{date, seed_promise};
use recordbook_core::promise_update::{
    add_update, AddUpdateOutcome, AddUpdateRequest, PromiseStatus, PromiseUpdateError,
};
use recordbook_core::store::{PromiseUpdateRecord, PromiseUpdateStore, StoreError};
use recordbook_db::models::campaign::CreateCampaign;
use recordbook_db::repositories::{CampaignRepo, PromiseRepo, PromiseUpdateRepo};
use recordbook_db::PgStore;
use sqlx::PgPool;

fn request(promise_id: &str, update_date: &str, new_status: Option<&str>) -> AddUpdateRequest {
    AddUpdateRequest {
        promise_id: promise_id.to_string(),
        detail: Some("Budget approved".to_string()),
        update_date: Some(update_date.to_string()),
        new_status: new_status.map(str::to_string),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_latest_id_orders_by_length_then_text(pool: PgPool) {
    seed_promise(&pool, "P001", date(2024, 1, 1), "IN_PROGRESS").await;
    for id in ["U998", "U999", "U1000"] {
        PromiseUpdateRepo::create(&pool, id, "P001", date(2024, 2, 1), "x")
            .await
            .unwrap();
    }

    let latest = PromiseUpdateRepo::latest_id(&pool).await.unwrap();
    assert_eq!(latest.as_deref(), Some("U1000"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_update_id_is_duplicate_key(pool: PgPool) {
    seed_promise(&pool, "P001", date(2024, 1, 1), "IN_PROGRESS").await;
    let mut conn = pool.acquire().await.unwrap();
    let mut store = PgStore::new(&mut conn);

    let record = PromiseUpdateRecord {
        id: "U001".to_string(),
        promise_id: "P001".to_string(),
        update_date: date(2024, 2, 1),
        detail: "first".to_string(),
    };
    store.insert_update(&record).await.unwrap();
    let err = store.insert_update(&record).await.unwrap_err();
    assert_matches!(err, StoreError::DuplicateKey(_));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_update_applies_status_in_one_transaction(pool: PgPool) {
    seed_promise(&pool, "P001", date(2024, 1, 1), "NOT_STARTED").await;

    let mut tx = pool.begin().await.unwrap();
    let outcome = add_update(
        &mut PgStore::new(&mut tx),
        &request("P001", "2024-03-01", Some("IN_PROGRESS")),
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    assert_matches!(
        outcome,
        AddUpdateOutcome::Applied {
            status: Some(PromiseStatus::InProgress),
            ..
        }
    );
    assert_eq!(outcome.update().id, "U001");

    let promise = PromiseRepo::find_by_id(&pool, "P001").await.unwrap().unwrap();
    assert_eq!(promise.status, "IN_PROGRESS");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_status_keeps_committed_update(pool: PgPool) {
    seed_promise(&pool, "P001", date(2024, 1, 1), "IN_PROGRESS").await;

    let mut tx = pool.begin().await.unwrap();
    let outcome = add_update(
        &mut PgStore::new(&mut tx),
        &request("P001", "2024-03-01", Some("DONE")),
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    assert_matches!(
        outcome,
        AddUpdateOutcome::UpdateOnly {
            status_error: PromiseUpdateError::InvalidStatus(_),
            ..
        }
    );
    let history = PromiseUpdateRepo::list_by_promise(&pool, "P001").await.unwrap();
    assert_eq!(history.len(), 1);
    let promise = PromiseRepo::find_by_id(&pool, "P001").await.unwrap().unwrap();
    assert_eq!(promise.status, "IN_PROGRESS");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_backdated_update_is_rejected(pool: PgPool) {
    seed_promise(&pool, "P001", date(2024, 1, 1), "IN_PROGRESS").await;
    let mut conn = pool.acquire().await.unwrap();
    let mut store = PgStore::new(&mut conn);

    add_update(&mut store, &request("P001", "2024-03-01", None))
        .await
        .unwrap();
    let err = add_update(&mut store, &request("P001", "2024-02-15", None))
        .await
        .unwrap_err();
    assert_matches!(err, PromiseUpdateError::DateBeforeLatestUpdate { .. });

    let outcome = add_update(&mut store, &request("P001", "2024-03-01", None))
        .await
        .unwrap();
    assert_eq!(outcome.update().id, "U002");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_and_campaigns_are_newest_first(pool: PgPool) {
    seed_promise(&pool, "P001", date(2024, 1, 1), "IN_PROGRESS").await;
    PromiseUpdateRepo::create(&pool, "U001", "P001", date(2024, 2, 1), "older")
        .await
        .unwrap();
    PromiseUpdateRepo::create(&pool, "U002", "P001", date(2024, 5, 1), "newer")
        .await
        .unwrap();
    let history = PromiseUpdateRepo::list_by_promise(&pool, "P001").await.unwrap();
    assert_eq!(history[0].detail, "newer");

    for (id, year) in [("C1", 2019), ("C2", 2023)] {
        CampaignRepo::create(
            &pool,
            &CreateCampaign {
                id: id.to_string(),
                politician_id: "POL01".to_string(),
                election_year: year,
                district: "Bangkok 1".to_string(),
            },
        )
        .await
        .unwrap();
    }
    let campaigns = CampaignRepo::list_by_politician(&pool, "POL01").await.unwrap();
    assert_eq!(campaigns[0].election_year, 2023);

    let listed = PromiseRepo::list_with_politician(&pool).await.unwrap();
    assert_eq!(listed[0].politician_name, "Somchai");
    assert_eq!(listed[0].party, "Progress");
}
