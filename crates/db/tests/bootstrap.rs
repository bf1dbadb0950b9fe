use sqlx::PgPool;

/// Connect, migrate, and verify every table is present.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    recordbook_db::health_check(&pool).await.unwrap();

    let tables = [
        "curricula",
        "curriculum_subjects",
        "students",
        "subjects",
        "registered_subjects",
        "politicians",
        "campaigns",
        "promises",
        "promise_updates",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}
