//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{Months, NaiveDate};
use http_body_util::BodyExt;
use recordbook_api::config::ServerConfig;
use recordbook_api::router::build_app_router;
use recordbook_api::state::AppState;
use recordbook_db::models::curriculum::{CreateCurriculum, CurriculumSubject};
use recordbook_db::models::politician::CreatePolitician;
use recordbook_db::models::promise::CreatePromise;
use recordbook_db::models::student::CreateStudent;
use recordbook_db::models::subject::CreateSubject;
use recordbook_db::repositories::{
    CurriculumRepo, PoliticianRepo, PromiseRepo, StudentRepo, SubjectRepo,
};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Curriculum 1 with an adult student (6401), a ten-year-old (6402), an
/// intro subject CS101 and its follow-up CS102.
pub async fn seed_school(pool: &PgPool) {
    CurriculumRepo::create(
        pool,
        &CreateCurriculum {
            id: 1,
            name: "Computer Science".to_string(),
            faculty_name: "Faculty of Science".to_string(),
        },
    )
    .await
    .unwrap();

    let today = chrono::Utc::now().date_naive();
    let adult = today.checked_sub_months(Months::new(20 * 12)).unwrap();
    let child = today.checked_sub_months(Months::new(10 * 12)).unwrap();
    for (id, birth_date) in [(6401, adult), (6402, child)] {
        StudentRepo::create(
            pool,
            &CreateStudent {
                id,
                title: "Ms.".to_string(),
                first_name: format!("First{id}"),
                last_name: format!("Last{id}"),
                birth_date,
                current_school: "Demonstration School".to_string(),
                email: format!("student{id}@example.com"),
                curriculum_id: 1,
            },
        )
        .await
        .unwrap();
    }

    for (id, prerequisite, semester) in [("CS101", None, 1), ("CS102", Some("CS101"), 2)] {
        SubjectRepo::create(
            pool,
            &CreateSubject {
                id: id.to_string(),
                name: format!("Subject {id}"),
                credits: 3,
                instructor: None,
                prerequisite_subject_id: prerequisite.map(str::to_string),
            },
        )
        .await
        .unwrap();
        CurriculumRepo::add_subject(
            pool,
            &CurriculumSubject {
                curriculum_id: 1,
                subject_id: id.to_string(),
                semester,
            },
        )
        .await
        .unwrap();
    }
}

/// Politician POL01 with promise P001 announced 2024-01-01.
pub async fn seed_promise(pool: &PgPool, status: &str) {
    PoliticianRepo::create(
        pool,
        &CreatePolitician {
            id: "POL01".to_string(),
            name: "Somchai".to_string(),
            party: "Progress".to_string(),
        },
    )
    .await
    .unwrap();
    PromiseRepo::create(
        pool,
        &CreatePromise {
            id: "P001".to_string(),
            politician_id: "POL01".to_string(),
            description: "Build a new rail line".to_string(),
            announcement_date: date(2024, 1, 1),
            status: Some(status.to_string()),
        },
    )
    .await
    .unwrap();
}
