//! Fixture builders shared by the repository tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use recordbook_db::models::curriculum::{CreateCurriculum, CurriculumSubject};
use recordbook_db::models::politician::CreatePolitician;
use recordbook_db::models::promise::CreatePromise;
use recordbook_db::models::student::CreateStudent;
use recordbook_db::models::subject::CreateSubject;
use recordbook_db::repositories::{
    CurriculumRepo, PoliticianRepo, PromiseRepo, StudentRepo, SubjectRepo,
};
use sqlx::PgPool;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn seed_curriculum(pool: &PgPool, id: i64, name: &str) {
    CurriculumRepo::create(
        pool,
        &CreateCurriculum {
            id,
            name: name.to_string(),
            faculty_name: "Faculty of Science".to_string(),
        },
    )
    .await
    .unwrap();
}

pub async fn seed_student(pool: &PgPool, id: i64, birth_date: NaiveDate, curriculum_id: i64) {
    StudentRepo::create(
        pool,
        &CreateStudent {
            id,
            title: "Mr.".to_string(),
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            birth_date,
            current_school: "Demonstration School".to_string(),
            email: format!("student{id}@example.com"),
            curriculum_id,
        },
    )
    .await
    .unwrap();
}

pub async fn seed_subject(pool: &PgPool, id: &str, prerequisite: Option<&str>) {
    SubjectRepo::create(
        pool,
        &CreateSubject {
            id: id.to_string(),
            name: format!("Subject {id}"),
            credits: 3,
            instructor: Some("Dr. Instructor".to_string()),
            prerequisite_subject_id: prerequisite.map(str::to_string),
        },
    )
    .await
    .unwrap();
}

pub async fn seed_curriculum_subject(pool: &PgPool, curriculum_id: i64, subject_id: &str, semester: i16) {
    CurriculumRepo::add_subject(
        pool,
        &CurriculumSubject {
            curriculum_id,
            subject_id: subject_id.to_string(),
            semester,
        },
    )
    .await
    .unwrap();
}

pub async fn seed_promise(pool: &PgPool, id: &str, announced: NaiveDate, status: &str) {
    if PoliticianRepo::find_by_id(pool, "POL01").await.unwrap().is_none() {
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
    }
    PromiseRepo::create(
        pool,
        &CreatePromise {
            id: id.to_string(),
            politician_id: "POL01".to_string(),
            description: format!("Promise {id}"),
            announcement_date: announced,
            status: Some(status.to_string()),
        },
    )
    .await
    .unwrap();
}
