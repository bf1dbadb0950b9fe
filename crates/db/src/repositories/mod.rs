//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Methods take any [`sqlx::PgExecutor`] as the first argument, so the same
//! call works against `&PgPool` or a transaction's `&mut PgConnection`.

pub mod campaign_repo;
pub mod curriculum_repo;
pub mod politician_repo;
pub mod promise_repo;
pub mod promise_update_repo;
pub mod registration_repo;
pub mod student_repo;
pub mod subject_repo;

pub use campaign_repo::CampaignRepo;
pub use curriculum_repo::CurriculumRepo;
pub use politician_repo::PoliticianRepo;
pub use promise_repo::PromiseRepo;
pub use promise_update_repo::PromiseUpdateRepo;
pub use registration_repo::RegistrationRepo;
pub use student_repo::StudentRepo;
pub use subject_repo::SubjectRepo;
