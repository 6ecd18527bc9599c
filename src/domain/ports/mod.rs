use crate::domain::models::{
    attendance::{Attendance, AttendancePatch, NewAttendance},
    briefing::{Briefing, BriefingPatch, NewBriefing},
    project::{NewProject, Project, ProjectPatch},
    token::TokenRecord,
    user::{NewUser, User, UserPatch},
};
use crate::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;

// Store contracts shared by both persistence backends. `update` takes a
// patch so only the fields present in the input change, regardless of which
// backend serves the call. `delete` returns whether the record existed.

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;
    async fn get(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn update(&self, id: i64, patch: &UserPatch) -> Result<Option<User>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create(&self, project: &NewProject) -> Result<Project, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Project>, AppError>;
    async fn list(&self) -> Result<Vec<Project>, AppError>;
    async fn update(&self, id: i64, patch: &ProjectPatch) -> Result<Option<Project>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait BriefingStore: Send + Sync {
    /// Fails with `NotFound` if the referenced project does not exist.
    async fn create(&self, briefing: &NewBriefing) -> Result<Briefing, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Briefing>, AppError>;
    async fn list(&self) -> Result<Vec<Briefing>, AppError>;
    async fn list_by_creator(&self, user_id: i64) -> Result<Vec<Briefing>, AppError>;
    async fn update(&self, id: i64, patch: &BriefingPatch) -> Result<Option<Briefing>, AppError>;
    /// Deletes the briefing and all of its attendances as one unit.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Fails with `NotFound` if the referenced briefing does not exist.
    async fn create(&self, attendance: &NewAttendance) -> Result<Attendance, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Attendance>, AppError>;
    async fn list(&self) -> Result<Vec<Attendance>, AppError>;
    async fn list_by_briefing(&self, briefing_id: i64) -> Result<Vec<Attendance>, AppError>;
    async fn list_by_briefing_creator(&self, user_id: i64) -> Result<Vec<Attendance>, AppError>;
    async fn update(&self, id: i64, patch: &AttendancePatch) -> Result<Option<Attendance>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn insert(&self, record: &TokenRecord) -> Result<(), AppError>;
    async fn find(&self, token: &str) -> Result<Option<TokenRecord>, AppError>;
    /// Idempotent: deleting an unknown token is a no-op.
    async fn delete(&self, token: &str) -> Result<(), AppError>;
}

/// One persistence backend's worth of entity stores. The factory builds a
/// local bundle and, when a remote API is configured, a remote one.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub projects: Arc<dyn ProjectStore>,
    pub briefings: Arc<dyn BriefingStore>,
    pub attendances: Arc<dyn AttendanceStore>,
}
