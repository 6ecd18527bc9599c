use crate::domain::{
    models::attendance::{Attendance, AttendancePatch, NewAttendance},
    ports::AttendanceStore,
};
use crate::error::AppError;
use crate::infra::stores::remote_api::RemoteApi;
use async_trait::async_trait;

pub struct HttpAttendanceStore {
    api: RemoteApi,
}

impl HttpAttendanceStore {
    pub fn new(api: RemoteApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AttendanceStore for HttpAttendanceStore {
    async fn create(&self, attendance: &NewAttendance) -> Result<Attendance, AppError> {
        self.api.post_json("/api/attendances", attendance).await
    }

    async fn get(&self, id: i64) -> Result<Option<Attendance>, AppError> {
        self.api.get_optional(&format!("/api/attendances/{}", id)).await
    }

    async fn list(&self) -> Result<Vec<Attendance>, AppError> {
        self.api.get_json("/api/attendances").await
    }

    async fn list_by_briefing(&self, briefing_id: i64) -> Result<Vec<Attendance>, AppError> {
        self.api
            .get_json_with("/api/attendances", &[("briefing_id", briefing_id.to_string())])
            .await
    }

    async fn list_by_briefing_creator(&self, user_id: i64) -> Result<Vec<Attendance>, AppError> {
        self.api
            .get_json_with(
                "/api/attendances",
                &[("briefing_created_by", user_id.to_string())],
            )
            .await
    }

    async fn update(&self, id: i64, patch: &AttendancePatch) -> Result<Option<Attendance>, AppError> {
        self.api.put_optional(&format!("/api/attendances/{}", id), patch).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.api.delete(&format!("/api/attendances/{}", id)).await
    }
}
