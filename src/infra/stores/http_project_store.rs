use crate::domain::{
    models::project::{NewProject, Project, ProjectPatch},
    ports::ProjectStore,
};
use crate::error::AppError;
use crate::infra::stores::remote_api::RemoteApi;
use async_trait::async_trait;

pub struct HttpProjectStore {
    api: RemoteApi,
}

impl HttpProjectStore {
    pub fn new(api: RemoteApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProjectStore for HttpProjectStore {
    async fn create(&self, project: &NewProject) -> Result<Project, AppError> {
        self.api.post_json("/api/projects", project).await
    }

    async fn get(&self, id: i64) -> Result<Option<Project>, AppError> {
        self.api.get_optional(&format!("/api/projects/{}", id)).await
    }

    async fn list(&self) -> Result<Vec<Project>, AppError> {
        self.api.get_json("/api/projects").await
    }

    async fn update(&self, id: i64, patch: &ProjectPatch) -> Result<Option<Project>, AppError> {
        self.api.put_optional(&format!("/api/projects/{}", id), patch).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.api.delete(&format!("/api/projects/{}", id)).await
    }
}
