use crate::domain::{
    models::briefing::{Briefing, BriefingPatch, NewBriefing},
    ports::BriefingStore,
};
use crate::error::AppError;
use crate::infra::stores::remote_api::RemoteApi;
use async_trait::async_trait;

pub struct HttpBriefingStore {
    api: RemoteApi,
}

impl HttpBriefingStore {
    pub fn new(api: RemoteApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl BriefingStore for HttpBriefingStore {
    async fn create(&self, briefing: &NewBriefing) -> Result<Briefing, AppError> {
        self.api.post_json("/api/briefings", briefing).await
    }

    async fn get(&self, id: i64) -> Result<Option<Briefing>, AppError> {
        self.api.get_optional(&format!("/api/briefings/{}", id)).await
    }

    async fn list(&self) -> Result<Vec<Briefing>, AppError> {
        self.api.get_json("/api/briefings").await
    }

    async fn list_by_creator(&self, user_id: i64) -> Result<Vec<Briefing>, AppError> {
        self.api
            .get_json_with("/api/briefings", &[("created_by", user_id.to_string())])
            .await
    }

    async fn update(&self, id: i64, patch: &BriefingPatch) -> Result<Option<Briefing>, AppError> {
        self.api.put_optional(&format!("/api/briefings/{}", id), patch).await
    }

    // The central API cascades attendance deletion itself; one call is
    // enough here, unlike the local backend.
    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.api.delete(&format!("/api/briefings/{}", id)).await
    }
}
