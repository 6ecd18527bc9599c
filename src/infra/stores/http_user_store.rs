use crate::domain::{
    models::user::{NewUser, User, UserPatch},
    ports::UserStore,
};
use crate::error::AppError;
use crate::infra::stores::remote_api::RemoteApi;
use async_trait::async_trait;

pub struct HttpUserStore {
    api: RemoteApi,
}

impl HttpUserStore {
    pub fn new(api: RemoteApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserStore for HttpUserStore {
    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        self.api.post_json("/api/users", user).await
    }

    async fn get(&self, id: i64) -> Result<Option<User>, AppError> {
        self.api.get_optional(&format!("/api/users/{}", id)).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.api
            .get_optional_with("/api/users/by-email", &[("email", email.to_string())])
            .await
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        self.api.get_json("/api/users").await
    }

    async fn update(&self, id: i64, patch: &UserPatch) -> Result<Option<User>, AppError> {
        self.api.put_optional(&format!("/api/users/{}", id), patch).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.api.delete(&format!("/api/users/{}", id)).await
    }
}
