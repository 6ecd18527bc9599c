use std::sync::Arc;
use crate::domain::{models::token::TokenRecord, ports::TokenStore};
use crate::error::AppError;
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};

/// Issues and validates opaque bearer tokens. Tokens are plain random
/// strings looked up server-side; they carry no claims and do not expire.
/// Multiple concurrent sessions per user are allowed.
pub struct SessionService {
    store: Arc<dyn TokenStore>,
}

impl SessionService {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    pub async fn issue(&self, user_id: i64) -> Result<String, AppError> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();

        self.store
            .insert(&TokenRecord {
                token: token.clone(),
                user_id,
                created_at: Utc::now(),
            })
            .await?;

        Ok(token)
    }

    pub async fn resolve(&self, token: &str) -> Result<i64, AppError> {
        self.store
            .find(token)
            .await?
            .map(|record| record.user_id)
            .ok_or(AppError::InvalidToken)
    }

    /// Revoking an unknown or already-revoked token is a no-op.
    pub async fn revoke(&self, token: &str) -> Result<(), AppError> {
        self.store.delete(token).await
    }
}
