use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use crate::domain::models::user::User;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::Span;

/// The authenticated actor. Extraction fails closed: a missing, malformed
/// or unknown bearer token rejects with 401 before the handler runs.
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::InvalidToken)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(AppError::InvalidToken)?;

        let user_id = state.sessions.resolve(token).await?;

        let stores = state.stores().await;
        let user = stores
            .users
            .get(user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Span::current().record("user_id", user.id);

        Ok(AuthUser(user))
    }
}
