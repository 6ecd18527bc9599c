use axum::{extract::{Path, State}, response::IntoResponse, Json};
use crate::api::dtos::requests::{ChangePasswordRequest, UpdateUserRequest};
use crate::api::dtos::responses::UserProfile;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::user::{Role, UserPatch};
use crate::domain::services::policy;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if !policy::can_list_users(&actor) {
        return Err(AppError::Forbidden("Not authorized to view all users".into()));
    }

    let stores = state.stores().await;
    let users = stores.users.list().await?;
    let profiles: Vec<UserProfile> = users.into_iter().map(UserProfile::from).collect();

    Ok(Json(profiles))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores().await;
    let user = stores
        .users
        .get(id)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    if !policy::can_view_user(&actor, id) {
        return Err(AppError::Forbidden("Not authorized to view this user".into()));
    }

    Ok(Json(UserProfile::from(user)))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !policy::can_update_user(&actor, id) {
        return Err(AppError::Forbidden("Not authorized to update this user".into()));
    }

    // A role change from anyone but a manager is dropped, not rejected.
    let role = match payload.role.as_deref() {
        Some(value) if policy::can_change_role(&actor) => Some(
            Role::parse(value).ok_or_else(|| AppError::Validation(format!("Unknown role: {}", value)))?,
        ),
        _ => None,
    };

    let patch = UserPatch {
        name: payload.name,
        email: payload.email,
        password: None,
        role,
        company: payload.company,
    };

    let stores = state.stores().await;
    let user = stores
        .users
        .update(id, &patch)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(UserProfile::from(user)))
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    if actor.id != id {
        return Err(AppError::Forbidden("Not authorized to change this password".into()));
    }

    if payload.new_password.is_empty() {
        return Err(AppError::Validation("new_password is required".into()));
    }

    if actor.password != payload.current_password {
        return Err(AppError::InvalidCredentials);
    }

    let patch = UserPatch {
        password: Some(payload.new_password),
        ..UserPatch::default()
    };

    let stores = state.stores().await;
    stores
        .users
        .update(id, &patch)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    info!("Password changed for user {}", id);

    Ok(Json(serde_json::json!({ "status": "ok" })))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !policy::can_delete_users(&actor) {
        return Err(AppError::Forbidden("Not authorized to delete users".into()));
    }

    let stores = state.stores().await;
    if !stores.users.delete(id).await? {
        return Err(AppError::NotFound("User not found".into()));
    }

    info!("Deleted user {}", id);

    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
