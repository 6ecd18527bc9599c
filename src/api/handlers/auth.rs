use axum::{extract::State, http::{header, HeaderMap, StatusCode}, response::IntoResponse, Json};
use crate::api::dtos::requests::{LoginRequest, RegisterRequest, ValidateTokenRequest};
use crate::api::dtos::responses::{AuthResponse, UserProfile};
use crate::domain::models::user::{NewUser, Role};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation("name, email and password are required".into()));
    }

    let role = match payload.role.as_deref() {
        None => Role::SiteSupervisor,
        Some(value) => Role::parse(value)
            .ok_or_else(|| AppError::Validation(format!("Unknown role: {}", value)))?,
    };

    let stores = state.stores().await;

    if stores.users.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already in use".into()));
    }

    let user = stores
        .users
        .create(&NewUser {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role,
            company: payload.company.unwrap_or_default(),
        })
        .await?;

    let token = state.sessions.issue(user.id).await?;

    info!("Registered user {} ({})", user.id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserProfile::from(user),
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores().await;

    let user = stores
        .users
        .find_by_email(&payload.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if user.password != payload.password {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.sessions.issue(user.id).await?;

    info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        token,
        user: UserProfile::from(user),
    }))
}

pub async fn validate_token(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ValidateTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = state.sessions.resolve(&payload.token).await?;

    let stores = state.stores().await;
    let user = stores
        .users
        .get(user_id)
        .await?
        .ok_or(AppError::InvalidToken)?;

    Ok(Json(UserProfile::from(user)))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        state.sessions.revoke(token).await?;
    }

    info!("User logged out");

    Ok(StatusCode::OK)
}
