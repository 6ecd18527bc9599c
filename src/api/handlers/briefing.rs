use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{CreateBriefingRequest, UpdateBriefingRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::briefing::{BriefingPatch, NewBriefing};
use crate::domain::services::policy;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn list_briefings(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores().await;

    // Managers see every briefing; supervisors only their own.
    let briefings = if policy::is_manager(&actor) {
        stores.briefings.list().await?
    } else {
        stores.briefings.list_by_creator(actor.id).await?
    };

    Ok(Json(briefings))
}

pub async fn get_briefing(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores().await;
    let briefing = stores
        .briefings
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Briefing not found".into()))?;

    if !policy::can_access_briefing(&actor, briefing.created_by) {
        return Err(AppError::Forbidden("Not authorized to view this briefing".into()));
    }

    Ok(Json(briefing))
}

pub async fn create_briefing(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<CreateBriefingRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.location.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(AppError::Validation("location and description are required".into()));
    }

    let stores = state.stores().await;

    // Any authenticated user may brief against any existing project; the
    // store reports a missing project as NotFound.
    let briefing = stores
        .briefings
        .create(&NewBriefing {
            project_id: payload.project_id,
            date: payload.date,
            location: payload.location,
            description: payload.description,
            hazards: payload.hazards,
            controls: payload.controls,
            created_by: actor.id,
        })
        .await?;

    info!("Created briefing {} for project {}", briefing.id, briefing.project_id);

    Ok((StatusCode::CREATED, Json(briefing)))
}

pub async fn update_briefing(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBriefingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores().await;
    let briefing = stores
        .briefings
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Briefing not found".into()))?;

    if !policy::can_access_briefing(&actor, briefing.created_by) {
        return Err(AppError::Forbidden("Not authorized to update this briefing".into()));
    }

    let patch = BriefingPatch {
        project_id: payload.project_id,
        date: payload.date,
        location: payload.location,
        description: payload.description,
        hazards: payload.hazards,
        controls: payload.controls,
    };

    let updated = stores
        .briefings
        .update(id, &patch)
        .await?
        .ok_or(AppError::NotFound("Briefing not found".into()))?;

    Ok(Json(updated))
}

pub async fn delete_briefing(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores().await;
    let briefing = stores
        .briefings
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Briefing not found".into()))?;

    if !policy::can_access_briefing(&actor, briefing.created_by) {
        return Err(AppError::Forbidden("Not authorized to delete this briefing".into()));
    }

    stores.briefings.delete(id).await?;

    info!("Deleted briefing {} and its attendances", id);

    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
