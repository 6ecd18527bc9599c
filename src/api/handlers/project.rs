use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{CreateProjectRequest, UpdateProjectRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::project::{NewProject, ProjectPatch};
use crate::domain::services::policy;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores().await;
    let projects = stores.projects.list().await?;
    Ok(Json(projects))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores().await;
    let project = stores
        .projects
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Project not found".into()))?;
    Ok(Json(project))
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !policy::can_manage_projects(&actor) {
        return Err(AppError::Forbidden("Not authorized to create projects".into()));
    }

    if payload.name.trim().is_empty() || payload.location.trim().is_empty() || payload.client.trim().is_empty() {
        return Err(AppError::Validation("name, location and client are required".into()));
    }

    let stores = state.stores().await;
    let project = stores
        .projects
        .create(&NewProject {
            name: payload.name,
            location: payload.location,
            client: payload.client,
            description: payload.description,
            created_by: actor.id,
        })
        .await?;

    info!("Created project {}", project.id);

    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !policy::can_manage_projects(&actor) {
        return Err(AppError::Forbidden("Not authorized to update projects".into()));
    }

    let patch = ProjectPatch {
        name: payload.name,
        location: payload.location,
        client: payload.client,
        description: payload.description,
    };

    let stores = state.stores().await;
    let project = stores
        .projects
        .update(id, &patch)
        .await?
        .ok_or(AppError::NotFound("Project not found".into()))?;

    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !policy::can_manage_projects(&actor) {
        return Err(AppError::Forbidden("Not authorized to delete projects".into()));
    }

    let stores = state.stores().await;
    if !stores.projects.delete(id).await? {
        return Err(AppError::NotFound("Project not found".into()));
    }

    info!("Deleted project {}", id);

    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
