use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{CreateAttendanceRequest, UpdateAttendanceRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::attendance::{AttendancePatch, NewAttendance};
use crate::domain::models::briefing::Briefing;
use crate::domain::models::user::User;
use crate::domain::ports::Stores;
use crate::domain::services::policy;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

// Attendance rights always flow through the parent briefing: resolve it
// first (404 on a dangling reference), then check its creator.
async fn authorized_briefing(
    stores: &Stores,
    actor: &User,
    briefing_id: i64,
    denial: &str,
) -> Result<Briefing, AppError> {
    let briefing = stores
        .briefings
        .get(briefing_id)
        .await?
        .ok_or(AppError::NotFound("Briefing not found".into()))?;

    if !policy::can_access_briefing(actor, briefing.created_by) {
        return Err(AppError::Forbidden(denial.into()));
    }

    Ok(briefing)
}

pub async fn list_attendances(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores().await;

    let attendances = if policy::is_manager(&actor) {
        stores.attendances.list().await?
    } else {
        stores.attendances.list_by_briefing_creator(actor.id).await?
    };

    Ok(Json(attendances))
}

pub async fn list_briefing_attendances(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(briefing_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores().await;

    authorized_briefing(
        &stores,
        &actor,
        briefing_id,
        "Not authorized to view attendances for this briefing",
    )
    .await?;

    let attendances = stores.attendances.list_by_briefing(briefing_id).await?;
    Ok(Json(attendances))
}

pub async fn get_attendance(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores().await;
    let attendance = stores
        .attendances
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Attendance record not found".into()))?;

    authorized_briefing(
        &stores,
        &actor,
        attendance.briefing_id,
        "Not authorized to view this attendance record",
    )
    .await?;

    Ok(Json(attendance))
}

pub async fn create_attendance(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<CreateAttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() || payload.time_on.trim().is_empty() {
        return Err(AppError::Validation("name and time_on are required".into()));
    }

    let stores = state.stores().await;

    authorized_briefing(
        &stores,
        &actor,
        payload.briefing_id,
        "Not authorized to create attendances for this briefing",
    )
    .await?;

    let attendance = stores
        .attendances
        .create(&NewAttendance {
            briefing_id: payload.briefing_id,
            user_id: payload.user_id,
            name: payload.name,
            time_on: payload.time_on,
            time_off: payload.time_off,
            bac: payload.bac.unwrap_or(0.0),
        })
        .await?;

    info!("Created attendance {} for briefing {}", attendance.id, attendance.briefing_id);

    Ok((StatusCode::CREATED, Json(attendance)))
}

pub async fn update_attendance(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores().await;
    let attendance = stores
        .attendances
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Attendance record not found".into()))?;

    authorized_briefing(
        &stores,
        &actor,
        attendance.briefing_id,
        "Not authorized to update this attendance record",
    )
    .await?;

    let patch = AttendancePatch {
        time_on: payload.time_on,
        time_off: payload.time_off,
        bac: payload.bac,
    };

    let updated = stores
        .attendances
        .update(id, &patch)
        .await?
        .ok_or(AppError::NotFound("Attendance record not found".into()))?;

    Ok(Json(updated))
}

pub async fn delete_attendance(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores().await;
    let attendance = stores
        .attendances
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Attendance record not found".into()))?;

    authorized_briefing(
        &stores,
        &actor,
        attendance.briefing_id,
        "Not authorized to delete this attendance record",
    )
    .await?;

    stores.attendances.delete(id).await?;

    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
