use axum::{extract::State, response::IntoResponse, Json};
use crate::api::extractors::auth::AuthUser;
use crate::domain::services::migration::{migrate_all, MigrationStatus};
use crate::domain::services::policy;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::{info, warn};

/// Pushes every local record to the remote store, then switches the active
/// backend to remote — but only when every record made it. Partial progress
/// is kept either way; nothing is rolled back.
pub async fn run_migration(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if !policy::can_run_migration(&actor) {
        return Err(AppError::Forbidden("Not authorized to run migration".into()));
    }

    let Some(remote) = state.remote.clone() else {
        return Err(AppError::Validation("Remote API is not configured".into()));
    };

    {
        let mut status = state.migration.write().await;
        if matches!(*status, MigrationStatus::Migrating) {
            return Err(AppError::Conflict("Migration already in progress".into()));
        }
        *status = MigrationStatus::Migrating;
    }

    info!("Starting migration to remote storage");

    match migrate_all(&state.local, &remote).await {
        Ok(report) => {
            if report.failed_total() == 0 {
                *state.active.write().await = remote;
                *state.migration.write().await = MigrationStatus::Success { report };
                info!("Migration complete, switched to remote storage");
            } else {
                warn!(
                    "Migration finished with {} failed records, staying on local storage",
                    report.failed_total()
                );
                *state.migration.write().await = MigrationStatus::Error {
                    message: format!("{} records failed to migrate", report.failed_total()),
                    report: Some(report),
                };
            }

            let status = state.migration.read().await.clone();
            Ok(Json(status))
        }
        Err(e) => {
            *state.migration.write().await = MigrationStatus::Error {
                message: e.to_string(),
                report: None,
            };
            Err(e)
        }
    }
}

pub async fn migration_status(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let status = state.migration.read().await.clone();
    Ok(Json(status))
}
