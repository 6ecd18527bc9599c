use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::api::handlers::{attendance, auth, briefing, health, migration, project, user};
use crate::state::AppState;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/validate-token", post(auth::validate_token))
        .route("/api/auth/logout", post(auth::logout))

        // Users
        .route("/api/users", get(user::list_users))
        .route("/api/users/{id}", get(user::get_user).put(user::update_user).delete(user::delete_user))
        .route("/api/users/{id}/password", put(user::change_password))

        // Projects
        .route("/api/projects", get(project::list_projects).post(project::create_project))
        .route("/api/projects/{id}", get(project::get_project).put(project::update_project).delete(project::delete_project))

        // Briefings
        .route("/api/briefings", get(briefing::list_briefings).post(briefing::create_briefing))
        .route("/api/briefings/{id}", get(briefing::get_briefing).put(briefing::update_briefing).delete(briefing::delete_briefing))

        // Attendances
        .route("/api/attendances", get(attendance::list_attendances).post(attendance::create_attendance))
        .route("/api/attendances/briefing/{briefing_id}", get(attendance::list_briefing_attendances))
        .route("/api/attendances/{id}", get(attendance::get_attendance).put(attendance::update_attendance).delete(attendance::delete_attendance))

        // Migration
        .route("/api/migration/run", post(migration::run_migration))
        .route("/api/migration/status", get(migration::migration_status))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
