use prestart_backend::{
    api::router::create_router,
    config::{Config, StorageMode},
    domain::ports::Stores,
    domain::services::migration::MigrationStatus,
    domain::services::session::SessionService,
    infra::stores::{
        sqlite_attendance_store::SqliteAttendanceStore, sqlite_briefing_store::SqliteBriefingStore,
        sqlite_project_store::SqliteProjectStore, sqlite_token_store::SqliteTokenStore,
        sqlite_user_store::SqliteUserStore,
    },
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;
use uuid::Uuid;

pub fn sqlite_stores(pool: &Pool<Sqlite>) -> Stores {
    Stores {
        users: Arc::new(SqliteUserStore::new(pool.clone())),
        projects: Arc::new(SqliteProjectStore::new(pool.clone())),
        briefings: Arc::new(SqliteBriefingStore::new(pool.clone())),
        attendances: Arc::new(SqliteAttendanceStore::new(pool.clone())),
    }
}

pub async fn test_pool() -> (Pool<Sqlite>, String) {
    let db_filename = format!("test_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", db_filename);

    let connection_options = SqliteConnectOptions::from_str(&db_url)
        .unwrap()
        .create_if_missing(true)
        // The local backend mirrors the Dexie/IndexedDB frontend store, which
        // enforces no foreign keys; integrity (existence checks, cascade delete)
        // is handled in app code, not the DB. sqlx enables PRAGMA foreign_keys
        // by default, so disable it to match the documented local-store model
        // (and to allow seeding the legacy orphan records the migration tests
        // exercise).
        .foreign_keys(false);

    let pool = SqlitePoolOptions::new()
        .connect_with(connection_options)
        .await
        .expect("Failed to connect to test db");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate test db");

    (pool, db_filename)
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let (pool, db_filename) = test_pool().await;

        let config = Config {
            database_url: format!("sqlite://{}?mode=rwc", db_filename),
            port: 0,
            remote_api_url: None,
            remote_api_token: None,
            remote_timeout_secs: 5,
            storage_mode: StorageMode::Local,
        };

        let local = Arc::new(sqlite_stores(&pool));
        let sessions = Arc::new(SessionService::new(Arc::new(SqliteTokenStore::new(
            pool.clone(),
        ))));

        let state = Arc::new(AppState {
            config,
            local: local.clone(),
            remote: None,
            active: RwLock::new(local),
            sessions,
            migration: RwLock::new(MigrationStatus::Idle),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Registers a user and returns (user id, bearer token).
    pub async fn register(&self, name: &str, email: &str, password: &str, role: &str) -> (i64, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "name": name,
                    "email": email,
                    "password": password,
                    "role": role,
                    "company": "Test Co"
                })),
            )
            .await;

        if !response.status().is_success() {
            panic!("Registration failed in test helper: status {}", response.status());
        }

        let body = parse_body(response).await;
        let user_id = body["user"]["id"].as_i64().expect("No user id in register response");
        let token = body["token"].as_str().expect("No token in register response").to_string();

        (user_id, token)
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let body = parse_body(response).await;
        body["token"].as_str().expect("No token in login response").to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
