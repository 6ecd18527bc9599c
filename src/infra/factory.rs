use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tokio::sync::RwLock;
use tracing::log::LevelFilter;
use tracing::{info, warn};

use crate::config::{Config, StorageMode};
use crate::domain::ports::Stores;
use crate::domain::services::migration::MigrationStatus;
use crate::domain::services::session::SessionService;
use crate::infra::stores::{
    http_attendance_store::HttpAttendanceStore, http_briefing_store::HttpBriefingStore,
    http_project_store::HttpProjectStore, http_user_store::HttpUserStore,
    remote_api::RemoteApi, sqlite_attendance_store::SqliteAttendanceStore,
    sqlite_briefing_store::SqliteBriefingStore, sqlite_project_store::SqliteProjectStore,
    sqlite_token_store::SqliteTokenStore, sqlite_user_store::SqliteUserStore,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_migrations(&pool).await;

    let local = Arc::new(Stores {
        users: Arc::new(SqliteUserStore::new(pool.clone())),
        projects: Arc::new(SqliteProjectStore::new(pool.clone())),
        briefings: Arc::new(SqliteBriefingStore::new(pool.clone())),
        attendances: Arc::new(SqliteAttendanceStore::new(pool.clone())),
    });

    let remote_api = config.remote_api_url.as_ref().map(|url| {
        RemoteApi::new(
            url.clone(),
            config.remote_api_token.clone(),
            Duration::from_secs(config.remote_timeout_secs),
        )
    });

    let remote = remote_api.as_ref().map(|api| {
        Arc::new(Stores {
            users: Arc::new(HttpUserStore::new(api.clone())),
            projects: Arc::new(HttpProjectStore::new(api.clone())),
            briefings: Arc::new(HttpBriefingStore::new(api.clone())),
            attendances: Arc::new(HttpAttendanceStore::new(api.clone())),
        })
    });

    // The active backend is picked exactly once here; afterwards only a
    // fully successful migration may switch it.
    let active = match config.storage_mode {
        StorageMode::Local => {
            info!("Storage backend: local (forced)");
            local.clone()
        }
        StorageMode::Remote => {
            info!("Storage backend: remote (forced)");
            remote
                .clone()
                .expect("STORAGE_MODE=remote requires REMOTE_API_URL")
        }
        StorageMode::Auto => {
            if let (Some(stores), Some(api)) = (&remote, &remote_api) {
                if api.probe().await {
                    info!("Remote API reachable, storage backend: remote");
                    stores.clone()
                } else {
                    warn!("Remote API unreachable, storage backend: local");
                    local.clone()
                }
            } else {
                info!("No remote API configured, storage backend: local");
                local.clone()
            }
        }
    };

    let sessions = Arc::new(SessionService::new(Arc::new(SqliteTokenStore::new(
        pool.clone(),
    ))));

    AppState {
        config: config.clone(),
        local,
        remote,
        active: RwLock::new(active),
        sessions,
        migration: RwLock::new(MigrationStatus::Idle),
    }
}

async fn run_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
