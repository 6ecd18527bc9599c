use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::domain::ports::Stores;
use crate::domain::services::migration::MigrationStatus;
use crate::domain::services::session::SessionService;

pub struct AppState {
    pub config: Config,
    /// Always present; also the migration source.
    pub local: Arc<Stores>,
    /// Present only when a remote API is configured; the migration target.
    pub remote: Option<Arc<Stores>>,
    /// The backend serving requests. Written only by the migration handler,
    /// and only after a run with zero failures.
    pub active: RwLock<Arc<Stores>>,
    pub sessions: Arc<SessionService>,
    pub migration: RwLock<MigrationStatus>,
}

impl AppState {
    pub async fn stores(&self) -> Arc<Stores> {
        self.active.read().await.clone()
    }
}
