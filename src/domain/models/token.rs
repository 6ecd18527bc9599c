use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TokenRecord {
    pub token: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
