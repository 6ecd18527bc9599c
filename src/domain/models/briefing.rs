use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// A dated, located safety record created before work begins on site.
/// Hazards and controls keep their authoring order.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Briefing {
    pub id: i64,
    pub project_id: i64,
    pub date: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub hazards: Json<Vec<String>>,
    pub controls: Json<Vec<String>>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewBriefing {
    pub project_id: i64,
    pub date: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub hazards: Vec<String>,
    pub controls: Vec<String>,
    pub created_by: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BriefingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hazards: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<Vec<String>>,
}
