use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One worker's sign-on/sign-off record for a single briefing. `bac` is the
/// breath-alcohol reading taken at sign-on.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Attendance {
    pub id: i64,
    pub briefing_id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub time_on: String,
    pub time_off: Option<String>,
    pub bac: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewAttendance {
    pub briefing_id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub time_on: String,
    pub time_off: Option<String>,
    pub bac: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AttendancePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_off: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bac: Option<f64>,
}
