use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub company: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ValidateTokenRequest {
    pub token: String,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub location: String,
    pub client: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub client: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBriefingRequest {
    pub project_id: i64,
    pub date: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub hazards: Vec<String>,
    pub controls: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateBriefingRequest {
    pub project_id: Option<i64>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub hazards: Option<Vec<String>>,
    pub controls: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct CreateAttendanceRequest {
    pub briefing_id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub time_on: String,
    pub time_off: Option<String>,
    pub bac: Option<f64>,
}

#[derive(Deserialize)]
pub struct UpdateAttendanceRequest {
    pub time_on: Option<String>,
    pub time_off: Option<String>,
    pub bac: Option<f64>,
}
