pub mod remote_api;

pub mod http_attendance_store;
pub mod http_briefing_store;
pub mod http_project_store;
pub mod http_user_store;

pub mod sqlite_attendance_store;
pub mod sqlite_briefing_store;
pub mod sqlite_project_store;
pub mod sqlite_token_store;
pub mod sqlite_user_store;
