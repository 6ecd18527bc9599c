use crate::domain::{
    models::attendance::{Attendance, AttendancePatch, NewAttendance},
    ports::AttendanceStore,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteAttendanceStore {
    pool: SqlitePool,
}

impl SqliteAttendanceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for SqliteAttendanceStore {
    async fn create(&self, attendance: &NewAttendance) -> Result<Attendance, AppError> {
        let briefing = sqlx::query("SELECT id FROM briefings WHERE id = ?")
            .bind(attendance.briefing_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if briefing.is_none() {
            return Err(AppError::NotFound("Briefing not found".into()));
        }

        sqlx::query_as::<_, Attendance>(
            "INSERT INTO attendances (briefing_id, user_id, name, time_on, time_off, bac, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
            .bind(attendance.briefing_id)
            .bind(attendance.user_id)
            .bind(&attendance.name)
            .bind(&attendance.time_on)
            .bind(&attendance.time_off)
            .bind(attendance.bac)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn get(&self, id: i64) -> Result<Option<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>("SELECT * FROM attendances WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>("SELECT * FROM attendances ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_briefing(&self, briefing_id: i64) -> Result<Vec<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendances WHERE briefing_id = ? ORDER BY id ASC",
        )
            .bind(briefing_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_briefing_creator(&self, user_id: i64) -> Result<Vec<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(
            "SELECT a.* FROM attendances a
             JOIN briefings b ON b.id = a.briefing_id
             WHERE b.created_by = ?
             ORDER BY a.id ASC",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, id: i64, patch: &AttendancePatch) -> Result<Option<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(
            "UPDATE attendances SET
                time_on = COALESCE(?, time_on),
                time_off = COALESCE(?, time_off),
                bac = COALESCE(?, bac)
             WHERE id = ?
             RETURNING *",
        )
            .bind(&patch.time_on)
            .bind(&patch.time_off)
            .bind(patch.bac)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM attendances WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
