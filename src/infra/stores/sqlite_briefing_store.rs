use crate::domain::{
    models::briefing::{Briefing, BriefingPatch, NewBriefing},
    ports::BriefingStore,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;

pub struct SqliteBriefingStore {
    pool: SqlitePool,
}

impl SqliteBriefingStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BriefingStore for SqliteBriefingStore {
    async fn create(&self, briefing: &NewBriefing) -> Result<Briefing, AppError> {
        let project = sqlx::query("SELECT id FROM projects WHERE id = ?")
            .bind(briefing.project_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if project.is_none() {
            return Err(AppError::NotFound("Project not found".into()));
        }

        sqlx::query_as::<_, Briefing>(
            "INSERT INTO briefings (project_id, date, location, description, hazards, controls, created_by, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
            .bind(briefing.project_id)
            .bind(briefing.date)
            .bind(&briefing.location)
            .bind(&briefing.description)
            .bind(Json(briefing.hazards.clone()))
            .bind(Json(briefing.controls.clone()))
            .bind(briefing.created_by)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn get(&self, id: i64) -> Result<Option<Briefing>, AppError> {
        sqlx::query_as::<_, Briefing>("SELECT * FROM briefings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Briefing>, AppError> {
        sqlx::query_as::<_, Briefing>("SELECT * FROM briefings ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_creator(&self, user_id: i64) -> Result<Vec<Briefing>, AppError> {
        sqlx::query_as::<_, Briefing>("SELECT * FROM briefings WHERE created_by = ? ORDER BY id ASC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, id: i64, patch: &BriefingPatch) -> Result<Option<Briefing>, AppError> {
        if let Some(project_id) = patch.project_id {
            let project = sqlx::query("SELECT id FROM projects WHERE id = ?")
                .bind(project_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?;
            if project.is_none() {
                return Err(AppError::NotFound("Project not found".into()));
            }
        }

        sqlx::query_as::<_, Briefing>(
            "UPDATE briefings SET
                project_id = COALESCE(?, project_id),
                date = COALESCE(?, date),
                location = COALESCE(?, location),
                description = COALESCE(?, description),
                hazards = COALESCE(?, hazards),
                controls = COALESCE(?, controls)
             WHERE id = ?
             RETURNING *",
        )
            .bind(patch.project_id)
            .bind(patch.date)
            .bind(&patch.location)
            .bind(&patch.description)
            .bind(patch.hazards.clone().map(Json))
            .bind(patch.controls.clone().map(Json))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    // There is no cascade in the schema itself; the briefing and its
    // attendances go in one transaction so neither can outlive the other.
    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM attendances WHERE briefing_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM briefings WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
