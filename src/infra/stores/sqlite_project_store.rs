use crate::domain::{
    models::project::{NewProject, Project, ProjectPatch},
    ports::ProjectStore,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteProjectStore {
    pool: SqlitePool,
}

impl SqliteProjectStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for SqliteProjectStore {
    async fn create(&self, project: &NewProject) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (name, location, client, description, created_by, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&project.name)
            .bind(&project.location)
            .bind(&project.client)
            .bind(&project.description)
            .bind(project.created_by)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn get(&self, id: i64) -> Result<Option<Project>, AppError> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Project>, AppError> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, id: i64, patch: &ProjectPatch) -> Result<Option<Project>, AppError> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET
                name = COALESCE(?, name),
                location = COALESCE(?, location),
                client = COALESCE(?, client),
                description = COALESCE(?, description)
             WHERE id = ?
             RETURNING *",
        )
            .bind(&patch.name)
            .bind(&patch.location)
            .bind(&patch.client)
            .bind(&patch.description)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
