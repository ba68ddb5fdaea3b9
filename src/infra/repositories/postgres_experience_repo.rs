use crate::domain::{models::experience::Experience, ports::ExperienceRepository};
use crate::error::AppError;
use super::like_pattern;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresExperienceRepo {
    pool: PgPool,
}

impl PostgresExperienceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExperienceRepository for PostgresExperienceRepo {
    async fn insert_if_absent(&self, experience: &Experience) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO experiences (id, title, location, description, price, image_url, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (id) DO NOTHING"
        )
            .bind(&experience.id).bind(&experience.title).bind(&experience.location)
            .bind(&experience.description).bind(experience.price).bind(&experience.image_url)
            .bind(experience.created_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() == 1)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Experience>, AppError> {
        sqlx::query_as::<_, Experience>("SELECT * FROM experiences WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn search(&self, term: Option<&str>) -> Result<Vec<Experience>, AppError> {
        match term {
            Some(term) => {
                sqlx::query_as::<_, Experience>(
                    "SELECT * FROM experiences
                     WHERE LOWER(title) LIKE $1 ESCAPE '\\' OR LOWER(location) LIKE $1 ESCAPE '\\'
                     ORDER BY created_at DESC, id ASC"
                )
                    .bind(like_pattern(term))
                    .fetch_all(&self.pool).await.map_err(AppError::Database)
            }
            None => {
                sqlx::query_as::<_, Experience>("SELECT * FROM experiences ORDER BY created_at DESC, id ASC")
                    .fetch_all(&self.pool).await.map_err(AppError::Database)
            }
        }
    }
}
