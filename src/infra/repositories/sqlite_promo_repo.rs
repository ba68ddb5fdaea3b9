use crate::domain::{models::promo::{NewPromoCode, PromoCode}, ports::PromoCodeRepository};
use crate::error::AppError;
use super::sqlite_rows::promo_from_row;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqlitePromoRepo {
    pool: SqlitePool,
}

impl SqlitePromoRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromoCodeRepository for SqlitePromoRepo {
    async fn insert_if_absent(&self, promo: &NewPromoCode) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO promo_codes (code, discount_type, value, is_active, created_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT DO NOTHING"
        )
            .bind(&promo.code).bind(&promo.discount_type).bind(promo.value.to_string())
            .bind(promo.is_active).bind(Utc::now())
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() == 1)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, AppError> {
        sqlx::query("SELECT * FROM promo_codes WHERE LOWER(code) = LOWER(?)")
            .bind(code)
            .try_map(promo_from_row)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
