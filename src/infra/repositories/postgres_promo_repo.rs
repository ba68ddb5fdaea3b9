use crate::domain::{models::promo::{NewPromoCode, PromoCode}, ports::PromoCodeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresPromoRepo {
    pool: PgPool,
}

impl PostgresPromoRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromoCodeRepository for PostgresPromoRepo {
    async fn insert_if_absent(&self, promo: &NewPromoCode) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO promo_codes (code, discount_type, value, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT DO NOTHING"
        )
            .bind(&promo.code).bind(&promo.discount_type).bind(promo.value)
            .bind(promo.is_active).bind(Utc::now())
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() == 1)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, AppError> {
        sqlx::query_as::<_, PromoCode>("SELECT * FROM promo_codes WHERE LOWER(code) = LOWER($1)")
            .bind(code).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
