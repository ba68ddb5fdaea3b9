use crate::domain::{
    models::{booking::{Booking, Reservation}, promo::PromoCode},
    ports::BookingRepository,
    services::{pricing, promotion},
};
use crate::error::AppError;
use super::{abort, classify_tx_error};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresBookingRepo {
    pool: PgPool,
    lock_timeout_ms: u64,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool, lock_timeout_ms: u64) -> Self {
        Self { pool, lock_timeout_ms }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn reserve(&self, reservation: &Reservation) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(classify_tx_error)?;

        sqlx::query("SELECT set_config('lock_timeout', $1, true)")
            .bind(format!("{}ms", self.lock_timeout_ms))
            .execute(&mut *tx).await.map_err(classify_tx_error)?;

        // Row lock on this slot only; reservations on other slots proceed in parallel.
        let slot = sqlx::query_as::<_, (i32, i32, i64)>(
            "SELECT s.total_capacity, s.booked_count, e.price
             FROM slots s JOIN experiences e ON e.id = s.experience_id
             WHERE s.id = $1
             FOR UPDATE OF s"
        )
            .bind(reservation.slot_id)
            .fetch_optional(&mut *tx).await.map_err(classify_tx_error)?;

        let Some((total_capacity, booked_count, price)) = slot else {
            return Err(abort(tx, AppError::NotFound("Slot not found".into())).await);
        };

        let available = i64::from(total_capacity) - i64::from(booked_count);
        if i64::from(reservation.quantity) > available {
            return Err(abort(tx, AppError::CapacityExceeded { available }).await);
        }

        let promo = match &reservation.promo_code {
            Some(code) => {
                let found = sqlx::query_as::<_, PromoCode>("SELECT * FROM promo_codes WHERE LOWER(code) = LOWER($1)")
                    .bind(code)
                    .fetch_optional(&mut *tx).await.map_err(classify_tx_error)?;
                match promotion::discount_for_booking(found) {
                    Ok(resolved) => Some(resolved),
                    Err(e) => return Err(abort(tx, e).await),
                }
            }
            None => None,
        };

        let subtotal = pricing::subtotal(price, reservation.quantity);
        let total = match pricing::compute_total(subtotal, reservation.taxes, promo.as_ref().map(|(_, d)| d)) {
            Ok(total) => total,
            Err(e) => return Err(abort(tx, e).await),
        };

        sqlx::query("UPDATE slots SET booked_count = booked_count + $1 WHERE id = $2")
            .bind(reservation.quantity).bind(reservation.slot_id)
            .execute(&mut *tx).await.map_err(classify_tx_error)?;

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (ref_id, slot_id, user_name, user_email, quantity, total_amount, promo_code, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *"
        )
            .bind(&reservation.ref_id).bind(reservation.slot_id)
            .bind(&reservation.customer.name).bind(&reservation.customer.email)
            .bind(reservation.quantity).bind(total)
            .bind(promo.map(|(p, _)| p.code)).bind(Utc::now())
            .fetch_one(&mut *tx).await.map_err(classify_tx_error)?;

        tx.commit().await.map_err(classify_tx_error)?;
        Ok(created)
    }

    async fn find_by_ref(&self, ref_id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE ref_id = $1")
            .bind(ref_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_slot(&self, slot_id: i64) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE slot_id = $1 ORDER BY id ASC")
            .bind(slot_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
