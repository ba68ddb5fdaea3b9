use crate::domain::{
    models::booking::{Booking, Reservation},
    ports::BookingRepository,
    services::{pricing, promotion},
};
use crate::error::AppError;
use super::{abort, classify_tx_error, sqlite_rows::{booking_from_row, promo_from_row}};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    // SQLite has no row locks. The conditional increment is the first statement of the
    // transaction, so it takes the database write lock and checks capacity atomically;
    // concurrent writers wait on busy_timeout until we commit or roll back.
    async fn reserve(&self, reservation: &Reservation) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(classify_tx_error)?;

        let claimed = sqlx::query(
            "UPDATE slots SET booked_count = booked_count + ?
             WHERE id = ? AND total_capacity - booked_count >= ?"
        )
            .bind(reservation.quantity).bind(reservation.slot_id).bind(reservation.quantity)
            .execute(&mut *tx).await.map_err(classify_tx_error)?;

        let slot = sqlx::query(
            "SELECT s.total_capacity, s.booked_count, e.price
             FROM slots s JOIN experiences e ON e.id = s.experience_id
             WHERE s.id = ?"
        )
            .bind(reservation.slot_id)
            .fetch_optional(&mut *tx).await.map_err(classify_tx_error)?;

        let Some(slot) = slot else {
            return Err(abort(tx, AppError::NotFound("Slot not found".into())).await);
        };

        if claimed.rows_affected() == 0 {
            let total: i64 = slot.try_get("total_capacity").map_err(classify_tx_error)?;
            let booked: i64 = slot.try_get("booked_count").map_err(classify_tx_error)?;
            return Err(abort(tx, AppError::CapacityExceeded { available: total - booked }).await);
        }

        let price: i64 = slot.try_get("price").map_err(classify_tx_error)?;

        let promo = match &reservation.promo_code {
            Some(code) => {
                let found = sqlx::query("SELECT * FROM promo_codes WHERE LOWER(code) = LOWER(?)")
                    .bind(code)
                    .try_map(promo_from_row)
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

        let created = sqlx::query(
            "INSERT INTO bookings (ref_id, slot_id, user_name, user_email, quantity, total_amount, promo_code, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&reservation.ref_id).bind(reservation.slot_id)
            .bind(&reservation.customer.name).bind(&reservation.customer.email)
            .bind(reservation.quantity).bind(total.to_string())
            .bind(promo.map(|(p, _)| p.code)).bind(Utc::now())
            .try_map(booking_from_row)
            .fetch_one(&mut *tx).await.map_err(classify_tx_error)?;

        tx.commit().await.map_err(classify_tx_error)?;
        Ok(created)
    }

    async fn find_by_ref(&self, ref_id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query("SELECT * FROM bookings WHERE ref_id = ?")
            .bind(ref_id)
            .try_map(booking_from_row)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_slot(&self, slot_id: i64) -> Result<Vec<Booking>, AppError> {
        sqlx::query("SELECT * FROM bookings WHERE slot_id = ? ORDER BY id ASC")
            .bind(slot_id)
            .try_map(booking_from_row)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
