use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::models::booking::{generate_ref_id, Booking, Customer, Reservation};
use crate::domain::ports::BookingRepository;
use crate::domain::services::promotion::normalize_code;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct ReservationRequest {
    pub slot_id: i64,
    pub quantity: i64,
    pub customer: Customer,
    /// What the checkout page displayed. Never charged; only compared.
    pub client_total: Decimal,
    pub promo_code: Option<String>,
}

pub fn parse_quantity(raw: i64) -> Result<i32, AppError> {
    i32::try_from(raw)
        .ok()
        .filter(|q| *q > 0)
        .ok_or(AppError::Validation("Quantity must be a positive integer".into()))
}

pub struct ReservationService {
    repo: Arc<dyn BookingRepository>,
    taxes: Decimal,
    timeout: Duration,
}

impl ReservationService {
    pub fn new(repo: Arc<dyn BookingRepository>, config: &Config) -> Self {
        Self {
            repo,
            taxes: config.taxes,
            timeout: Duration::from_millis(config.reservation_timeout_ms),
        }
    }

    pub async fn reserve(&self, request: ReservationRequest) -> Result<Booking, AppError> {
        let client_total = request.client_total;
        let mut reservation = self.prepare(request)?;
        // One deadline covers the first attempt and the retry.
        let deadline = Instant::now() + self.timeout;

        let booking = match self.attempt(&reservation, deadline).await {
            Err(AppError::Conflict(reason)) => {
                warn!("Reservation conflict on slot {} ({}), retrying once", reservation.slot_id, reason);
                reservation.ref_id = generate_ref_id();
                self.attempt(&reservation, deadline).await?
            }
            other => other?,
        };

        if booking.total_amount != client_total {
            warn!(
                ref_id = %booking.ref_id,
                client_total = %client_total,
                charged = %booking.total_amount,
                "Client total differs from server total; charging server total"
            );
        }

        info!("Booking confirmed: {} for slot {} (qty {})", booking.ref_id, booking.slot_id, booking.quantity);
        Ok(booking)
    }

    fn prepare(&self, request: ReservationRequest) -> Result<Reservation, AppError> {
        let quantity = parse_quantity(request.quantity)?;

        let name = request.customer.name.trim();
        let email = request.customer.email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(AppError::Validation("Missing required fields".into()));
        }

        if request.client_total.is_sign_negative() {
            return Err(AppError::Validation("Total must not be negative".into()));
        }

        Ok(Reservation {
            ref_id: generate_ref_id(),
            slot_id: request.slot_id,
            quantity,
            customer: Customer { name: name.to_string(), email: email.to_string() },
            promo_code: normalize_code(request.promo_code.as_deref()),
            taxes: self.taxes,
        })
    }

    // Dropping the repository future on timeout drops its open transaction, which rolls back.
    async fn attempt(&self, reservation: &Reservation, deadline: Instant) -> Result<Booking, AppError> {
        tokio::time::timeout_at(deadline, self.repo.reserve(reservation))
            .await
            .map_err(|_| AppError::Timeout)?
    }
}
