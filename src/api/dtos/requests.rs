use rust_decimal::Decimal;
use serde::Deserialize;
use crate::domain::models::booking::Customer;
use crate::domain::services::reservation::ReservationRequest;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct CustomerPayload {
    pub name: Option<String>,
    pub email: Option<String>,
}

// Every field is optional so a missing one becomes our own 400, not a serde rejection.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub slot_id: Option<i64>,
    pub quantity: Option<i64>,
    pub user: Option<CustomerPayload>,
    pub total: Option<Decimal>,
    pub promo_code: Option<String>,
}

impl CreateBookingRequest {
    pub fn into_reservation_request(self) -> Result<ReservationRequest, AppError> {
        let missing = || AppError::Validation("Missing required fields".into());
        let user = self.user.ok_or_else(missing)?;

        Ok(ReservationRequest {
            slot_id: self.slot_id.ok_or_else(missing)?,
            quantity: self.quantity.ok_or_else(missing)?,
            customer: Customer {
                name: user.name.ok_or_else(missing)?,
                email: user.email.ok_or_else(missing)?,
            },
            client_total: self.total.ok_or_else(missing)?,
            promo_code: self.promo_code,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub slot_id: Option<i64>,
    pub quantity: Option<i64>,
    pub promo_code: Option<String>,
}

#[derive(Deserialize)]
pub struct ValidatePromoRequest {
    pub code: Option<String>,
}
