use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use crate::domain::models::{experience::Experience, slot::Slot};

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self { success: true, data })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub id: i64,
    pub experience_id: String,
    pub start_time: DateTime<Utc>,
    pub total_capacity: i32,
    pub booked_count: i32,
    pub available: i64,
    pub sold_out: bool,
}

impl From<Slot> for SlotView {
    fn from(slot: Slot) -> Self {
        Self {
            available: slot.available().max(0),
            sold_out: slot.is_sold_out(),
            id: slot.id,
            experience_id: slot.experience_id,
            start_time: slot.start_time,
            total_capacity: slot.total_capacity,
            booked_count: slot.booked_count,
        }
    }
}

#[derive(Serialize)]
pub struct ExperienceDetail {
    #[serde(flatten)]
    pub experience: Experience,
    pub slots: Vec<SlotView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub ref_id: String,
    pub message: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}
