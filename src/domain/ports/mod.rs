use crate::domain::models::{
    experience::Experience,
    slot::{NewSlot, Slot},
    promo::{NewPromoCode, PromoCode},
    booking::{Booking, Reservation},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    async fn insert_if_absent(&self, experience: &Experience) -> Result<bool, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Experience>, AppError>;
    async fn search(&self, term: Option<&str>) -> Result<Vec<Experience>, AppError>;
}

#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn create(&self, slot: &NewSlot) -> Result<Slot, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Slot>, AppError>;
    async fn list_by_experience(&self, experience_id: &str) -> Result<Vec<Slot>, AppError>;
}

#[async_trait]
pub trait PromoCodeRepository: Send + Sync {
    async fn insert_if_absent(&self, promo: &NewPromoCode) -> Result<bool, AppError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Runs the whole reservation as one transaction: exclusive read of the slot's
    /// capacity, promo re-validation, server-side total, increment and insert.
    /// Any error leaves the slot and the bookings table untouched.
    async fn reserve(&self, reservation: &Reservation) -> Result<Booking, AppError>;
    async fn find_by_ref(&self, ref_id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_slot(&self, slot_id: i64) -> Result<Vec<Booking>, AppError>;
}
