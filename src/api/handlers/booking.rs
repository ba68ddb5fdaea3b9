use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateBookingRequest, QuoteRequest},
    responses::{ApiResponse, BookingConfirmation},
};
use crate::api::extractors::json::ApiJson;
use crate::domain::services::{pricing, promotion, reservation::parse_quantity};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let request = payload.into_reservation_request()?;
    info!("create_booking: slot {} qty {}", request.slot_id, request.quantity);

    let booking = state.reservation_service.reserve(request).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(BookingConfirmation {
            ref_id: booking.ref_id,
            message: "Booking confirmed successfully".to_string(),
            total_amount: booking.total_amount,
        }),
    ))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(ref_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_ref(&ref_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(ApiResponse::ok(booking))
}

pub async fn quote_checkout(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<QuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(slot_id), Some(quantity)) = (payload.slot_id, payload.quantity) else {
        return Err(AppError::Validation("Missing required fields".into()));
    };
    let quantity = parse_quantity(quantity)?;

    let slot = state.slot_repo.find_by_id(slot_id).await?
        .ok_or(AppError::NotFound("Slot not found".into()))?;
    let experience = state.experience_repo.find_by_id(&slot.experience_id).await?
        .ok_or(AppError::NotFound("Experience not found".into()))?;

    let discount = match promotion::normalize_code(payload.promo_code.as_deref()) {
        Some(code) => {
            let found = state.promo_repo.find_by_code(&code).await?;
            Some(promotion::discount_for_booking(found)?.1)
        }
        None => None,
    };

    let quote = pricing::quote(experience.price, quantity, state.config.taxes, discount.as_ref())?;
    Ok(ApiResponse::ok(quote))
}
