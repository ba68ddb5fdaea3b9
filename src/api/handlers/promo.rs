use axum::{extract::State, response::IntoResponse};
use crate::state::AppState;
use crate::api::dtos::{requests::ValidatePromoRequest, responses::ApiResponse};
use crate::api::extractors::json::ApiJson;
use crate::domain::services::promotion::{ensure_active, normalize_code};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn validate_promo(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<ValidatePromoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let code = normalize_code(payload.code.as_deref())
        .ok_or(AppError::Validation("Promo code is required".into()))?;

    let promo = ensure_active(state.promo_repo.find_by_code(&code).await?)?;

    info!("Promo code validated: {}", promo.code);
    Ok(ApiResponse::ok(promo))
}
