use crate::domain::models::promo::{Discount, PromoCode};
use crate::error::AppError;

// No single-use enforcement: a valid code can back any number of concurrent checkouts.
pub fn ensure_active(found: Option<PromoCode>) -> Result<PromoCode, AppError> {
    let promo = found.ok_or(AppError::NotFound("Invalid promo code".into()))?;

    if !promo.is_active {
        return Err(AppError::Inactive("This promo code has expired".into()));
    }

    Ok(promo)
}

/// At booking time an unknown code is a bad request, not a missing resource.
pub fn discount_for_booking(found: Option<PromoCode>) -> Result<(PromoCode, Discount), AppError> {
    let promo = ensure_active(found).map_err(|e| match e {
        AppError::NotFound(msg) => AppError::Validation(msg),
        other => other,
    })?;
    let discount = promo.discount()?;
    Ok((promo, discount))
}

pub fn normalize_code(code: Option<&str>) -> Option<String> {
    code.map(str::trim).filter(|c| !c.is_empty()).map(str::to_string)
}
