use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use crate::domain::models::promo::{Discount, DiscountKind};
use crate::error::AppError;

const MONEY_DP: u32 = 2;

/// Largest amount a booking total column holds (NUMERIC(10, 2)).
pub const MAX_CHARGE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxes: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

pub fn subtotal(price: i64, quantity: i32) -> Decimal {
    Decimal::from(price) * Decimal::from(quantity)
}

/// Discount is always clamped into `[0, subtotal]`.
pub fn discount_amount(subtotal: Decimal, promo: Option<&Discount>) -> Decimal {
    let raw = match promo {
        None => Decimal::ZERO,
        Some(Discount { kind: DiscountKind::Percentage, value }) => subtotal * *value / Decimal::ONE_HUNDRED,
        Some(Discount { kind: DiscountKind::Flat, value }) => *value,
    };

    round_money(raw.clamp(Decimal::ZERO, subtotal.max(Decimal::ZERO)))
}

/// The customer always pays at least the tax component.
pub fn compute_total(subtotal: Decimal, taxes: Decimal, promo: Option<&Discount>) -> Result<Decimal, AppError> {
    let discount = discount_amount(subtotal, promo);
    let total = round_money(taxes.max(subtotal + taxes - discount));

    if total > MAX_CHARGE {
        return Err(AppError::Validation(format!(
            "Booking total {} exceeds the maximum of {}. Please reduce quantity.",
            total, MAX_CHARGE
        )));
    }
    Ok(total)
}

pub fn quote(price: i64, quantity: i32, taxes: Decimal, promo: Option<&Discount>) -> Result<Quote, AppError> {
    let subtotal = subtotal(price, quantity);
    Ok(Quote {
        subtotal,
        taxes,
        discount: discount_amount(subtotal, promo),
        total: compute_total(subtotal, taxes, promo)?,
    })
}
