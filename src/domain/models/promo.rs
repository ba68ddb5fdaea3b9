use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use crate::error::AppError;

pub const PERCENTAGE: &str = "percentage";
pub const FLAT: &str = "flat";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    pub id: i64,
    pub code: String,
    pub discount_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    Percentage,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discount {
    pub kind: DiscountKind,
    pub value: Decimal,
}

impl PromoCode {
    pub fn discount(&self) -> Result<Discount, AppError> {
        let kind = match self.discount_type.as_str() {
            PERCENTAGE => DiscountKind::Percentage,
            FLAT => DiscountKind::Flat,
            other => return Err(AppError::InternalWithMsg(format!("Unknown discount type '{}' on promo {}", other, self.code))),
        };
        Ok(Discount { kind, value: self.value })
    }
}

pub struct NewPromoCode {
    pub code: String,
    pub discount_type: String,
    pub value: Decimal,
    pub is_active: bool,
}
