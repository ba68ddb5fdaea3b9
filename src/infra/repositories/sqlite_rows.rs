use std::str::FromStr;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row};
use crate::domain::models::{booking::Booking, promo::PromoCode};

// SQLite has no exact numeric type, so money columns are stored as TEXT.
pub(crate) fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn booking_from_row(row: SqliteRow) -> Result<Booking, sqlx::Error> {
    Ok(Booking {
        id: row.try_get("id")?,
        ref_id: row.try_get("ref_id")?,
        slot_id: row.try_get("slot_id")?,
        user_name: row.try_get("user_name")?,
        user_email: row.try_get("user_email")?,
        quantity: row.try_get("quantity")?,
        total_amount: decimal_column(&row, "total_amount")?,
        promo_code: row.try_get("promo_code")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn promo_from_row(row: SqliteRow) -> Result<PromoCode, sqlx::Error> {
    Ok(PromoCode {
        id: row.try_get("id")?,
        code: row.try_get("code")?,
        discount_type: row.try_get("discount_type")?,
        value: decimal_column(&row, "value")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
    })
}
