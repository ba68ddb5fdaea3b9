use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

pub const REF_PREFIX: &str = "HUF";
const REF_SUFFIX_LEN: usize = 8;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub ref_id: String,
    pub slot_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub promo_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub name: String,
    pub email: String,
}

/// Everything a repository needs to run one reservation unit of work.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub ref_id: String,
    pub slot_id: i64,
    pub quantity: i32,
    pub customer: Customer,
    pub promo_code: Option<String>,
    pub taxes: Decimal,
}

pub fn generate_ref_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REF_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();

    format!("{}{}", REF_PREFIX, suffix)
}
