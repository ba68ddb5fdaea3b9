use std::env;
use std::str::FromStr;
use rust_decimal::Decimal;
use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub frontend_url: String,
    pub taxes: Decimal, // flat per-booking tax, currency units
    pub reservation_timeout_ms: u64,
    pub seed_sample_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| AppError::Config("DATABASE_URL must be set".into()))?,
            port: parse_var("PORT", 5000)?,
            frontend_url: env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string()),
            taxes: parse_var("TAXES", Decimal::from(59))?,
            reservation_timeout_ms: parse_var("RESERVATION_TIMEOUT_MS", 5000)?,
            seed_sample_data: parse_var("SEED_SAMPLE_DATA", false)?,
        })
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", key, raw))),
        Err(_) => Ok(default),
    }
}
