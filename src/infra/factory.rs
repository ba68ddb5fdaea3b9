use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::ports::BookingRepository;
use crate::domain::services::reservation::ReservationService;
use crate::error::AppError;
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_experience_repo::PostgresExperienceRepo,
    postgres_promo_repo::PostgresPromoRepo, postgres_slot_repo::PostgresSlotRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_experience_repo::SqliteExperienceRepo,
    sqlite_promo_repo::SqlitePromoRepo, sqlite_slot_repo::SqliteSlotRepo,
};

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let opts: PgConnectOptions = database_url.parse().map_err(AppError::Database)?;
        let opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_millis(config.reservation_timeout_ms))
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;
        Ok(postgres_state(config, pool))
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_millis(config.reservation_timeout_ms))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;
        Ok(sqlite_state(config, pool))
    }
}

pub fn sqlite_state(config: &Config, pool: SqlitePool) -> AppState {
    let booking_repo: Arc<dyn BookingRepository> = Arc::new(SqliteBookingRepo::new(pool.clone()));

    AppState {
        config: config.clone(),
        experience_repo: Arc::new(SqliteExperienceRepo::new(pool.clone())),
        slot_repo: Arc::new(SqliteSlotRepo::new(pool.clone())),
        promo_repo: Arc::new(SqlitePromoRepo::new(pool)),
        reservation_service: Arc::new(ReservationService::new(booking_repo.clone(), config)),
        booking_repo,
    }
}

pub fn postgres_state(config: &Config, pool: PgPool) -> AppState {
    let booking_repo: Arc<dyn BookingRepository> =
        Arc::new(PostgresBookingRepo::new(pool.clone(), config.reservation_timeout_ms));

    AppState {
        config: config.clone(),
        experience_repo: Arc::new(PostgresExperienceRepo::new(pool.clone())),
        slot_repo: Arc::new(PostgresSlotRepo::new(pool.clone())),
        promo_repo: Arc::new(PostgresPromoRepo::new(pool)),
        reservation_service: Arc::new(ReservationService::new(booking_repo.clone(), config)),
        booking_repo,
    }
}

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/postgres").run(pool).await?;
    Ok(())
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await?;
    Ok(())
}
