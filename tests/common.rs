#![allow(dead_code)]

use experience_booking::{
    api::router::create_router,
    config::Config,
    domain::models::{
        experience::Experience,
        promo::NewPromoCode,
        slot::{NewSlot, Slot},
    },
    infra::factory::{run_sqlite_migrations, sqlite_state},
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

pub fn test_config(db_url: &str, timeout_ms: u64) -> Config {
    Config {
        database_url: db_url.to_string(),
        port: 0,
        frontend_url: "http://localhost:5173".to_string(),
        taxes: Decimal::from(59),
        reservation_timeout_ms: timeout_ms,
        seed_sample_data: false,
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_timeout(5_000).await
    }

    pub async fn with_timeout(timeout_ms: u64) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_millis(timeout_ms));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool).await.expect("Failed to migrate test db");

        let config = test_config(&db_url, timeout_ms);
        let state = Arc::new(sqlite_state(&config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn add_experience(&self, id: &str, title: &str, location: &str, price: i64) -> Experience {
        let experience = Experience::new(id, title, location, "Guided tour", price, "https://img.example.com/x.jpg");
        assert!(self.state.experience_repo.insert_if_absent(&experience).await.unwrap());
        experience
    }

    pub async fn add_slot(&self, experience_id: &str, days_ahead: i64, capacity: i32, booked: i32) -> Slot {
        self.state.slot_repo.create(&NewSlot {
            experience_id: experience_id.to_string(),
            start_time: Utc::now() + Duration::days(days_ahead),
            total_capacity: capacity,
            booked_count: booked,
        }).await.unwrap()
    }

    pub async fn add_promo(&self, code: &str, discount_type: &str, value: i64, is_active: bool) {
        self.state.promo_repo.insert_if_absent(&NewPromoCode {
            code: code.to_string(),
            discount_type: discount_type.to_string(),
            value: Decimal::from(value),
            is_active,
        }).await.unwrap();
    }

    pub async fn slot(&self, slot_id: i64) -> Slot {
        self.state.slot_repo.find_by_id(slot_id).await.unwrap().expect("slot exists")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router.clone().oneshot(
            Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> Response {
        self.router.clone().oneshot(
            Request::builder().method("POST").uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body)).unwrap()
        ).await.unwrap()
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
