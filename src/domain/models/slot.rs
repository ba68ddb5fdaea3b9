use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: i64,
    pub experience_id: String,
    pub start_time: DateTime<Utc>,
    pub total_capacity: i32,
    pub booked_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Slot {
    pub fn available(&self) -> i64 {
        i64::from(self.total_capacity) - i64::from(self.booked_count)
    }

    pub fn is_sold_out(&self) -> bool {
        self.available() <= 0
    }
}

pub struct NewSlot {
    pub experience_id: String,
    pub start_time: DateTime<Utc>,
    pub total_capacity: i32,
    pub booked_count: i32,
}
