use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl Experience {
    pub fn new(id: &str, title: &str, location: &str, description: &str, price: i64, image_url: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            location: location.to_string(),
            description: description.to_string(),
            price,
            image_url: image_url.to_string(),
            created_at: Utc::now(),
        }
    }
}
