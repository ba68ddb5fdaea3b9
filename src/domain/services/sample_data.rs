use chrono::{Duration, NaiveTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::models::{
    experience::Experience,
    promo::{NewPromoCode, FLAT, PERCENTAGE},
    slot::NewSlot,
};
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_DESCRIPTION: &str = "Curated small-group experience. Certified guide. Safety first with gear included.";

// (id, title, location, price, image)
const EXPERIENCES: &[(&str, &str, &str, i64, &str)] = &[
    ("kayaking-udupi", "Kayaking", "Udupi", 999, "https://images.unsplash.com/photo-1544551763-46a013bb70d5?w=600&h=400&fit=crop"),
    ("nandi-hills-sunrise", "Nandi Hills Sunrise", "Bangalore", 899, "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=600&h=400&fit=crop"),
    ("coffee-trail", "Coffee Trail", "Coorg", 1299, "https://images.unsplash.com/photo-1447933601403-0c6688de566e?w=600&h=400&fit=crop"),
    ("kayaking-karnataka", "Kayaking", "Udupi, Karnataka", 999, "https://images.unsplash.com/photo-1502680390469-be75c86b636f?w=600&h=400&fit=crop"),
    ("boat-cruise", "Boat Cruise", "Sunderban", 999, "https://images.unsplash.com/photo-1544551763-46a013bb70d5?w=600&h=400&fit=crop"),
    ("bungee-jumping", "Bungee Jumping", "Manali", 999, "https://images.unsplash.com/photo-1469854523086-cc02fe5d8800?w=600&h=400&fit=crop"),
    ("coffee-trail-2", "Coffee Trail", "Coorg", 1299, "https://images.unsplash.com/photo-1447933601403-0c6688de566e?w=600&h=400&fit=crop"),
    ("scuba-diving-goa", "Scuba Diving", "Goa", 1499, "https://images.unsplash.com/photo-1559827260-dc66d52bef19?w=600&h=400&fit=crop"),
];

// (experience_id, days from today, hour, capacity, already booked)
const SLOTS: &[(&str, i64, u32, i32, i32)] = &[
    ("kayaking-udupi", 3, 7, 5, 1),
    ("kayaking-udupi", 3, 9, 5, 3),
    ("kayaking-udupi", 3, 11, 5, 0),
    ("kayaking-udupi", 3, 13, 5, 5),
    ("kayaking-udupi", 4, 9, 5, 0),
    ("kayaking-udupi", 5, 9, 5, 2),
    ("kayaking-udupi", 6, 9, 5, 0),
    ("coffee-trail", 12, 8, 8, 0),
    ("coffee-trail", 12, 14, 8, 2),
    ("coffee-trail", 13, 8, 8, 0),
    ("nandi-hills-sunrise", 6, 5, 10, 0),
    ("nandi-hills-sunrise", 7, 5, 10, 4),
    ("nandi-hills-sunrise", 8, 5, 10, 0),
    ("bungee-jumping", 9, 10, 6, 0),
    ("bungee-jumping", 9, 13, 6, 3),
    ("bungee-jumping", 10, 10, 6, 0),
    ("boat-cruise", 16, 9, 12, 0),
    ("boat-cruise", 16, 15, 12, 5),
    ("boat-cruise", 17, 9, 12, 0),
    ("kayaking-karnataka", 11, 7, 5, 0),
    ("kayaking-karnataka", 11, 9, 5, 0),
    ("coffee-trail-2", 21, 8, 8, 0),
    ("coffee-trail-2", 21, 14, 8, 0),
    ("scuba-diving-goa", 26, 8, 8, 2),
    ("scuba-diving-goa", 26, 13, 8, 5),
    ("scuba-diving-goa", 27, 8, 8, 0),
];

/// Loads the demo catalog. Safe to run on every start: existing experiences keep
/// their slots and existing promo codes are left alone.
pub async fn seed_sample_data(state: &AppState) -> Result<(), AppError> {
    let today = Utc::now().date_naive();
    let mut inserted = 0;

    for (id, title, location, price, image) in EXPERIENCES {
        let description = if *id == "kayaking-udupi" {
            format!("{} Helmet and Life jackets along with an expert will accompany in kayaking.", DEFAULT_DESCRIPTION)
        } else {
            DEFAULT_DESCRIPTION.to_string()
        };
        let experience = Experience::new(id, title, location, &description, *price, image);

        if !state.experience_repo.insert_if_absent(&experience).await? {
            continue;
        }
        inserted += 1;

        for (_, days, hour, capacity, booked) in SLOTS.iter().filter(|s| s.0 == *id) {
            let time = NaiveTime::from_hms_opt(*hour, 0, 0)
                .ok_or(AppError::InternalWithMsg(format!("Invalid sample slot hour {}", hour)))?;
            let start_time = (today + Duration::days(*days)).and_time(time).and_utc();

            state.slot_repo.create(&NewSlot {
                experience_id: id.to_string(),
                start_time,
                total_capacity: *capacity,
                booked_count: *booked,
            }).await?;
        }
    }

    let promos = [
        ("SAVE10", PERCENTAGE, Decimal::from(10), true),
        ("FLAT100", FLAT, Decimal::from(100), true),
        ("EXPIRED", FLAT, Decimal::from(50), false),
    ];
    for (code, discount_type, value, is_active) in promos {
        state.promo_repo.insert_if_absent(&NewPromoCode {
            code: code.to_string(),
            discount_type: discount_type.to_string(),
            value,
            is_active,
        }).await?;
    }

    info!("Sample data loaded ({} new experiences)", inserted);
    Ok(())
}
