use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct InventoryItem {
    pub id: String,
    pub product_name: String,
    pub quantity: i32,
    pub expiration_date: Option<NaiveDate>,
    pub basket_type_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn new(
        product_name: String,
        quantity: i32,
        expiration_date: Option<NaiveDate>,
        basket_type_id: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            product_name,
            quantity,
            expiration_date,
            basket_type_id,
            created_at: now,
            updated_at: now,
        }
    }
}
