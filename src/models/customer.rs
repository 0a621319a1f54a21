use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub instagram_account: String,
    pub phone: Option<i64>,
    pub address: String,
    pub city: String,
    pub department: String,
    pub comments: String,
    pub cc: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
