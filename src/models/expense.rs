use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    #[sqlx(rename = "type")]
    pub expense_type: String,
    pub description: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
