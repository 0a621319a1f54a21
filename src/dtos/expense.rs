use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::expense::Expense;

#[derive(Deserialize)]
pub struct CreateExpenseRequest {
    pub name: String,
    pub price: i64,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub description: String,
    pub currency: String,
}

#[derive(Deserialize)]
pub struct UpdateExpenseRequest {
    pub name: Option<String>,
    pub price: Option<i64>,
    #[serde(rename = "type")]
    pub expense_type: Option<String>,
    pub description: Option<String>,
    pub currency: Option<String>,
}

#[derive(Serialize)]
pub struct ExpenseResponse {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub description: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseResponse {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id,
            name: e.name,
            price: e.price,
            expense_type: e.expense_type,
            description: e.description,
            currency: e.currency,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
