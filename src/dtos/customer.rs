use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::customer::Customer;

#[derive(Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub instagram_account: String,
    pub phone: Option<i64>,
    pub address: String,
    pub city: String,
    pub department: String,
    pub comments: String,
    #[serde(default)]
    pub cc: String,
}

#[derive(Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub instagram_account: Option<String>,
    pub phone: Option<i64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub department: Option<String>,
    pub comments: Option<String>,
    pub cc: Option<String>,
}

#[derive(Serialize)]
pub struct CustomerResponse {
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

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            instagram_account: c.instagram_account,
            phone: c.phone,
            address: c.address,
            city: c.city,
            department: c.department,
            comments: c.comments,
            cc: c.cc,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
