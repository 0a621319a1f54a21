use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Product-level catalog metadata. Not to be confused with a sale-time
/// product variation, which is a separate priced row in its own table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogVariant {
    pub id: Uuid,
    pub color_hex: String,
    pub color_name: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub image: String,
    pub available_colors: Vec<String>,
    pub description: Option<String>,
    pub is_catalog_ready: bool,
    pub catalog_variants: Option<Json<Vec<CatalogVariant>>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
