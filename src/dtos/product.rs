use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::product::{CatalogVariant, Product};

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: i64,
    pub image: String,
    #[serde(default)]
    pub available_colors: Vec<String>,
    pub description: Option<String>,
    pub is_catalog_ready: Option<bool>,
    pub catalog_variants: Option<Vec<CatalogVariantRequest>>,
}

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub image: Option<String>,
    pub available_colors: Option<Vec<String>>,
    pub description: Option<String>,
    pub is_catalog_ready: Option<bool>,
    pub catalog_variants: Option<Vec<CatalogVariantRequest>>,
}

/// Incoming catalog variant. The hex may be omitted, in which case it is
/// resolved from the color name via the local palette.
#[derive(Deserialize)]
pub struct CatalogVariantRequest {
    pub color_hex: Option<String>,
    pub color_name: String,
    pub image: String,
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub image: String,
    pub available_colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_catalog_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_variants: Option<Vec<CatalogVariant>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            image: p.image,
            available_colors: Some(p.available_colors),
            description: p.description,
            is_catalog_ready: p.is_catalog_ready,
            catalog_variants: p.catalog_variants.map(|j| j.0),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl ProductResponse {
    /// Catalog view: hides the raw color list, keeping only the rendered
    /// catalog variants.
    pub fn sanitized_for_catalog(mut self) -> Self {
        self.available_colors = None;
        self
    }
}
