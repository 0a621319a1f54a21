use axum::extract::State;
use chrono::Utc;
use sqlx::types::Json as SqlJson;
use tracing::instrument;
use uuid::Uuid;
use crate::dtos::product::{
    CreateProductRequest, UpdateProductRequest, CatalogVariantRequest, ProductResponse,
};
use crate::extract::{Json, Path};
use crate::models::color::color_from_label;
use crate::models::product::{CatalogVariant, Product};
use crate::state::AppState;
use crate::error::AppError;

const PRODUCT_COLUMNS: &str =
    "id, name, price, image, available_colors, description, is_catalog_ready, \
     catalog_variants, created_at, updated_at";

/// Assigns ids and timestamps to incoming catalog variants, resolving a
/// missing hex from the color name.
fn process_catalog_variants(requests: Vec<CatalogVariantRequest>) -> Vec<CatalogVariant> {
    let now = Utc::now();
    requests
        .into_iter()
        .map(|req| {
            let color_hex = match req.color_hex {
                Some(hex) if !hex.is_empty() => hex,
                _ => color_from_label(&req.color_name).0.to_string(),
            };
            CatalogVariant {
                id: Uuid::new_v4(),
                color_hex,
                color_name: req.color_name,
                image: req.image,
                created_at: now,
                updated_at: now,
            }
        })
        .collect()
}

// GET /products - List all products
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at"
    ))
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

// GET /products/:id - Get single product
#[instrument(skip(state), fields(%id))]
pub async fn get_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// POST /products - Create new product
// The image field is an opaque stored-asset reference; upload happens upstream.
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Name required"));
    }
    if payload.price < 0 {
        return Err(AppError::validation("Price cannot be negative"));
    }

    let catalog_variants = payload
        .catalog_variants
        .filter(|v| !v.is_empty())
        .map(|v| SqlJson(process_catalog_variants(v)));

    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products
         (id, name, price, image, available_colors, description, is_catalog_ready, catalog_variants)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(&payload.name)
    .bind(payload.price)
    .bind(&payload.image)
    .bind(&payload.available_colors)
    .bind(&payload.description)
    .bind(payload.is_catalog_ready.unwrap_or(false))
    .bind(catalog_variants)
    .fetch_one(&state.db_pool)
    .await?;

    Ok(Json(ProductResponse::from(product)))
}

// PUT /products/:id - Update product
#[instrument(skip(state, payload), fields(%id))]
pub async fn update_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    if let Some(price) = payload.price {
        if price < 0 {
            return Err(AppError::validation("Price cannot be negative"));
        }
    }

    // A provided list replaces the stored variants wholesale
    let catalog_variants = payload
        .catalog_variants
        .map(|v| SqlJson(process_catalog_variants(v)));

    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE products SET
         name = COALESCE($1, name),
         price = COALESCE($2, price),
         image = COALESCE($3, image),
         available_colors = COALESCE($4, available_colors),
         description = COALESCE($5, description),
         is_catalog_ready = COALESCE($6, is_catalog_ready),
         catalog_variants = COALESCE($7, catalog_variants),
         updated_at = NOW()
         WHERE id = $8
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(payload.name)
    .bind(payload.price)
    .bind(payload.image)
    .bind(payload.available_colors)
    .bind(payload.description)
    .bind(payload.is_catalog_ready)
    .bind(catalog_variants)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/:id - Delete product
#[instrument(skip(state), fields(%id))]
pub async fn delete_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product not found"));
    }

    Ok(Json(serde_json::json!({ "deleted": id })))
}

// GET /catalog - Catalog-ready products, newest first, color list stripped
pub async fn list_catalog_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products
         WHERE is_catalog_ready = TRUE ORDER BY created_at DESC"
    ))
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(
        products
            .into_iter()
            .map(|p| ProductResponse::from(p).sanitized_for_catalog())
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_get_ids_and_resolved_hex() {
        let variants = process_catalog_variants(vec![
            CatalogVariantRequest {
                color_hex: None,
                color_name: "Rojo".to_string(),
                image: "rojo.jpg".to_string(),
            },
            CatalogVariantRequest {
                color_hex: Some("#123456".to_string()),
                color_name: "Personalizado".to_string(),
                image: "custom.jpg".to_string(),
            },
        ]);

        assert_eq!(variants.len(), 2);
        assert!(!variants[0].id.is_nil());
        assert_eq!(variants[0].color_hex, "#a42222");
        assert_eq!(variants[1].color_hex, "#123456");
    }
}
