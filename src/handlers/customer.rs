use axum::extract::State;
use uuid::Uuid;
use crate::dtos::customer::{CreateCustomerRequest, UpdateCustomerRequest, CustomerResponse};
use crate::extract::{Json, Path};
use crate::models::customer::Customer;
use crate::state::AppState;
use crate::error::AppError;

const CUSTOMER_COLUMNS: &str =
    "id, name, instagram_account, phone, address, city, department, comments, cc, created_at, updated_at";

// GET /customers - List all customers
pub async fn list_customers(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let customers = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY created_at"
    ))
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(customers.into_iter().map(CustomerResponse::from).collect()))
}

// GET /customers/:id - Get single customer
pub async fn get_customer(
    Path(id): Path<Uuid>,
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Customer not found"))?;

    Ok(Json(CustomerResponse::from(customer)))
}

// POST /customers - Create new customer
pub async fn create_customer(
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Name required"));
    }

    let customer = sqlx::query_as::<_, Customer>(&format!(
        "INSERT INTO customers (id, name, instagram_account, phone, address, city, department, comments, cc)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING {CUSTOMER_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(&payload.name)
    .bind(&payload.instagram_account)
    .bind(payload.phone)
    .bind(&payload.address)
    .bind(&payload.city)
    .bind(&payload.department)
    .bind(&payload.comments)
    .bind(&payload.cc)
    .fetch_one(&db_pool)
    .await
    .map_err(|e| {
        if let Some(db_err) = e.as_database_error() {
            if db_err.code().as_deref() == Some("23505") {
                return AppError::conflict("Instagram account already exists");
            }
        }
        AppError::db(e)
    })?;

    Ok(Json(CustomerResponse::from(customer)))
}

// PUT /customers/:id - Update customer
// Historical sales keep their snapshot; this only touches the customer row.
pub async fn update_customer(
    Path(id): Path<Uuid>,
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = sqlx::query_as::<_, Customer>(&format!(
        "UPDATE customers SET
         name = COALESCE($1, name),
         instagram_account = COALESCE($2, instagram_account),
         phone = COALESCE($3, phone),
         address = COALESCE($4, address),
         city = COALESCE($5, city),
         department = COALESCE($6, department),
         comments = COALESCE($7, comments),
         cc = COALESCE($8, cc),
         updated_at = NOW()
         WHERE id = $9
         RETURNING {CUSTOMER_COLUMNS}"
    ))
    .bind(payload.name)
    .bind(payload.instagram_account)
    .bind(payload.phone)
    .bind(payload.address)
    .bind(payload.city)
    .bind(payload.department)
    .bind(payload.comments)
    .bind(payload.cc)
    .bind(id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Customer not found"))?;

    Ok(Json(CustomerResponse::from(customer)))
}

// DELETE /customers/:id - Delete customer
pub async fn delete_customer(
    Path(id): Path<Uuid>,
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Customer not found"));
    }

    Ok(Json(serde_json::json!({ "deleted": id })))
}
