use axum::extract::State;
use uuid::Uuid;
use crate::dtos::expense::{CreateExpenseRequest, UpdateExpenseRequest, ExpenseResponse};
use crate::extract::{Json, Path};
use crate::models::expense::Expense;
use crate::state::AppState;
use crate::error::AppError;

const EXPENSE_COLUMNS: &str =
    "id, name, price, type, description, currency, created_at, updated_at";

// GET /expenses - List all expenses
pub async fn list_expenses(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<Vec<ExpenseResponse>>, AppError> {
    let expenses = sqlx::query_as::<_, Expense>(&format!(
        "SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY created_at"
    ))
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(expenses.into_iter().map(ExpenseResponse::from).collect()))
}

// GET /expenses/:id - Get single expense
pub async fn get_expense(
    Path(id): Path<Uuid>,
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let expense = sqlx::query_as::<_, Expense>(&format!(
        "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Expense not found"))?;

    Ok(Json(ExpenseResponse::from(expense)))
}

// POST /expenses - Create new expense
pub async fn create_expense(
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Name required"));
    }
    if payload.currency.trim().is_empty() {
        return Err(AppError::validation("Currency required"));
    }

    let expense = sqlx::query_as::<_, Expense>(&format!(
        "INSERT INTO expenses (id, name, price, type, description, currency)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {EXPENSE_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(&payload.name)
    .bind(payload.price)
    .bind(&payload.expense_type)
    .bind(&payload.description)
    .bind(&payload.currency)
    .fetch_one(&db_pool)
    .await?;

    Ok(Json(ExpenseResponse::from(expense)))
}

// PUT /expenses/:id - Update expense
pub async fn update_expense(
    Path(id): Path<Uuid>,
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<UpdateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let expense = sqlx::query_as::<_, Expense>(&format!(
        "UPDATE expenses SET
         name = COALESCE($1, name),
         price = COALESCE($2, price),
         type = COALESCE($3, type),
         description = COALESCE($4, description),
         currency = COALESCE($5, currency),
         updated_at = NOW()
         WHERE id = $6
         RETURNING {EXPENSE_COLUMNS}"
    ))
    .bind(payload.name)
    .bind(payload.price)
    .bind(payload.expense_type)
    .bind(payload.description)
    .bind(payload.currency)
    .bind(id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Expense not found"))?;

    Ok(Json(ExpenseResponse::from(expense)))
}

// DELETE /expenses/:id - Delete expense
pub async fn delete_expense(
    Path(id): Path<Uuid>,
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Expense not found"));
    }

    Ok(Json(serde_json::json!({ "deleted": id })))
}
