use bcrypt::{hash, verify, DEFAULT_COST};
use axum::extract::State;
use uuid::Uuid;
use crate::dtos::user::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse};
use crate::auth::jwt::sign_token;
use crate::error::AppError;
use crate::extract::Json;
use crate::models::user::User;
use crate::state::AppState;

// POST /user - Register a staff account (open route)
pub async fn create_user(
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::validation("Email required"));
    }
    if payload.password.len() < 6 {
        return Err(AppError::validation("Password too short"));
    }

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, first_name, last_name, email, password_hash)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, first_name, last_name, email, password_hash, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&db_pool)
    .await
    .map_err(|e| {
        if let Some(db_err) = e.as_database_error() {
            if db_err.code().as_deref() == Some("23505") {
                return AppError::conflict("Email already registered");
            }
        }
        AppError::db(e)
    })?;

    Ok(Json(UserResponse::from(user)))
}

// POST /login - Exchange credentials for a bearer token
pub async fn login(
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::validation("Email required"));
    }
    if payload.password.is_empty() {
        return Err(AppError::validation("Password required"));
    }

    let user = sqlx::query_as::<_, User>(
        "SELECT id, first_name, last_name, email, password_hash, created_at
         FROM users WHERE email = $1",
    )
    .bind(&payload.email)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::unauthorized("permission denied"))?;

    let ok = verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;

    if !ok {
        return Err(AppError::unauthorized("permission denied"));
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::internal("JWT secret not configured"))?;

    let token = sign_token(user.id, &user.email, &secret)?;

    Ok(Json(LoginResponse {
        email: user.email,
        token,
    }))
}

// GET /users - List all staff accounts
pub async fn list_users(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, first_name, last_name, email, password_hash, created_at
         FROM users ORDER BY created_at",
    )
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
