use axum::response::{Response, IntoResponse};
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use serde::Serialize;
use uuid::Uuid;
use crate::auth::jwt::verify_token;

#[derive(Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Serialize)]
struct ErrorBody { error: &'static str }

pub async fn require_auth(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let auth_header = match req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok()) {
        Some(h) => h,
        None => return permission_denied(),
    };

    // Expect "Bearer <token>"
    let token = match auth_header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return permission_denied(),
    };

    let secret = match std::env::var("JWT_SECRET") {
        Ok(s) => s,
        Err(_) => {
            tracing::error!("JWT_SECRET is not configured");
            return permission_denied();
        }
    };

    let claims = match verify_token(token, &secret) {
        Ok(c) => c,
        Err(_) => return permission_denied(),
    };

    req.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
        email: claims.email,
    });

    next.run(req).await
}

fn permission_denied() -> Response {
    let body = axum::Json(ErrorBody { error: "permission denied" });
    (StatusCode::UNAUTHORIZED, body).into_response()
}
