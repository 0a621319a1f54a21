use axum::{
    routing::{get, post},
    Router,
};
use crate::state::AppState;
use crate::handlers::user;
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/users", get(user::list_users))
        .route_layer(axum::middleware::from_fn(require_auth));

    // Registration and login stay open
    Router::new()
        .route("/user", post(user::create_user))
        .route("/login", post(user::login))
        .merge(protected)
}
