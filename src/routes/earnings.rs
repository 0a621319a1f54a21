use axum::{
    routing::get,
    Router,
};
use crate::state::AppState;
use crate::handlers::earnings;
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/earnings", get(earnings::get_earnings))
        .route_layer(axum::middleware::from_fn(require_auth))
}
