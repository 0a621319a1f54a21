use axum::{
    routing::get,
    Router,
};
use crate::state::AppState;
use crate::handlers::customer;
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(customer::list_customers).post(customer::create_customer))
        .route(
            "/customers/{id}",
            get(customer::get_customer)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        )
        .route_layer(axum::middleware::from_fn(require_auth))
}
