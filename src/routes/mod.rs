pub mod users;
pub mod customers;
pub mod products;
pub mod expenses;
pub mod sales;
pub mod earnings;

use axum::Router;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(users::routes())
        .merge(customers::routes())
        .merge(products::routes())
        .merge(expenses::routes())
        .merge(sales::routes())
        .merge(earnings::routes())
}
