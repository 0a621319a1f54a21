pub mod user;
pub mod customer;
pub mod product;
pub mod sale;
pub mod expense;
pub mod earnings;
