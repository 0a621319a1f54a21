pub mod user;
pub mod customer;
pub mod product;
pub mod expense;
pub mod sale;
pub mod earnings;
