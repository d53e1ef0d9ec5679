pub mod auth;
pub mod transactions;
