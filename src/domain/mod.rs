pub mod sheets;
pub mod transactions;
