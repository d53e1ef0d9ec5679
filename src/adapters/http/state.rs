use std::sync::Arc;

use crate::application::{auth::AuthService, transactions::TransactionService};

#[derive(Clone, Debug)]
pub struct AppState {
    pub transactions: Arc<TransactionService>,
    pub auth: Arc<AuthService>,
    /// Echoed on the landing page.
    pub spreadsheet_id: Arc<str>,
}
