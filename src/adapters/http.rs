pub mod api_error;
pub mod handlers;
pub mod require_auth;
pub mod router;
pub mod state;
