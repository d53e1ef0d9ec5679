use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    handlers::{landing, list_transactions, login, search_transactions},
    require_auth::require_auth,
    state::AppState,
};

pub fn build_router(state: AppState) -> Router {
    let transactions = Router::new()
        .route("/api/transactions", get(list_transactions))
        .route("/api/transactions/", get(list_transactions))
        .route("/api/transactions/:keyword", get(search_transactions))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(landing))
        .route("/auth/login", post(login))
        .merge(transactions)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
