use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::application::auth::AuthError;

use super::{
    api_error::{ApiError, INVALID_TOKEN, MISSING_TOKEN},
    state::AppState,
};

/// Token of an `Authorization: Bearer <token>` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Rejects requests without a valid token; the decoded claims are handed on as
/// a request extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match state.auth.verify(bearer_token(request.headers())) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(AuthError::MissingToken) => Err(ApiError::Unauthorized(MISSING_TOKEN)),
        Err(err) => {
            tracing::debug!("Rejected token: {}", err);
            Err(ApiError::Unauthorized(INVALID_TOKEN))
        }
    }
}
