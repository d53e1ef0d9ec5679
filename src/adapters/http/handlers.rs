use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::application::auth::{AuthError, IssuedToken};
use crate::domain::transactions::entry::SearchResults;

use super::{
    api_error::{ApiError, LIST_FAILED, LOGIN_FAILED, SEARCH_FAILED},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Landing {
    pub message: &'static str,
    pub sheet_id: String,
    pub endpoints: Vec<EndpointDoc>,
}

pub async fn landing(State(state): State<AppState>) -> Json<Landing> {
    Json(Landing {
        message: "Google Sheets 商品 API",
        sheet_id: state.spreadsheet_id.to_string(),
        endpoints: vec![
            EndpointDoc {
                method: "GET",
                path: "/api/transactions",
                description: "取得所有記帳資料",
            },
            EndpointDoc {
                method: "GET",
                path: "/api/transactions/:keyword",
                description: "查詢專案",
            },
        ],
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Unparseable JSON is a 400. Any other body problem, such as a missing body
/// or fields of the wrong type, counts as empty credentials.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<IssuedToken>, ApiError> {
    let credentials = match body {
        Ok(Json(credentials)) => credentials,
        Err(JsonRejection::JsonSyntaxError(err)) => {
            return Err(ApiError::BadRequest(err.body_text()))
        }
        Err(_) => LoginRequest::default(),
    };

    state
        .auth
        .login(credentials.username.as_deref(), credentials.password.as_deref())
        .map(Json)
        .map_err(|err| match err {
            AuthError::InvalidCredentials => ApiError::Unauthorized(LOGIN_FAILED),
            other => ApiError::Internal {
                message: LOGIN_FAILED,
                error: other.to_string(),
            },
        })
}

#[instrument(skip_all)]
pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<SearchResults>, ApiError> {
    state.transactions.list_all().await.map(Json).map_err(|report| {
        tracing::error!("Listing transactions failed: {:?}", report);
        ApiError::internal(LIST_FAILED, &report)
    })
}

#[instrument(skip(state))]
pub async fn search_transactions(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<SearchResults>, ApiError> {
    state
        .transactions
        .search(&keyword)
        .await
        .map(Json)
        .map_err(|report| {
            tracing::error!("Searching transactions failed: {:?}", report);
            ApiError::internal(SEARCH_FAILED, &report)
        })
}
