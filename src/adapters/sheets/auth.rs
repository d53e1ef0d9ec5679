use error_stack::ResultExt;
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use google_sheets4::{hyper, hyper_rustls};

use crate::adapters::config::sheets_config::{ServiceAccountFields, SpreadsheetConfig};

use super::{http_client::HttpsClient, spreadsheet_manager::SpreadsheetManagerError};

const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Service account assembled from the individual `GOOGLE_SA_*` fields.
fn service_account_from_fields(
    fields: &ServiceAccountFields<'_>,
) -> error_stack::Result<oauth2::ServiceAccountKey, SpreadsheetManagerError> {
    let key = serde_json::json!({
        "type": fields.key_type,
        "project_id": fields.project_id,
        "private_key_id": fields.private_key_id,
        "private_key": fields.private_key,
        "client_email": fields.client_email,
        "client_id": fields.client_id,
        "token_uri": TOKEN_URI,
    });

    oauth2::parse_service_account_key(key.to_string())
        .change_context(SpreadsheetManagerError::FailedToAuthenticate)
        .attach_printable("Service account fields from the environment are invalid")
}

async fn service_account_key(
    config: &SpreadsheetConfig,
) -> error_stack::Result<oauth2::ServiceAccountKey, SpreadsheetManagerError> {
    if let Some(fields) = config.service_account.complete() {
        tracing::debug!("Using service account {}", fields.client_email);
        return service_account_from_fields(&fields);
    }

    let priv_key_path = config.priv_key.as_ref();
    oauth2::read_service_account_key(priv_key_path)
        .await
        .change_context(SpreadsheetManagerError::FailedToAuthenticate)
        .attach_printable_lazy(|| {
            format!("Could not read service account private key at '{}'", priv_key_path)
        })
}

pub async fn auth(
    config: &SpreadsheetConfig,
    client: HttpsClient,
) -> error_stack::Result<
    Authenticator<hyper_rustls::HttpsConnector<hyper::client::HttpConnector>>,
    SpreadsheetManagerError,
> {
    let secret = service_account_key(config).await?;

    oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context(SpreadsheetManagerError::FailedToAuthenticate)
        .attach_printable("Could not create an authenticator")
}
