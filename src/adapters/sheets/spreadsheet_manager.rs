use error_stack::{report, ResultExt};
use google_sheets4::{
    api::{SheetProperties, ValueRange},
    hyper, hyper_rustls, Sheets,
};
use std::fmt::Debug;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::instrument;

use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::domain::sheets::a1_notation::A1Notation;

use super::{auth, http_client};

pub type SheetsHub = Sheets<hyper_rustls::HttpsConnector<hyper::client::HttpConnector>>;

/// Google Sheets client for one spreadsheet. The hub is created on first use,
/// so a missing key only fails the requests that need it.
pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    hub: OnceCell<SheetsHub>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SpreadsheetManager {{ spreadsheet_id: {}, connected: {} }}",
            self.config.spreadsheet_id,
            self.hub.initialized()
        )
    }
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Failed to authenticate with Google")]
    FailedToAuthenticate,
    #[error("Failed to fetch spreadsheet metadata")]
    FailedToFetchMetadata,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
    #[error("Failed to append row")]
    FailedToAppendRow,
    #[error("Failed to delete row")]
    FailedToDeleteRow,
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),
    #[error("No row with id '{0}'")]
    RowNotFound(String),
    #[error("Missing required columns: {0:?}")]
    MissingRequiredColumns(Vec<String>),
}

impl SpreadsheetManager {
    pub fn new(config: SpreadsheetConfig) -> Self {
        SpreadsheetManager {
            config,
            hub: OnceCell::new(),
        }
    }

    #[instrument(name = "SpreadsheetManager::hub", skip(self))]
    pub(super) async fn hub(&self) -> error_stack::Result<&SheetsHub, SpreadsheetManagerError> {
        self.hub
            .get_or_try_init(|| async {
                let client = http_client::http_client();
                let auth = auth::auth(&self.config, client.clone()).await?;
                tracing::info!("Connected to spreadsheet {}", self.config.spreadsheet_id);
                Ok::<_, error_stack::Report<SpreadsheetManagerError>>(Sheets::new(client, auth))
            })
            .await
    }

    #[instrument(skip(self))]
    async fn sheet_properties(
        &self,
    ) -> error_stack::Result<Vec<SheetProperties>, SpreadsheetManagerError> {
        let response = self
            .hub()
            .await?
            .spreadsheets()
            .get(&self.config.spreadsheet_id)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchMetadata)?;

        let sheets = response
            .1
            .sheets
            .ok_or(report!(SpreadsheetManagerError::FailedToFetchMetadata))
            .attach_printable("Sheets not present in spreadsheet response")?;

        Ok(sheets
            .into_iter()
            .filter_map(|sheet| sheet.properties)
            .collect())
    }

    /// Titles of every tab, in workbook order.
    #[instrument(skip(self))]
    pub async fn tab_names(&self) -> error_stack::Result<Vec<String>, SpreadsheetManagerError> {
        Ok(self
            .sheet_properties()
            .await?
            .into_iter()
            .filter_map(|properties| properties.title)
            .collect())
    }

    /// Numeric id of the tab titled `title`, as needed by structural updates.
    #[instrument(skip(self))]
    pub async fn sheet_id(&self, title: &str) -> error_stack::Result<i32, SpreadsheetManagerError> {
        self.sheet_properties()
            .await?
            .into_iter()
            .find(|properties| properties.title.as_deref() == Some(title))
            .and_then(|properties| properties.sheet_id)
            .ok_or_else(|| report!(SpreadsheetManagerError::SheetNotFound(title.to_string())))
    }

    #[instrument(skip(self, value_range))]
    pub(super) async fn write_range(
        &self,
        range_str: &A1Notation,
        value_range: ValueRange,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.hub()
            .await?
            .spreadsheets()
            .values_update(value_range, &self.config.spreadsheet_id, range_str.as_ref())
            .value_input_option("USER_ENTERED")
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToWriteRange)
            .attach_printable_lazy(|| format!("Failed to write to range {} ", range_str))
    }
}
