use error_stack::ResultExt;
use tracing::instrument;

use crate::domain::sheets::a1_notation::A1Notation;
use crate::ports::sheet_source::{SheetSource, SheetSourceError};

use super::{
    cells::IntoStringRows,
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
};

pub trait SpreadsheetRead {
    /// Cell grid of `range`, one inner vector per row. Ranges without values
    /// read as an empty grid.
    fn read_range(
        &self,
        range: &str,
    ) -> impl std::future::Future<
        Output = error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError>,
    > + Send;
}

impl SpreadsheetRead for SpreadsheetManager {
    #[instrument(skip(self))]
    async fn read_range(
        &self,
        range: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError> {
        let response = self
            .hub()
            .await?
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        Ok(response.1.values.unwrap_or_default().into_string_rows())
    }
}

#[async_trait::async_trait]
impl SheetSource for SpreadsheetManager {
    async fn tab_names(&self) -> error_stack::Result<Vec<String>, SheetSourceError> {
        SpreadsheetManager::tab_names(self)
            .await
            .change_context(SheetSourceError::FailedToFetchMetadata)
    }

    async fn tab_rows(&self, tab: &str) -> error_stack::Result<Vec<Vec<String>>, SheetSourceError> {
        self.read_range(A1Notation::tab(tab).as_ref())
            .await
            .change_context_lazy(|| SheetSourceError::FailedToFetchTab(tab.to_string()))
    }
}
