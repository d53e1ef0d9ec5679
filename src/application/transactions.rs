use std::sync::Arc;

use error_stack::ResultExt;
use futures::future::try_join_all;
use thiserror::Error;
use tracing::instrument;

use crate::domain::transactions::{
    entry::{tab_entries, SearchResults},
    filter::RowFilter,
};
use crate::ports::sheet_source::SheetSource;

#[derive(Error, Debug)]
pub enum TransactionServiceError {
    #[error("Failed to read transactions from the spreadsheet")]
    ReadFailed,
}

/// Aggregates the rows of every tab into one newest-first result list.
pub struct TransactionService {
    source: Arc<dyn SheetSource>,
}

impl std::fmt::Debug for TransactionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionService")
            .field("source", &"<SheetSource>")
            .finish()
    }
}

impl TransactionService {
    pub fn new(source: Arc<dyn SheetSource>) -> Self {
        Self { source }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> error_stack::Result<SearchResults, TransactionServiceError> {
        self.collect(RowFilter::NonEmpty).await
    }

    #[instrument(skip(self))]
    pub async fn search(
        &self,
        keyword: &str,
    ) -> error_stack::Result<SearchResults, TransactionServiceError> {
        self.collect(RowFilter::keyword(keyword)).await
    }

    /// Fails as a whole if the metadata or any tab cannot be read.
    async fn collect(
        &self,
        filter: RowFilter,
    ) -> error_stack::Result<SearchResults, TransactionServiceError> {
        let tabs = self
            .source
            .tab_names()
            .await
            .change_context(TransactionServiceError::ReadFailed)?;
        tracing::info!("Spreadsheet tabs: {:?}", tabs);

        let fetches = tabs.iter().map(|tab| async move {
            self.source
                .tab_rows(tab)
                .await
                .map(|rows| (tab.as_str(), rows))
        });
        let tab_rows = try_join_all(fetches)
            .await
            .change_context(TransactionServiceError::ReadFailed)?;

        let entries = tab_rows
            .iter()
            .flat_map(|(tab, rows)| tab_entries(tab, rows, &filter))
            .collect::<Vec<_>>();
        tracing::debug!("Collected {} entries from {} tabs", entries.len(), tabs.len());

        Ok(SearchResults::newest_first(entries))
    }
}
