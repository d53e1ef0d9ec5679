use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetSourceError {
    #[error("Failed to fetch spreadsheet metadata")]
    FailedToFetchMetadata,
    #[error("Failed to fetch tab '{0}'")]
    FailedToFetchTab(String),
}

/// Read side of the spreadsheet the gateway aggregates over.
#[async_trait::async_trait]
pub trait SheetSource: Send + Sync {
    /// Titles of every tab, in workbook order.
    async fn tab_names(&self) -> error_stack::Result<Vec<String>, SheetSourceError>;

    /// The bounded cell grid of one tab, header row first.
    async fn tab_rows(&self, tab: &str) -> error_stack::Result<Vec<Vec<String>>, SheetSourceError>;
}

#[cfg(test)]
pub(crate) mod in_memory {
    use error_stack::report;

    use super::{SheetSource, SheetSourceError};

    /// Fixed workbook used by aggregation and HTTP tests.
    #[derive(Debug, Default, Clone)]
    pub struct InMemorySheetSource {
        tabs: Vec<(String, Vec<Vec<String>>)>,
        failing_tab: Option<String>,
        metadata_fails: bool,
    }

    impl InMemorySheetSource {
        pub fn with_tab(mut self, name: &str, rows: &[&[&str]]) -> Self {
            let rows = rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect();
            self.tabs.push((name.to_string(), rows));
            self
        }

        pub fn failing_tab(mut self, name: &str) -> Self {
            self.failing_tab = Some(name.to_string());
            self
        }

        pub fn failing_metadata(mut self) -> Self {
            self.metadata_fails = true;
            self
        }
    }

    #[async_trait::async_trait]
    impl SheetSource for InMemorySheetSource {
        async fn tab_names(&self) -> error_stack::Result<Vec<String>, SheetSourceError> {
            if self.metadata_fails {
                return Err(report!(SheetSourceError::FailedToFetchMetadata)
                    .attach_printable("The caller does not have permission"));
            }
            Ok(self.tabs.iter().map(|(name, _)| name.clone()).collect())
        }

        async fn tab_rows(
            &self,
            tab: &str,
        ) -> error_stack::Result<Vec<Vec<String>>, SheetSourceError> {
            if self.failing_tab.as_deref() == Some(tab) {
                return Err(report!(SheetSourceError::FailedToFetchTab(tab.to_string())));
            }
            self.tabs
                .iter()
                .find(|(name, _)| name == tab)
                .map(|(_, rows)| rows.clone())
                .ok_or_else(|| report!(SheetSourceError::FailedToFetchTab(tab.to_string())))
        }
    }
}
