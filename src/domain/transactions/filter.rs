/// Decides which data rows of a tab become result entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFilter {
    /// Rows with at least one non-empty cell.
    NonEmpty,
    /// Rows with a non-empty cell containing the keyword, case-sensitive.
    /// An empty keyword is not special-cased and matches like `NonEmpty`.
    Keyword(String),
}

impl RowFilter {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        RowFilter::Keyword(keyword.into())
    }

    /// Scans every cell of the row, including the time and case-name columns.
    pub fn matches(&self, row: &[String]) -> bool {
        match self {
            RowFilter::NonEmpty => row.iter().any(|cell| !cell.is_empty()),
            RowFilter::Keyword(keyword) => row
                .iter()
                .any(|cell| !cell.is_empty() && cell.contains(keyword.as_str())),
        }
    }
}
