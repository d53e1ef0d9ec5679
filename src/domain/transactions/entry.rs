use serde::{Deserialize, Serialize};

use crate::domain::sheets::header::HeaderColumns;

use super::{filter::RowFilter, timeline};

/// Time value reported for rows of tabs without a date/time column.
pub const NO_DATE_PLACEHOLDER: &str = "未填日期";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultEntry {
    pub sheet: String,
    pub time: String,
    pub case_name: String,
    /// Every other cell of the row, in sheet order, blanks included.
    pub content: Vec<String>,
}

impl SearchResultEntry {
    pub fn from_row(sheet: &str, row: &[String], columns: HeaderColumns) -> Self {
        let cell = |index: usize| row.get(index).cloned().unwrap_or_default();

        let time = match columns.time {
            Some(index) => cell(index),
            None => NO_DATE_PLACEHOLDER.to_string(),
        };
        let case_name = columns.case_name.map(cell).unwrap_or_default();
        let content = row
            .iter()
            .enumerate()
            .filter(|(index, _)| !columns.is_reserved(*index))
            .map(|(_, value)| value.clone())
            .collect();

        SearchResultEntry {
            sheet: sheet.to_string(),
            time,
            case_name,
            content,
        }
    }
}

/// Entries of one tab, in row order. Tabs without at least a header and one
/// data row contribute nothing.
pub fn tab_entries(sheet: &str, rows: &[Vec<String>], filter: &RowFilter) -> Vec<SearchResultEntry> {
    let [header, data @ ..] = rows else {
        return Vec::new();
    };
    let columns = HeaderColumns::locate(header);

    data.iter()
        .filter(|row| filter.matches(row))
        .map(|row| SearchResultEntry::from_row(sheet, row, columns))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<SearchResultEntry>,
}

impl SearchResults {
    pub fn newest_first(entries: Vec<SearchResultEntry>) -> Self {
        SearchResults {
            results: timeline::sort_newest_first(entries),
        }
    }
}
