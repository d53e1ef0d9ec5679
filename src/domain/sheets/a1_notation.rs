use std::fmt::Formatter;

use super::{column::Column, row::Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(pub String);

impl A1Notation {
    /// Whole columns `from:to` of a tab, e.g. `'2023'!A:Z`.
    pub fn columns(sheet_title: &str, from: Column, to: Column) -> Self {
        A1Notation(format!("{}!{}:{}", quote_sheet_title(sheet_title), from, to))
    }

    /// A single row between two columns, e.g. `'2023'!A5:F5`.
    pub fn row_span(sheet_title: &str, row: Row, from: Column, to: Column) -> Self {
        A1Notation(format!(
            "{}!{}{}:{}{}",
            quote_sheet_title(sheet_title),
            from,
            row,
            to,
            row
        ))
    }

    /// The bounded range read for every tab during aggregation.
    pub fn tab(sheet_title: &str) -> Self {
        A1Notation::columns(sheet_title, Column::FIRST, Column::TAB_LAST)
    }

    /// Tab title in front of the `!`, unquoted. `None` when the range names no tab.
    pub fn sheet_title(&self) -> Option<String> {
        let (title, _) = self.0.rsplit_once('!')?;
        let title = match title.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
            Some(quoted) => quoted.replace("''", "'"),
            None => title.to_string(),
        };
        (!title.is_empty()).then_some(title)
    }
}

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<A1Notation> for String {
    fn from(a1_notation: A1Notation) -> Self {
        a1_notation.0
    }
}

impl From<String> for A1Notation {
    fn from(s: String) -> Self {
        A1Notation(s)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Sheet titles are always quoted; embedded quotes are doubled.
fn quote_sheet_title(sheet_title: &str) -> String {
    format!("'{}'", sheet_title.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_range() {
        assert_eq!(A1Notation::tab("2023").as_ref(), "'2023'!A:Z");
    }

    #[test]
    fn test_tab_range_with_spaces_and_quotes() {
        assert_eq!(
            A1Notation::tab("Q1 案件").to_string(),
            "'Q1 案件'!A:Z"
        );
        assert_eq!(A1Notation::tab("Bob's").to_string(), "'Bob''s'!A:Z");
    }

    #[test]
    fn test_sheet_title() {
        assert_eq!(A1Notation::from("'2022'!A:H".to_string()).sheet_title().as_deref(), Some("2022"));
        assert_eq!(A1Notation::from("budgets!A:B".to_string()).sheet_title().as_deref(), Some("budgets"));
        assert_eq!(A1Notation::tab("Bob's").sheet_title().as_deref(), Some("Bob's"));
        assert_eq!(A1Notation::from("A1:B2".to_string()).sheet_title(), None);
    }

    #[test]
    fn test_row_span() {
        let last = Column::spanning(6).expect("six columns");
        let range = A1Notation::row_span("2022", Row::from_row(5), Column::FIRST, last);
        assert_eq!(String::from(range), "'2022'!A5:F5");
    }
}
