use std::fmt::Formatter;

/// A sheet row, stored zero-based and displayed one-based.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Row {
    index: u32,
}

impl Row {
    pub fn from_index(index: u32) -> Self {
        Row { index }
    }

    pub fn from_row(row: u32) -> Self {
        Row {
            index: row.saturating_sub(1), // Convert to zero-based index
        }
    }

    /// Sheet row of the data row at `offset` in a range whose first row is the header.
    ///
    /// # Examples
    /// ```
    /// use sheets_gateway::domain::sheets::row::Row;
    /// assert_eq!(Row::after_header(0).row(), 2);
    /// assert_eq!(Row::after_header(3).row(), 5);
    /// ```
    pub fn after_header(offset: usize) -> Self {
        let offset = u32::try_from(offset).unwrap_or(u32::MAX);
        Row::from_index(offset.saturating_add(1))
    }

    /// Returns the row number as a 1-based index, as shown in the spreadsheet UI
    /// and used in A1 notation.
    pub fn row(&self) -> u32 {
        self.index.saturating_add(1)
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.row())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row(index: {}, row: {})", self.index(), self.row())
    }
}
