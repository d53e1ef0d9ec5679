// Column layouts of the ranges the row write helpers target. Ranges themselves
// come from configuration.

pub mod transactions {
    pub const COLUMNS: &[&str] = &["id", "date", "type", "category_id", "amount", "note"];
    pub const REQUIRED_COLUMNS: &[&str] = &["id", "date", "type", "amount"];
}

pub mod categories {
    pub const COLUMNS: &[&str] = &["id", "name", "color_hex"];
}

pub mod budgets {
    pub const COLUMNS: &[&str] = &["id", "amount"];
}

/// Written column order of a range plus the fields a new row must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSchema {
    pub columns: &'static [&'static str],
    pub required: &'static [&'static str],
}

impl RangeSchema {
    pub const TRANSACTIONS: RangeSchema = RangeSchema {
        columns: transactions::COLUMNS,
        required: transactions::REQUIRED_COLUMNS,
    };
    pub const CATEGORIES: RangeSchema = RangeSchema {
        columns: categories::COLUMNS,
        required: categories::COLUMNS,
    };
    pub const BUDGETS: RangeSchema = RangeSchema {
        columns: budgets::COLUMNS,
        required: budgets::COLUMNS,
    };
}

/// The ranges the gateway is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetRange {
    Transactions,
    Categories,
    Budgets,
}

impl SheetRange {
    pub fn schema(self) -> RangeSchema {
        match self {
            SheetRange::Transactions => RangeSchema::TRANSACTIONS,
            SheetRange::Categories => RangeSchema::CATEGORIES,
            SheetRange::Budgets => RangeSchema::BUDGETS,
        }
    }
}

/// Returns the required columns absent from `present`.
pub fn missing_columns<'a, 'p>(
    present: impl IntoIterator<Item = &'p str>,
    required: &[&'a str],
) -> Vec<&'a str> {
    let present: Vec<&str> = present.into_iter().collect();
    required
        .iter()
        .copied()
        .filter(|column| !present.iter().any(|name| name == column))
        .collect()
}
