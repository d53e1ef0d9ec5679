use std::fmt::Formatter;

/// 1-based spreadsheet column (`A` = 1).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Column(u32);

impl Column {
    /// Last column read from every tab (`Z`).
    pub const TAB_LAST: Column = Column(26);
    pub const FIRST: Column = Column(1);

    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Column(value))
    }

    /// Column holding the last of `count` fields written from `A`.
    pub fn spanning(count: usize) -> Option<Self> {
        u32::try_from(count).ok().and_then(Column::new)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", number_to_letters(self.0))
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Column(u32: {}, letters: {})", self.0, self)
    }
}

fn number_to_letters(number: u32) -> String {
    let mut number = number;
    let mut letters = Vec::new();
    while number > 0 {
        let remainder = (number - 1) % 26;
        letters.push(char::from(b'A' + remainder as u8));
        number = (number - remainder) / 26;
    }
    letters.iter().rev().collect()
}
