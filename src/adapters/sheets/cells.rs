use serde_json::Value;

/// Cell text as shown in the sheet. Strings are taken verbatim, blanks read as `""`.
pub fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub trait IntoStringRows {
    fn into_string_rows(self) -> Vec<Vec<String>>;
}

impl IntoStringRows for Vec<Vec<Value>> {
    fn into_string_rows(self) -> Vec<Vec<String>> {
        self.into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}
