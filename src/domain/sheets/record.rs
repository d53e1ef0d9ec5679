use serde::{ser::SerializeMap, Serialize, Serializer};

use super::row::Row;

/// One data row keyed by the labels of its tab's header row.
///
/// Field order follows the header. A label repeated in the header keeps its
/// first position and takes the value of its last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Zips `header` with `row`. Cells past the header width are dropped and
    /// header columns past the end of the row read as `""`.
    pub fn from_row(header: &[String], row: &[String]) -> Self {
        let mut record = Record::default();
        for (index, label) in header.iter().enumerate() {
            let value = row.get(index).cloned().unwrap_or_default();
            record.insert(label, value);
        }
        record
    }

    pub fn insert(&mut self, label: &str, value: String) {
        match self.fields.iter_mut().find(|(existing, _)| existing == label) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((label.to_string(), value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(label, value)| (label.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Turns a raw cell grid into records using its first row as the header.
pub fn normalize_rows(rows: &[Vec<String>]) -> Vec<Record> {
    match rows {
        [header, data @ ..] => data.iter().map(|row| Record::from_row(header, row)).collect(),
        [] => Vec::new(),
    }
}

/// A data row located by id, with the sheet row it lives on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMatch {
    pub row: Row,
    pub record: Record,
}

/// Finds the first data row whose `id_column` cell equals `target_id`, both
/// sides trimmed. Returns `None` for grids without data rows or without the
/// id column in the header.
pub fn find_row_by_id(rows: &[Vec<String>], id_column: &str, target_id: &str) -> Option<RowMatch> {
    let [header, data @ ..] = rows else {
        return None;
    };
    let id_index = header.iter().position(|label| label == id_column)?;
    let target_id = target_id.trim();

    data.iter().enumerate().find_map(|(offset, cells)| {
        let row_id = cells.get(id_index).map(|id| id.trim()).unwrap_or_default();
        (row_id == target_id).then(|| RowMatch {
            row: Row::after_header(offset),
            record: Record::from_row(header, cells),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_empty_and_header_only_grids_yield_nothing() {
        assert!(normalize_rows(&[]).is_empty());
        assert!(normalize_rows(&grid(&[&["id", "name"]])).is_empty());
    }

    #[test]
    fn test_short_rows_are_padded_and_long_rows_truncated() {
        let records = normalize_rows(&grid(&[
            &["id", "name", "note"],
            &["1"],
            &["2", "b", "c", "overflow"],
        ]));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("id"), Some("1"));
        assert_eq!(records[0].get("name"), Some(""));
        assert_eq!(records[0].get("note"), Some(""));
        assert_eq!(records[1].len(), 3, "cells past the header are dropped");
        assert_eq!(records[1].get("note"), Some("c"));
    }

    #[test]
    fn test_duplicate_labels_keep_first_position_and_last_value() {
        let record = Record::from_row(
            &grid(&[&["a", "b", "a"]])[0],
            &grid(&[&["1", "2", "3"]])[0],
        );
        let fields: Vec<_> = record.iter().collect();
        assert_eq!(fields, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_record_serializes_in_header_order() {
        let record = Record::from_row(
            &grid(&[&["z", "a"]])[0],
            &grid(&[&["last", "first"]])[0],
        );
        let json = serde_json::to_string(&record).expect("serialize record");
        assert_eq!(json, r#"{"z":"last","a":"first"}"#);
    }

    #[test]
    fn test_find_row_by_id_trims_and_counts_header() {
        let rows = grid(&[
            &["id", "amount"],
            &["1", "10"],
            &[" 2 ", "20"],
        ]);
        let found = find_row_by_id(&rows, "id", "2 ").expect("row 2 present");
        assert_eq!(found.row.row(), 3);
        assert_eq!(found.record.get("amount"), Some("20"));
    }

    #[test]
    fn test_find_row_by_id_misses() {
        let rows = grid(&[&["id", "amount"], &["1", "10"]]);
        assert_eq!(find_row_by_id(&rows, "id", "9"), None);
        assert_eq!(find_row_by_id(&rows, "missing", "1"), None);
        assert_eq!(find_row_by_id(&rows[..1], "id", "1"), None);
    }
}
