use error_stack::{report, ResultExt};
use google_sheets4::api::{
    BatchUpdateSpreadsheetRequest, DeleteDimensionRequest, DimensionRange, Request, ValueRange,
};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::domain::sheets::{
    a1_notation::A1Notation,
    column::Column,
    ranges::{missing_columns, RangeSchema, SheetRange},
    record::{self, Record, RowMatch},
    row::Row,
};

use super::{
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
    spreadsheet_read::SpreadsheetRead,
    value_range_factory::{wrap_value, ValueRangeFactory},
};

type WriteResult<T> = error_stack::Result<T, SpreadsheetManagerError>;

const ID_COLUMN: &str = "id";

/// Row-level writes against header-first ranges starting at row 1.
pub trait SpreadsheetWrite {
    /// Appends `payload` below the last row of `range`, ordered by `schema.columns`.
    fn append_row(
        &self,
        range: &str,
        schema: RangeSchema,
        payload: &Map<String, Value>,
    ) -> impl std::future::Future<Output = WriteResult<()>> + Send;

    /// First data row of `range` whose `id_column` cell matches `id`, trimmed.
    fn find_row_by_id(
        &self,
        range: &str,
        id_column: &str,
        id: &str,
    ) -> impl std::future::Future<Output = WriteResult<Option<RowMatch>>> + Send;

    /// Overwrites `row` of `sheet_title` from column `A` on.
    fn update_row(
        &self,
        sheet_title: &str,
        row: Row,
        columns: &[&str],
        payload: &Map<String, Value>,
    ) -> impl std::future::Future<Output = WriteResult<()>> + Send;

    /// Removes `row` and shifts the rows below it up.
    fn delete_row(
        &self,
        sheet_title: &str,
        row: Row,
    ) -> impl std::future::Future<Output = WriteResult<()>> + Send;
}

/// Cells of one row in `columns` order. Absent and null fields become blanks.
pub fn row_from_payload(columns: &[&str], payload: &Map<String, Value>) -> Vec<Value> {
    columns
        .iter()
        .map(|column| match payload.get(*column) {
            Some(Value::Null) | None => wrap_value(""),
            Some(value) => value.clone(),
        })
        .collect()
}

/// `payload` laid over the fields of an existing record.
pub fn merge_record(record: &Record, payload: &Map<String, Value>) -> Map<String, Value> {
    let mut merged: Map<String, Value> = record
        .iter()
        .map(|(label, value)| (label.to_string(), wrap_value(value)))
        .collect();
    for (key, value) in payload {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Title of the tab a configured range lives on.
fn range_sheet_title(range: &str) -> WriteResult<String> {
    A1Notation::from(range.to_string())
        .sheet_title()
        .ok_or_else(|| report!(SpreadsheetManagerError::SheetNotFound(range.to_string())))
        .attach_printable("The range does not name a tab")
}

pub fn delete_dimension_request(sheet_id: i32, row: Row) -> Option<BatchUpdateSpreadsheetRequest> {
    let start_index = i32::try_from(row.index()).ok()?;
    let range = DimensionRange {
        sheet_id: Some(sheet_id),
        dimension: Some("ROWS".to_string()),
        start_index: Some(start_index),
        end_index: Some(start_index.checked_add(1)?),
    };

    Some(BatchUpdateSpreadsheetRequest {
        requests: Some(vec![Request {
            delete_dimension: Some(DeleteDimensionRequest { range: Some(range) }),
            ..Default::default()
        }]),
        ..Default::default()
    })
}

impl SpreadsheetWrite for SpreadsheetManager {
    #[instrument(skip(self, payload))]
    async fn append_row(
        &self,
        range: &str,
        schema: RangeSchema,
        payload: &Map<String, Value>,
    ) -> WriteResult<()> {
        let present = payload
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, _)| key.as_str());
        let missing = missing_columns(present, schema.required);
        if !missing.is_empty() {
            return Err(report!(SpreadsheetManagerError::MissingRequiredColumns(
                missing.into_iter().map(String::from).collect()
            )));
        }

        let value_range = ValueRange::from_row(row_from_payload(schema.columns, payload));
        self.hub()
            .await?
            .spreadsheets()
            .values_append(value_range, &self.config.spreadsheet_id, range)
            .value_input_option("USER_ENTERED")
            .insert_data_option("INSERT_ROWS")
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToAppendRow)
            .attach_printable_lazy(|| format!("Failed to append to range {}", range))
    }

    #[instrument(skip(self))]
    async fn find_row_by_id(
        &self,
        range: &str,
        id_column: &str,
        id: &str,
    ) -> WriteResult<Option<RowMatch>> {
        let rows = self.read_range(range).await?;
        Ok(record::find_row_by_id(&rows, id_column, id))
    }

    #[instrument(skip(self, payload))]
    async fn update_row(
        &self,
        sheet_title: &str,
        row: Row,
        columns: &[&str],
        payload: &Map<String, Value>,
    ) -> WriteResult<()> {
        let last = Column::spanning(columns.len())
            .ok_or(report!(SpreadsheetManagerError::FailedToWriteRange))
            .attach_printable("No columns to write")?;
        let range = A1Notation::row_span(sheet_title, row, Column::FIRST, last);

        self.write_range(&range, ValueRange::from_row(row_from_payload(columns, payload)))
            .await
    }

    #[instrument(skip(self))]
    async fn delete_row(&self, sheet_title: &str, row: Row) -> WriteResult<()> {
        let sheet_id = self.sheet_id(sheet_title).await?;
        let request = delete_dimension_request(sheet_id, row)
            .ok_or(report!(SpreadsheetManagerError::FailedToDeleteRow))
            .attach_printable_lazy(|| format!("{:?} is out of range", row))?;

        self.hub()
            .await?
            .spreadsheets()
            .batch_update(request, &self.config.spreadsheet_id)
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToDeleteRow)
            .attach_printable_lazy(|| format!("Failed to delete {:?} of '{}'", row, sheet_title))
    }
}

/// Record-level operations on the configured ranges, rows addressed by `id`.
impl SpreadsheetManager {
    #[instrument(skip(self, payload))]
    pub async fn append_record(
        &self,
        range: SheetRange,
        payload: &Map<String, Value>,
    ) -> WriteResult<()> {
        self.append_row(self.config.ranges.get(range), range.schema(), payload)
            .await
    }

    async fn locate_record(&self, range: SheetRange, id: &str) -> WriteResult<(String, RowMatch)> {
        let a1_range = self.config.ranges.get(range);
        let sheet_title = range_sheet_title(a1_range)?;
        let found = self
            .find_row_by_id(a1_range, ID_COLUMN, id)
            .await?
            .ok_or_else(|| report!(SpreadsheetManagerError::RowNotFound(id.to_string())))
            .attach_printable_lazy(|| format!("Searched range {}", a1_range))?;
        Ok((sheet_title, found))
    }

    /// Rewrites the row with `id`; fields missing from `payload` keep their value.
    #[instrument(skip(self, payload))]
    pub async fn update_record(
        &self,
        range: SheetRange,
        id: &str,
        payload: &Map<String, Value>,
    ) -> WriteResult<()> {
        let (sheet_title, found) = self.locate_record(range, id).await?;
        let merged = merge_record(&found.record, payload);
        self.update_row(&sheet_title, found.row, range.schema().columns, &merged)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_record(&self, range: SheetRange, id: &str) -> WriteResult<()> {
        let (sheet_title, found) = self.locate_record(range, id).await?;
        self.delete_row(&sheet_title, found.row).await
    }
}
