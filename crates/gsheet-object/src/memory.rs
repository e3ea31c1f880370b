//! In-process spreadsheet service.
//!
//! `MemoryClient` keeps spreadsheets in memory and answers range requests the
//! way the Sheets values API does: reads drop trailing empty cells and rows,
//! appends land after the last non-empty row of the range, clears blank cells
//! without removing them. Every request is recorded so callers can inspect
//! exactly which ranges were touched.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gsheet_object_core::{RangeDescriptor, RawTable};
use thiserror::Error;

use crate::client::{SheetMetadata, SheetProperties, SheetsClient};
use crate::error::{Result, SheetError};

/// Default grid size of a new sheet, matching a fresh Google spreadsheet.
const DEFAULT_COLUMNS: usize = 26;
const DEFAULT_ROWS: usize = 1000;

#[derive(Debug, Error)]
pub enum MemoryClientError {
    #[error("Requested entity was not found: spreadsheet {0}")]
    SpreadsheetNotFound(String),

    #[error("Unable to parse range: {0} (no such sheet)")]
    SheetNotFound(String),

    #[error("Unable to parse range: {0}")]
    InvalidRange(#[from] gsheet_object_core::Error),
}

/// A request received by a [`MemoryClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Metadata,
    Read(String),
    Append(String, Vec<String>),
    Write(String, Vec<Vec<String>>),
    Clear(String),
}

#[derive(Debug, Clone)]
struct MemorySheet {
    title: String,
    column_count: usize,
    row_count: usize,
    cells: Vec<Vec<String>>,
}

impl MemorySheet {
    fn get(&self, row: usize, col: usize) -> &str {
        self.cells
            .get(row - 1)
            .and_then(|r| r.get(col - 1))
            .map(String::as_str)
            .unwrap_or("")
    }

    fn set(&mut self, row: usize, col: usize, value: String) {
        self.row_count = self.row_count.max(row);
        self.column_count = self.column_count.max(col);
        if self.cells.len() < row {
            self.cells.resize_with(row, Vec::new);
        }
        let cells = &mut self.cells[row - 1];
        if cells.len() < col {
            cells.resize(col, String::new());
        }
        cells[col - 1] = value;
    }

    /// Resolve a range to inclusive 1-based `(rows, columns)` bounds.
    fn bounds(&self, range: &RangeDescriptor) -> ((usize, usize), (usize, usize)) {
        let first_row = range.start.row.unwrap_or(1).max(1);
        let last_row = range.end.row.unwrap_or(self.row_count);
        (
            (first_row, last_row),
            (range.start.column.max(1), range.end.column),
        )
    }

    fn read(&self, range: &RangeDescriptor) -> RawTable {
        let ((first_row, last_row), (first_col, last_col)) = self.bounds(range);
        let last_row = last_row.min(self.row_count);
        let last_col = last_col.min(self.column_count);

        let mut rows: RawTable = (first_row..=last_row)
            .map(|r| {
                let mut row: Vec<String> = (first_col..=last_col)
                    .map(|c| self.get(r, c).to_string())
                    .collect();
                while row.last().is_some_and(|cell| cell.is_empty()) {
                    row.pop();
                }
                row
            })
            .collect();

        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        rows
    }

    fn last_filled_row(&self, range: &RangeDescriptor) -> Option<usize> {
        let ((first_row, last_row), (first_col, last_col)) = self.bounds(range);
        let last_row = last_row.min(self.cells.len());

        (first_row..=last_row)
            .rev()
            .find(|&r| (first_col..=last_col).any(|c| !self.get(r, c).is_empty()))
    }
}

#[derive(Debug, Default)]
struct State {
    spreadsheets: HashMap<String, Vec<MemorySheet>>,
    calls: Vec<Call>,
    auth_failure: Option<String>,
}

impl State {
    fn sheets(&self, spreadsheet_id: &str) -> Result<&Vec<MemorySheet>> {
        self.spreadsheets.get(spreadsheet_id).ok_or_else(|| {
            SheetError::transport(MemoryClientError::SpreadsheetNotFound(
                spreadsheet_id.to_string(),
            ))
        })
    }

    fn sheet_mut(
        &mut self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<(&mut MemorySheet, RangeDescriptor)> {
        let descriptor = RangeDescriptor::parse(range)
            .map_err(|e| SheetError::transport(MemoryClientError::from(e)))?;
        let sheets = self.spreadsheets.get_mut(spreadsheet_id).ok_or_else(|| {
            SheetError::transport(MemoryClientError::SpreadsheetNotFound(
                spreadsheet_id.to_string(),
            ))
        })?;

        let position = match descriptor.sheet() {
            Some(title) => {
                let wanted = title.to_lowercase();
                sheets.iter().position(|s| s.title.to_lowercase() == wanted)
            }
            None if sheets.is_empty() => None,
            None => Some(0),
        };

        match position {
            Some(i) => Ok((&mut sheets[i], descriptor)),
            None => Err(SheetError::transport(MemoryClientError::SheetNotFound(
                range.to_string(),
            ))),
        }
    }
}

/// Shared in-memory spreadsheet store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryClient {
    state: Arc<Mutex<State>>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a sheet holding `rows`, sized like a new Google sheet
    /// (at least 26 columns by 1000 rows).
    pub fn add_sheet<R, S>(&self, spreadsheet_id: &str, title: &str, rows: R) -> &Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: RawTable = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let width = cells.iter().map(Vec::len).max().unwrap_or(0);
        let height = cells.len();
        self.add_sheet_with_size(
            spreadsheet_id,
            title,
            width.max(DEFAULT_COLUMNS),
            height.max(DEFAULT_ROWS),
            cells,
        )
    }

    /// Add a sheet with an explicit grid size.
    pub fn add_sheet_with_size(
        &self,
        spreadsheet_id: &str,
        title: &str,
        column_count: usize,
        row_count: usize,
        cells: RawTable,
    ) -> &Self {
        let mut state = self.lock();
        state
            .spreadsheets
            .entry(spreadsheet_id.to_string())
            .or_default()
            .push(MemorySheet {
                title: title.to_string(),
                column_count,
                row_count,
                cells,
            });
        self
    }

    /// Make `authorize` fail with an authentication error.
    pub fn reject_credentials(&self, reason: impl Into<String>) -> &Self {
        self.lock().auth_failure = Some(reason.into());
        self
    }

    /// Current contents of a sheet, trimmed like a read of the whole grid.
    pub fn contents(&self, spreadsheet_id: &str, title: &str) -> Option<RawTable> {
        let state = self.lock();
        let sheet = state
            .spreadsheets
            .get(spreadsheet_id)?
            .iter()
            .find(|s| s.title == title)?;
        let whole = RangeDescriptor::full(&sheet.title, sheet.column_count, sheet.row_count);
        Some(sheet.read(&whole))
    }

    /// Every request received so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }
}

impl SheetsClient for MemoryClient {
    async fn authorize(&self) -> Result<()> {
        match &self.lock().auth_failure {
            Some(reason) => Err(SheetError::Authentication(reason.clone())),
            None => Ok(()),
        }
    }

    async fn get_sheet_metadata(&self, spreadsheet_id: &str) -> Result<SheetMetadata> {
        let mut state = self.lock();
        state.calls.push(Call::Metadata);
        let sheets = state
            .sheets(spreadsheet_id)?
            .iter()
            .map(|s| SheetProperties::new(s.title.clone(), s.column_count, s.row_count))
            .collect();
        Ok(SheetMetadata { sheets })
    }

    async fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<RawTable> {
        let mut state = self.lock();
        state.calls.push(Call::Read(range.to_string()));
        let (sheet, descriptor) = state.sheet_mut(spreadsheet_id, range)?;
        Ok(sheet.read(&descriptor))
    }

    async fn append_row(&self, spreadsheet_id: &str, range: &str, values: Vec<String>) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::Append(range.to_string(), values.clone()));
        let (sheet, descriptor) = state.sheet_mut(spreadsheet_id, range)?;

        let row = match sheet.last_filled_row(&descriptor) {
            Some(last) => last + 1,
            None => descriptor.start.row.unwrap_or(1),
        };
        for (offset, value) in values.into_iter().enumerate() {
            sheet.set(row, descriptor.start.column + offset, value);
        }
        Ok(())
    }

    async fn write_cell(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::Write(range.to_string(), values.clone()));
        let (sheet, descriptor) = state.sheet_mut(spreadsheet_id, range)?;

        let first_row = descriptor.start.row.unwrap_or(1);
        for (r, row) in values.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                sheet.set(first_row + r, descriptor.start.column + c, value);
            }
        }
        Ok(())
    }

    async fn clear_range(&self, spreadsheet_id: &str, range: &str) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::Clear(range.to_string()));
        let (sheet, descriptor) = state.sheet_mut(spreadsheet_id, range)?;

        let ((first_row, last_row), (first_col, last_col)) = sheet.bounds(&descriptor);
        let last_row = last_row.min(sheet.cells.len());
        for r in first_row..=last_row {
            let cells = &mut sheet.cells[r - 1];
            for c in first_col..=last_col.min(cells.len()) {
                cells[c - 1].clear();
            }
        }
        Ok(())
    }
}
