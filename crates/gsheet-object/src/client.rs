//! The spreadsheet service seen by the accessor.
//!
//! An implementation reads and writes rectangular ranges of string cells
//! addressed in A1 notation (`Cities!A1:C10`). Authentication, transport and
//! retries are entirely the implementation's business; the accessor only
//! forwards its errors.

use std::future::Future;

use gsheet_object_core::RawTable;

use crate::error::Result;

/// Title and grid size of one sheet (tab) of a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetProperties {
    pub title: String,
    pub column_count: usize,
    pub row_count: usize,
}

impl SheetProperties {
    pub fn new(title: impl Into<String>, column_count: usize, row_count: usize) -> Self {
        Self {
            title: title.into(),
            column_count,
            row_count,
        }
    }
}

/// The sheets of a spreadsheet, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetMetadata {
    pub sheets: Vec<SheetProperties>,
}

impl SheetMetadata {
    /// Find a sheet by title, ignoring case.
    pub fn find(&self, title: &str) -> Option<&SheetProperties> {
        let wanted = title.to_lowercase();
        self.sheets.iter().find(|s| s.title.to_lowercase() == wanted)
    }

    pub fn first(&self) -> Option<&SheetProperties> {
        self.sheets.first()
    }
}

/// Range-level access to a spreadsheet service.
pub trait SheetsClient: Send + Sync {
    /// Make sure credentials are usable. Called once by `GoogleSheet::init`.
    fn authorize(&self) -> impl Future<Output = Result<()>> + Send {
        async { Ok(()) }
    }

    /// List the sheets of a spreadsheet.
    fn get_sheet_metadata(
        &self,
        spreadsheet_id: &str,
    ) -> impl Future<Output = Result<SheetMetadata>> + Send;

    /// Read a range row by row. Trailing empty cells of a row, and trailing
    /// empty rows, may be omitted.
    fn read_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> impl Future<Output = Result<RawTable>> + Send;

    /// Append one row after the last non-empty row of the table in `range`.
    fn append_row(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<String>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Overwrite cells starting at the top-left corner of `range`.
    fn write_cell(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Blank every cell in `range` without removing rows or columns.
    fn clear_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_sheet_ignores_case() {
        let meta = SheetMetadata {
            sheets: vec![
                SheetProperties::new("Cities", 26, 1000),
                SheetProperties::new("Countries", 5, 200),
            ],
        };

        assert_eq!(meta.find("cities").map(|s| s.column_count), Some(26));
        assert_eq!(meta.find("COUNTRIES").map(|s| s.row_count), Some(200));
        assert!(meta.find("Rivers").is_none());
        assert_eq!(meta.first().map(|s| s.title.as_str()), Some("Cities"));
    }
}
