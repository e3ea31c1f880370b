//! Session configuration for a sheet accessor.

use std::env;

/// Environment variable holding the spreadsheet id.
pub const SPREADSHEET_ID_VAR: &str = "SPREADSHEET_ID";
/// Environment variable holding the sheet (tab) name.
pub const SHEET_NAME_VAR: &str = "SHEET_NAME";
/// Environment variable overriding the data range.
pub const SHEET_RANGE_VAR: &str = "SHEET_RANGE";
/// Environment variable overriding the header range.
pub const SHEET_HEADER_RANGE_VAR: &str = "SHEET_HEADER_RANGE";

/// Which spreadsheet and sheet an accessor talks to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetConfig {
    /// Spreadsheet identifier. Required.
    pub spreadsheet_id: String,
    /// Sheet title, matched case-insensitively. If None, the first sheet is used.
    pub sheet_name: Option<String>,
    /// Explicit data range. If None, derived from the sheet's grid size.
    pub range: Option<String>,
    /// Explicit header range. If None, row 1 across the sheet's columns.
    pub header_range: Option<String>,
}

impl SheetConfig {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            ..Self::default()
        }
    }

    /// Read `SPREADSHEET_ID`, `SHEET_NAME`, `SHEET_RANGE` and
    /// `SHEET_HEADER_RANGE` from the process environment.
    ///
    /// Unset or empty variables are left as defaults; a missing spreadsheet id
    /// is reported when the accessor is constructed.
    pub fn from_env() -> Self {
        Self {
            spreadsheet_id: env_var(SPREADSHEET_ID_VAR).unwrap_or_default(),
            sheet_name: env_var(SHEET_NAME_VAR),
            range: env_var(SHEET_RANGE_VAR),
            header_range: env_var(SHEET_HEADER_RANGE_VAR),
        }
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn with_header_range(mut self, header_range: impl Into<String>) -> Self {
        self.header_range = Some(header_range.into());
        self
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
