//! # gsheet-object
//!
//! Treat one sheet of a spreadsheet as a table of records.
//!
//! The first row of the sheet is the header. Header cells are turned into
//! camelCase field names (`"Last name"` becomes `lastName`) and every row
//! below becomes a [`RowObject`] carrying its row number, so it can later be
//! updated or cleared in place.
//!
//! ## Features
//!
//! - Read rows as [`RowObject`]s, keyed collections or typed values
//!   through a [`Schema`]
//! - Append rows in header column order
//! - Update a single cell, clear a whole row
//! - Pluggable service via [`SheetsClient`]: [`MemoryClient`] in process,
//!   `RestClient` for the Google Sheets v4 API (feature `rest`)
//!
//! ## Example
//!
//! ```rust
//! use gsheet_object::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = MemoryClient::new();
//!     client.add_sheet(
//!         "spreadsheet-id",
//!         "Cities",
//!         vec![vec!["City", "Country"], vec!["Paris", "France"]],
//!     );
//!
//!     let sheet = GoogleSheet::load(SheetConfig::new("spreadsheet-id"), client).await?;
//!     sheet.append([("country", "Italy"), ("city", "Rome")]).await?;
//!
//!     let cities = sheet
//!         .get_indexed(|row| row.get("city").unwrap_or_default().to_string())
//!         .await?;
//!     assert_eq!(cities["Rome"].get("country"), Some("Italy"));
//!     assert_eq!(cities["Rome"].row_number, 2);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod memory;
pub mod prelude;
#[cfg(feature = "rest")]
pub mod rest;
pub mod sheet;

pub use client::{SheetMetadata, SheetProperties, SheetsClient};
pub use config::SheetConfig;
pub use error::{Result, SheetError};
pub use memory::{Call, MemoryClient, MemoryClientError};
#[cfg(feature = "rest")]
pub use rest::{RestClient, RestClientError};
pub use sheet::{GoogleSheet, RowRef};

// Re-export core types
pub use gsheet_object_core::{
    array_to_object, column_to_letter, field_name, letter_to_column, sheet_to_array,
    sheet_to_object, Fields, IndexedCollection, RangeDescriptor, RawTable, RowObject, Schema,
    SchemaBuilder, Tagged,
};
