//! # gsheet-object-core
//!
//! Row/object mapping engine for spreadsheets whose first row is a header.
//!
//! This crate has no I/O. It provides:
//! - [`column_to_letter`] / [`letter_to_column`] - the column letter codec
//! - [`RangeDescriptor`] - A1 range addresses such as `Cities!A1:C100`
//! - [`field_name`] and [`HeaderIndex`] - header cells to canonical field names
//! - [`sheet_to_array`], [`row_to_object`] - raw rows to [`RowObject`]s
//! - [`array_to_object`] - re-keying rows by a derived key
//! - [`Schema`] - typed bindings between rows and user structs
//!
//! ## Example
//!
//! ```rust
//! use gsheet_object_core::{sheet_to_object, RawTable};
//!
//! let table: RawTable = vec![
//!     vec!["id".into(), "FirstName".into(), "Last name".into()],
//!     vec!["0".into(), "Alice".into(), "DOE".into()],
//!     vec!["1".into(), "Bob".into(), "SMITH".into()],
//! ];
//!
//! let by_name = sheet_to_object(&table, |row| row.get("firstName").unwrap_or_default().to_string());
//! assert_eq!(by_name["Bob"].get("lastName"), Some("SMITH"));
//! assert_eq!(by_name["Bob"].row_number, 2);
//! ```

pub mod column;
pub mod error;
pub mod header;
pub mod index;
pub mod range;
pub mod row;
pub mod schema;

pub use column::{column_to_letter, letter_to_column};
pub use error::{Error, Result};
pub use header::{build_header_index, column_to_name, field_name, name_to_column, HeaderIndex};
pub use index::{array_to_object, array_to_object_with, IndexedCollection};
pub use range::{quote_sheet_name, CellRef, RangeDescriptor};
pub use row::{
    object_to_row, row_to_object, sheet_to_array, sheet_to_object, sheet_to_object_with, Fields,
    RawTable, RowObject,
};
pub use schema::{Schema, SchemaBuilder, Tagged};
