//! Conversion between raw sheet rows and keyed row objects

use crate::header::{build_header_index, field_name};
use crate::index::{array_to_object, array_to_object_with, IndexedCollection};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::hash::Hash;

/// Row-major grid of raw cell text; the first row is the header
pub type RawTable = Vec<Vec<String>>;

/// Field name to raw cell value
pub type Fields = BTreeMap<String, String>;

/// One data row of a sheet, keyed by canonical field name
///
/// `row_number` is the 1-based position of the row among the data rows, so the
/// first row under the header has row number 1 and lives on sheet row 2. It is
/// what update and delete operations use to find the row again.
///
/// Fields missing from a short row are absent rather than empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowObject {
    /// 1-based offset of the row below the header
    #[cfg_attr(feature = "serde", serde(rename = "_row"))]
    pub row_number: usize,
    /// Cell values keyed by field name
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub fields: Fields,
}

impl RowObject {
    /// Create a row object from its parts
    pub fn new(row_number: usize, fields: Fields) -> Self {
        Self { row_number, fields }
    }

    /// Get a field value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Check whether a field is present
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The sheet row this object was read from, with the header on row 1
    pub fn sheet_row(&self) -> usize {
        self.row_number + 1
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no fields are present
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(field name, value)` pairs in field name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a RowObject {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Zip a data row against the header row
///
/// Each header cell's field name is paired with the cell in the same
/// position. Cells past the end of the header are dropped, and header fields
/// past the end of a short row are left out of the result. When two headers
/// share a field name the later column wins.
pub fn row_to_object<S: AsRef<str>, H: AsRef<str>>(row_cells: &[S], raw_header_row: &[H]) -> Fields {
    raw_header_row
        .iter()
        .zip(row_cells)
        .map(|(header, cell)| (field_name(header.as_ref()), cell.as_ref().to_string()))
        .collect()
}

/// Project fields back onto the header's column order
///
/// Fields without a header column are ignored, columns without a field become
/// empty cells, and trailing empty cells are trimmed.
pub fn object_to_row<H: AsRef<str>>(fields: &Fields, raw_header_row: &[H]) -> Vec<String> {
    let index = build_header_index(raw_header_row);
    let mut row = vec![String::new(); index.width()];

    for (name, value) in fields {
        if let Some(col) = index.get(name) {
            row[col] = value.clone();
        }
    }

    while row.last().is_some_and(|cell| cell.is_empty()) {
        row.pop();
    }
    row
}

/// Convert a whole table into row objects
///
/// `table[0]` is the header. The data row at offset `i` below it gets row
/// number `i + 1`. An empty table or a header-only table yields no rows.
///
/// # Examples
/// ```
/// use gsheet_object_core::sheet_to_array;
///
/// let table = vec![
///     vec!["id".to_string(), "First Name".to_string()],
///     vec!["0".to_string(), "Alice".to_string()],
/// ];
/// let rows = sheet_to_array(&table);
/// assert_eq!(rows[0].row_number, 1);
/// assert_eq!(rows[0].get("firstName"), Some("Alice"));
/// ```
pub fn sheet_to_array<S: AsRef<str>>(table: &[Vec<S>]) -> Vec<RowObject> {
    let Some((header, data)) = table.split_first() else {
        return Vec::new();
    };

    data.iter()
        .enumerate()
        .map(|(i, row)| RowObject::new(i + 1, row_to_object(row, header)))
        .collect()
}

/// Convert a table into row objects keyed by `key`
///
/// Rows sharing a key overwrite earlier ones.
pub fn sheet_to_object<S, K, F>(table: &[Vec<S>], key: F) -> IndexedCollection<K, RowObject>
where
    S: AsRef<str>,
    K: Eq + Hash,
    F: FnMut(&RowObject) -> K,
{
    array_to_object(sheet_to_array(table), key)
}

/// Convert a table into `key -> value` pairs derived from each row object
///
/// The value selector also receives the 0-based position of the row in the
/// data rows.
pub fn sheet_to_object_with<S, K, U, F, G>(table: &[Vec<S>], key: F, value: G) -> IndexedCollection<K, U>
where
    S: AsRef<str>,
    K: Eq + Hash,
    F: FnMut(&RowObject) -> K,
    G: FnMut(&RowObject, usize) -> U,
{
    array_to_object_with(sheet_to_array(table), key, value)
}
