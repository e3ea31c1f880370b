//! Row-level access to one sheet of a spreadsheet.

use std::hash::Hash;

use gsheet_object_core::{
    array_to_object, build_header_index, field_name, sheet_to_array, sheet_to_object_with, CellRef,
    IndexedCollection, RangeDescriptor, RawTable, RowObject, Schema, Tagged,
};

use crate::client::{SheetProperties, SheetsClient};
use crate::config::SheetConfig;
use crate::error::{Result, SheetError};

/// The row an update or delete targets.
///
/// Holds a row number as found in [`RowObject::row_number`]: the first data
/// row under the header is row 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowRef(pub usize);

impl RowRef {
    pub fn row_number(self) -> usize {
        self.0
    }

    /// Sheet row, counting the header as row 1.
    pub fn sheet_row(self) -> usize {
        self.0 + 1
    }
}

impl From<usize> for RowRef {
    fn from(row_number: usize) -> Self {
        RowRef(row_number)
    }
}

impl From<&RowObject> for RowRef {
    fn from(row: &RowObject) -> Self {
        RowRef(row.row_number)
    }
}

impl<T> From<&Tagged<T>> for RowRef {
    fn from(row: &Tagged<T>) -> Self {
        RowRef(row.row_number)
    }
}

/// Ranges resolved by `init`.
#[derive(Debug, Clone)]
struct Session {
    title: String,
    range: String,
    header_range: String,
    /// 1-based sheet column of the first header cell
    header_column: usize,
}

impl Session {
    /// Sheet column of the header cell at `offset` (0-based)
    fn column(&self, offset: usize) -> usize {
        self.header_column + offset
    }
}

/// Accessor for the rows of one sheet.
///
/// A new accessor is uninitialized; [`GoogleSheet::init`] resolves the sheet
/// and its ranges. Data operations before that fail with
/// [`SheetError::Uninitialized`] without contacting the client.
#[derive(Debug)]
pub struct GoogleSheet<C> {
    config: SheetConfig,
    client: C,
    session: Option<Session>,
}

impl<C: SheetsClient> GoogleSheet<C> {
    /// Create an uninitialized accessor.
    pub fn new(config: SheetConfig, client: C) -> Result<Self> {
        if config.spreadsheet_id.trim().is_empty() {
            return Err(SheetError::Configuration(
                "spreadsheet id must not be empty".into(),
            ));
        }

        Ok(Self {
            config,
            client,
            session: None,
        })
    }

    /// Create an accessor and initialize it.
    pub async fn load(config: SheetConfig, client: C) -> Result<Self> {
        let mut sheet = Self::new(config, client)?;
        sheet.init().await?;
        Ok(sheet)
    }

    /// Authorize, find the sheet and resolve its data and header ranges.
    ///
    /// Calling this again re-resolves against the current sheet metadata.
    pub async fn init(&mut self) -> Result<()> {
        self.client.authorize().await?;

        let metadata = self
            .client
            .get_sheet_metadata(&self.config.spreadsheet_id)
            .await?;

        // Explicit ranges may name the sheet when no sheet name is configured
        let explicit_range = self.config.range.as_deref().map(RangeDescriptor::parse).transpose()?;
        let explicit_header = self
            .config
            .header_range
            .as_deref()
            .map(RangeDescriptor::parse)
            .transpose()?;
        let wanted = self.config.sheet_name.as_deref().or_else(|| {
            explicit_range
                .iter()
                .chain(&explicit_header)
                .find_map(RangeDescriptor::sheet)
        });

        let properties: &SheetProperties = match wanted {
            Some(name) => metadata
                .find(name)
                .ok_or_else(|| SheetError::NotFound(name.to_string()))?,
            None => metadata
                .first()
                .ok_or_else(|| SheetError::NotFound("<first sheet>".into()))?,
        };

        let title = properties.title.clone();
        let range = match explicit_range {
            Some(range) => on_sheet(range, &title)?,
            None => RangeDescriptor::full(&title, properties.column_count, properties.row_count),
        };
        let header = match explicit_header {
            Some(range) => on_sheet(range, &title)?,
            None => RangeDescriptor::header(&title, properties.column_count),
        };
        let header_column = header.start.column.max(1);
        let range = range.to_string();
        let header_range = header.to_string();

        tracing::debug!(
            spreadsheet_id = %self.config.spreadsheet_id,
            sheet = %title,
            range = %range,
            header_range = %header_range,
            "resolved sheet"
        );

        self.session = Some(Session {
            title,
            range,
            header_range,
            header_column,
        });
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Resolved sheet title, once initialized.
    pub fn sheet_title(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.title.as_str())
    }

    /// Resolved data range, once initialized.
    pub fn data_range(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.range.as_str())
    }

    /// Resolved header range, once initialized.
    pub fn header_range(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.header_range.as_str())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Every data row as a row object.
    pub async fn get_data(&self) -> Result<Vec<RowObject>> {
        let session = self.session("get_data")?;
        let table = self.read(&session.range).await?;
        Ok(sheet_to_array(&table))
    }

    /// Data rows keyed by `key`; later rows win on duplicate keys.
    pub async fn get_indexed<K, F>(&self, key: F) -> Result<IndexedCollection<K, RowObject>>
    where
        K: Eq + Hash,
        F: FnMut(&RowObject) -> K,
    {
        let session = self.session("get_indexed")?;
        let table = self.read(&session.range).await?;
        Ok(array_to_object(sheet_to_array(&table), key))
    }

    /// `key -> value` pairs derived from each data row.
    ///
    /// `value` also receives the 0-based position of the row among the data
    /// rows.
    pub async fn get_pairs<K, U, F, G>(&self, key: F, value: G) -> Result<IndexedCollection<K, U>>
    where
        K: Eq + Hash,
        F: FnMut(&RowObject) -> K,
        G: FnMut(&RowObject, usize) -> U,
    {
        let session = self.session("get_pairs")?;
        let table = self.read(&session.range).await?;
        Ok(sheet_to_object_with(&table, key, value))
    }

    /// Every data row decoded through `schema`.
    pub async fn get_typed<T: Default>(&self, schema: &Schema<T>) -> Result<Vec<Tagged<T>>> {
        let rows = self.get_data().await?;
        Ok(schema.decode_all(&rows))
    }

    /// Data rows decoded through `schema` and keyed by `key`.
    pub async fn get_indexed_typed<T, K, F>(
        &self,
        schema: &Schema<T>,
        key: F,
    ) -> Result<IndexedCollection<K, Tagged<T>>>
    where
        T: Default,
        K: Eq + Hash,
        F: FnMut(&Tagged<T>) -> K,
    {
        let rows = self.get_typed(schema).await?;
        Ok(array_to_object(rows, key))
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Append one row built from `(field, value)` pairs.
    ///
    /// Values are ordered by the column of their field in the header row.
    /// Fields missing from the header go last, in the order given. Values
    /// are sent densely: columns without a value do not leave gaps.
    pub async fn append<I, K, V>(&self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let session = self.session("append")?;
        let header = self.header_row(session).await?;
        let index = build_header_index(&header);

        let mut placed: Vec<(Option<usize>, String)> = fields
            .into_iter()
            .map(|(name, value)| {
                let name = field_name(name.as_ref());
                let column = index.get(&name);
                if column.is_none() {
                    tracing::warn!(field = %name, sheet = %session.title, "field not in header row");
                }
                (column, value.into())
            })
            .collect();
        placed.sort_by_key(|(column, _)| column.unwrap_or(usize::MAX));

        let values: Vec<String> = placed.into_iter().map(|(_, value)| value).collect();
        tracing::debug!(range = %session.range, cells = values.len(), "append row");
        self.client
            .append_row(&self.config.spreadsheet_id, &session.range, values)
            .await
    }

    /// Append a value through `schema`.
    pub async fn append_typed<T>(&self, schema: &Schema<T>, value: &T) -> Result<()> {
        self.append(schema.encode(value)).await
    }

    /// Overwrite one field of one row.
    pub async fn update(
        &self,
        row: impl Into<RowRef>,
        field: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        let session = self.session("update")?;
        let row = checked_row(row.into())?;
        let header = self.header_row(session).await?;

        let name = field_name(field);
        let column = build_header_index(&header)
            .get(&name)
            .ok_or_else(|| SheetError::FieldNotFound(field.to_string()))?;

        let target =
            RangeDescriptor::cell(&session.title, session.column(column), row.sheet_row()).to_string();
        tracing::debug!(range = %target, field = %name, "update cell");
        self.client
            .write_cell(&self.config.spreadsheet_id, &target, vec![vec![value.into()]])
            .await
    }

    /// Blank every cell of one row.
    ///
    /// The row itself stays in place, so the row numbers of later rows do
    /// not change.
    pub async fn delete(&self, row: impl Into<RowRef>) -> Result<()> {
        let session = self.session("delete")?;
        let row = checked_row(row.into())?;
        let header = self.header_row(session).await?;

        let sheet_row = row.sheet_row();
        let last = header.len().max(1) - 1;
        let target = RangeDescriptor::new(
            Some(session.title.clone()),
            CellRef::new(session.column(0), sheet_row),
            CellRef::new(session.column(last), sheet_row),
        )
        .to_string();
        tracing::debug!(range = %target, "clear row");
        self.client
            .clear_range(&self.config.spreadsheet_id, &target)
            .await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn session(&self, operation: &'static str) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or(SheetError::Uninitialized(operation))
    }

    async fn read(&self, range: &str) -> Result<RawTable> {
        tracing::debug!(range = %range, "read range");
        self.client
            .read_range(&self.config.spreadsheet_id, range)
            .await
    }

    async fn header_row(&self, session: &Session) -> Result<Vec<String>> {
        let table = self.read(&session.header_range).await?;
        Ok(table.into_iter().next().unwrap_or_default())
    }
}

/// Qualify an explicit range with the resolved sheet title
///
/// A range that names another sheet is rejected, since updates and deletes
/// always target the resolved sheet.
fn on_sheet(mut range: RangeDescriptor, title: &str) -> Result<RangeDescriptor> {
    if let Some(sheet) = range.sheet() {
        if sheet.to_lowercase() != title.to_lowercase() {
            return Err(SheetError::Configuration(format!(
                "range {} is not on sheet {}",
                range, title
            )));
        }
    }
    range.sheet = Some(title.to_string());
    Ok(range)
}

fn checked_row(row: RowRef) -> Result<RowRef> {
    if row.0 == 0 {
        Err(SheetError::InvalidRow(row.0))
    } else {
        Ok(row)
    }
}
