//! A1-style range addresses (e.g. `Cities!A1:C10`, `'My Sheet'!B2`)

use crate::column::{column_to_letter, letter_to_column};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// One corner of a range
///
/// Both coordinates are 1-based, as displayed in a spreadsheet. A missing row
/// denotes a whole-column reference such as the `A` in `A:C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// Column index (1-based, A=1)
    pub column: usize,
    /// Row number (1-based), `None` for an unbounded column reference
    pub row: Option<usize>,
}

impl CellRef {
    /// Create a reference to a single cell
    pub fn new(column: usize, row: usize) -> Self {
        Self {
            column,
            row: Some(row),
        }
    }

    /// Create a whole-column reference
    pub fn column(column: usize) -> Self {
        Self { column, row: None }
    }

    /// Parse a reference from A1 notation (`B7`, `$B$7` or `B`)
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidRange("empty cell reference".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let col_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == col_start {
            return Err(Error::InvalidRange(format!("no column letters in '{}'", s)));
        }
        let column = letter_to_column(&s[col_start..pos])?;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let row_str = &s[pos..];
        if row_str.is_empty() {
            return Ok(Self::column(column));
        }

        let row: usize = row_str
            .parse()
            .map_err(|_| Error::InvalidRange(format!("invalid row number in '{}'", s)))?;
        if row == 0 {
            return Err(Error::InvalidRange(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self::new(column, row))
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        match self.row {
            Some(row) => format!("{}{}", column_to_letter(self.column), row),
            None => column_to_letter(self.column),
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

/// An addressable region of a sheet: `<sheet>!<start>:<end>`
///
/// The sheet part is optional; without it the service resolves the range
/// against the first sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeDescriptor {
    /// Sheet title, if the range is sheet-qualified
    pub sheet: Option<String>,
    /// Top-left corner
    pub start: CellRef,
    /// Bottom-right corner
    pub end: CellRef,
}

impl RangeDescriptor {
    /// Create a range, normalizing the corners so `start` is top-left
    pub fn new(sheet: Option<String>, start: CellRef, end: CellRef) -> Self {
        let (start_col, end_col) = if start.column <= end.column {
            (start.column, end.column)
        } else {
            (end.column, start.column)
        };
        let (start_row, end_row) = match (start.row, end.row) {
            (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
            rows => rows,
        };

        Self {
            sheet,
            start: CellRef {
                column: start_col,
                row: start_row,
            },
            end: CellRef {
                column: end_col,
                row: end_row,
            },
        }
    }

    /// The whole grid of a sheet: `A1:<last column><row count>`
    pub fn full(sheet: &str, column_count: usize, row_count: usize) -> Self {
        Self::new(
            Some(sheet.to_string()),
            CellRef::new(1, 1),
            CellRef::new(column_count, row_count),
        )
    }

    /// The header row of a sheet: `A1:<last column>1`
    pub fn header(sheet: &str, column_count: usize) -> Self {
        Self::row(sheet, 1, column_count)
    }

    /// One sheet row across the first `column_count` columns
    pub fn row(sheet: &str, row: usize, column_count: usize) -> Self {
        Self::new(
            Some(sheet.to_string()),
            CellRef::new(1, row),
            CellRef::new(column_count, row),
        )
    }

    /// A single cell
    pub fn cell(sheet: &str, column: usize, row: usize) -> Self {
        let cell = CellRef::new(column, row);
        Self {
            sheet: Some(sheet.to_string()),
            start: cell,
            end: cell,
        }
    }

    /// Parse a range from `Sheet!A1:B10`, `'My Sheet'!A:C`, `A1:B10` or `B3`
    ///
    /// # Examples
    /// ```
    /// use gsheet_object_core::{CellRef, RangeDescriptor};
    ///
    /// let range = RangeDescriptor::parse("'My Sheet'!A1:C10").unwrap();
    /// assert_eq!(range.sheet.as_deref(), Some("My Sheet"));
    /// assert_eq!(range.start, CellRef::new(1, 1));
    /// assert_eq!(range.end, CellRef::new(3, 10));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (sheet, cells) = split_sheet(s)?;

        if let Some(colon_pos) = cells.find(':') {
            let start = CellRef::parse(&cells[..colon_pos])?;
            let end = CellRef::parse(&cells[colon_pos + 1..])?;
            Ok(Self::new(sheet, start, end))
        } else {
            let cell = CellRef::parse(cells)?;
            Ok(Self {
                sheet,
                start: cell,
                end: cell,
            })
        }
    }

    /// Sheet title, if qualified
    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    /// Number of columns covered by the range
    ///
    /// A range built by hand with `end` left of `start` covers no columns.
    pub fn column_count(&self) -> usize {
        (self.end.column + 1).saturating_sub(self.start.column)
    }

    /// Number of rows covered, `None` for whole-column ranges
    pub fn row_count(&self) -> Option<usize> {
        match (self.start.row, self.end.row) {
            (Some(start), Some(end)) => Some((end + 1).saturating_sub(start)),
            _ => None,
        }
    }

    /// Format as `Sheet!A1:B10`, quoting the sheet title when required
    pub fn to_a1_string(&self) -> String {
        let cells = if self.start == self.end {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start, self.end)
        };

        match &self.sheet {
            Some(sheet) => format!("{}!{}", quote_sheet_name(sheet), cells),
            None => cells,
        }
    }
}

impl fmt::Display for RangeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for RangeDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Render a sheet title for use in an A1 range
///
/// Plain identifiers are left bare; anything else is wrapped in single quotes
/// with embedded quotes doubled.
pub fn quote_sheet_name(name: &str) -> String {
    let plain = !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_');

    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

fn split_sheet(s: &str) -> Result<(Option<String>, &str)> {
    if let Some(rest) = s.strip_prefix('\'') {
        let mut name = String::new();
        let mut chars = rest.char_indices();
        while let Some((i, c)) = chars.next() {
            if c != '\'' {
                name.push(c);
                continue;
            }
            // '' is an escaped quote inside the title
            if rest[i + 1..].starts_with('\'') {
                name.push('\'');
                chars.next();
                continue;
            }
            let after = &rest[i + 1..];
            return match after.strip_prefix('!') {
                Some(cells) => Ok((Some(name), cells)),
                None => Err(Error::InvalidRange(format!(
                    "expected '!' after sheet name in '{}'",
                    s
                ))),
            };
        }
        return Err(Error::InvalidRange(format!("unterminated sheet name in '{}'", s)));
    }

    match s.find('!') {
        Some(pos) => Ok((Some(s[..pos].to_string()), &s[pos + 1..])),
        None => Ok((None, s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_ref_parse() {
        assert_eq!(CellRef::parse("A1").unwrap(), CellRef::new(1, 1));
        assert_eq!(CellRef::parse("$C$12").unwrap(), CellRef::new(3, 12));
        assert_eq!(CellRef::parse("aa3").unwrap(), CellRef::new(27, 3));
        assert_eq!(CellRef::parse("D").unwrap(), CellRef::column(4));

        assert!(CellRef::parse("").is_err());
        assert!(CellRef::parse("12").is_err());
        assert!(CellRef::parse("A0").is_err());
        assert!(CellRef::parse("A1B").is_err());
    }

    #[test]
    fn test_range_parse() {
        let range = RangeDescriptor::parse("Cities!A1:C20").unwrap();
        assert_eq!(range.sheet(), Some("Cities"));
        assert_eq!(range.start, CellRef::new(1, 1));
        assert_eq!(range.end, CellRef::new(3, 20));
        assert_eq!(range.column_count(), 3);
        assert_eq!(range.row_count(), Some(20));

        let range = RangeDescriptor::parse("B2").unwrap();
        assert_eq!(range.sheet(), None);
        assert_eq!(range.start, range.end);

        let range = RangeDescriptor::parse("Data!A:D").unwrap();
        assert_eq!(range.row_count(), None);
        assert_eq!(range.column_count(), 4);

        // Corners are normalized
        let range = RangeDescriptor::parse("C5:A1").unwrap();
        assert_eq!(range.start, CellRef::new(1, 1));
        assert_eq!(range.end, CellRef::new(3, 5));
    }

    #[test]
    fn test_counts_of_unnormalized_range() {
        let range = RangeDescriptor {
            sheet: None,
            start: CellRef::new(3, 5),
            end: CellRef::new(1, 2),
        };
        assert_eq!(range.column_count(), 0);
        assert_eq!(range.row_count(), Some(0));

        let single = RangeDescriptor::cell("Cities", 2, 2);
        assert_eq!(single.column_count(), 1);
        assert_eq!(single.row_count(), Some(1));
    }

    #[test]
    fn test_range_parse_quoted_sheet() {
        let range = RangeDescriptor::parse("'Bob''s data'!B2:B3").unwrap();
        assert_eq!(range.sheet(), Some("Bob's data"));
        assert_eq!(range.start, CellRef::new(2, 2));

        assert!(RangeDescriptor::parse("'Open!A1").is_err());
        assert!(RangeDescriptor::parse("'Sheet'A1").is_err());
    }

    #[test]
    fn test_range_display() {
        assert_eq!(RangeDescriptor::full("Cities", 26, 1000).to_string(), "Cities!A1:Z1000");
        assert_eq!(RangeDescriptor::header("Cities", 27).to_string(), "Cities!A1:AA1");
        assert_eq!(RangeDescriptor::row("Cities", 4, 3).to_string(), "Cities!A4:C4");
        assert_eq!(RangeDescriptor::cell("Cities", 2, 3).to_string(), "Cities!B3");
        assert_eq!(
            RangeDescriptor::full("My Sheet", 2, 2).to_string(),
            "'My Sheet'!A1:B2"
        );
    }

    #[test]
    fn test_quote_sheet_name() {
        assert_eq!(quote_sheet_name("Sheet1"), "Sheet1");
        assert_eq!(quote_sheet_name("raw_data"), "raw_data");
        assert_eq!(quote_sheet_name("My Sheet"), "'My Sheet'");
        assert_eq!(quote_sheet_name("it's"), "'it''s'");
        assert_eq!(quote_sheet_name(""), "''");
    }

    #[test]
    fn test_display_parse_agree() {
        for text in ["Cities!A1:C20", "'My Sheet'!B2", "A:C", "'it''s'!A1:A9"] {
            let range = RangeDescriptor::parse(text).unwrap();
            assert_eq!(range.to_string(), text);
        }
    }
}
