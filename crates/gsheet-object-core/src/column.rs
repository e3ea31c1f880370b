//! Column letter codec
//!
//! Spreadsheet columns are addressed with bijective base-26 letters: there is
//! no zero digit, so `A` is 1, `Z` is 26 and `AA` is 27. Column indices in this
//! module are 1-based; `0` stands for "no column" and renders as an empty
//! string.

use crate::error::{Error, Result};

/// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA, etc.)
///
/// `0` yields an empty string.
///
/// # Examples
/// ```
/// use gsheet_object_core::column_to_letter;
///
/// assert_eq!(column_to_letter(1), "A");
/// assert_eq!(column_to_letter(28), "AB");
/// assert_eq!(column_to_letter(0), "");
/// ```
pub fn column_to_letter(column: usize) -> String {
    let mut letters = Vec::new();
    let mut n = column;

    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - rem - 1) / 26;
    }

    letters.iter().rev().map(|&b| b as char).collect()
}

/// Convert column letters to a 1-based column index (A = 1, Z = 26, AA = 27, etc.)
///
/// Letters are case-insensitive and an empty string maps to `0`.
///
/// # Examples
/// ```
/// use gsheet_object_core::letter_to_column;
///
/// assert_eq!(letter_to_column("AA").unwrap(), 27);
/// assert_eq!(letter_to_column("ab").unwrap(), 28);
/// assert_eq!(letter_to_column("").unwrap(), 0);
/// assert!(letter_to_column("A1").is_err());
/// ```
pub fn letter_to_column(letters: &str) -> Result<usize> {
    let mut column: usize = 0;

    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidColumn(format!(
                "invalid column letter '{}' in '{}'",
                c, letters
            )));
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
        column = column
            .checked_mul(26)
            .and_then(|col| col.checked_add(digit))
            .ok_or_else(|| Error::InvalidColumn(format!("'{}' is too large", letters)))?;
    }

    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_letter() {
        assert_eq!(column_to_letter(0), "");
        assert_eq!(column_to_letter(1), "A");
        assert_eq!(column_to_letter(2), "B");
        assert_eq!(column_to_letter(26), "Z");
        assert_eq!(column_to_letter(27), "AA");
        assert_eq!(column_to_letter(52), "AZ");
        assert_eq!(column_to_letter(702), "ZZ");
        assert_eq!(column_to_letter(703), "AAA");
        assert_eq!(column_to_letter(16384), "XFD");
    }

    #[test]
    fn test_letter_to_column() {
        assert_eq!(letter_to_column("").unwrap(), 0);
        assert_eq!(letter_to_column("A").unwrap(), 1);
        assert_eq!(letter_to_column("Z").unwrap(), 26);
        assert_eq!(letter_to_column("AA").unwrap(), 27);
        assert_eq!(letter_to_column("ZZ").unwrap(), 702);
        assert_eq!(letter_to_column("AAA").unwrap(), 703);
        assert_eq!(letter_to_column("XFD").unwrap(), 16384);

        // Case insensitive
        assert_eq!(letter_to_column("a").unwrap(), 1);
        assert_eq!(letter_to_column("xfd").unwrap(), 16384);
    }

    #[test]
    fn test_letter_to_column_errors() {
        assert!(matches!(letter_to_column("A1"), Err(Error::InvalidColumn(_))));
        assert!(matches!(letter_to_column("$A"), Err(Error::InvalidColumn(_))));
        assert!(matches!(letter_to_column("É"), Err(Error::InvalidColumn(_))));
        // 20 Z's overflows a 64-bit index
        assert!(letter_to_column(&"Z".repeat(20)).is_err());
    }
}
