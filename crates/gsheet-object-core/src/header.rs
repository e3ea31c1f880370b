//! Header row mapping
//!
//! The first row of a sheet names its columns. Each header cell is turned into
//! a canonical camel-case field name (`"Last name"` becomes `lastName`), so the
//! same column can be addressed regardless of how its header is capitalized or
//! punctuated.

use ahash::AHashMap;
use std::iter;
use unicode_normalization::UnicodeNormalization;

/// Derive the canonical field name for a header cell
///
/// Latin letters are first stripped of diacritics (`"Prénom"` gives `prenom`,
/// `"Straße"` gives `strasse`). The text is then split into words on
/// punctuation and whitespace, on
/// lower-to-upper case transitions, before the last capital of an acronym that
/// runs into a capitalized word, and between letters and digits. Words are
/// lower-cased and joined with every word after the first capitalized.
///
/// # Examples
/// ```
/// use gsheet_object_core::field_name;
///
/// assert_eq!(field_name("FirstName"), "firstName");
/// assert_eq!(field_name("Last name"), "lastName");
/// assert_eq!(field_name("__FOO_BAR__"), "fooBar");
/// assert_eq!(field_name("XMLHttpRequest"), "xmlHttpRequest");
/// ```
pub fn field_name(header: &str) -> String {
    let mut out = String::with_capacity(header.len());

    for (i, word) in words(&deburr(header)).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Digit,
    Upper,
    Lower,
}

fn classify(c: char) -> CharClass {
    if c.is_numeric() {
        CharClass::Digit
    } else if c.is_uppercase() {
        CharClass::Upper
    } else {
        CharClass::Lower
    }
}

/// Split header text into words
fn words(text: &str) -> Vec<String> {
    let mut words = Vec::new();

    for chunk in text
        .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|chunk| chunk.replace(['\'', '\u{2019}'], ""))
        .filter(|chunk| !chunk.is_empty())
    {
        let chars: Vec<char> = chunk.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            if i > 0 {
                let prev = classify(chars[i - 1]);
                let cur = classify(c);
                let next = chars.get(i + 1).map(|&n| classify(n));

                let boundary = match (prev, cur) {
                    (CharClass::Digit, CharClass::Digit) => false,
                    (CharClass::Digit, _) | (_, CharClass::Digit) => true,
                    (CharClass::Lower, CharClass::Upper) => true,
                    (CharClass::Upper, CharClass::Upper) => next == Some(CharClass::Lower),
                    _ => false,
                };

                if boundary {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }
        words.push(current);
    }

    merge_ordinals(words)
}

/// Keep `1st`, `22nd`, `11st` together as single words
fn merge_ordinals(words: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(words.len());

    for word in words {
        if let Some(prev) = merged.last_mut() {
            if is_ordinal_suffix(prev, &word) {
                prev.push_str(&word);
                continue;
            }
        }
        merged.push(word);
    }

    merged
}

/// The suffix is chosen by the last digit alone, so `11th` is not an ordinal
/// but `11st` is. It must be all lower or all upper case.
fn is_ordinal_suffix(digits: &str, suffix: &str) -> bool {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let expected = match digits.as_bytes()[digits.len() - 1] {
        b'1' => "st",
        b'2' => "nd",
        b'3' => "rd",
        _ => "th",
    };
    suffix == expected || suffix == expected.to_ascii_uppercase()
}

/// Strip diacritics from Latin letters
///
/// Letters of the Latin-1 Supplement and Latin Extended-A blocks are reduced
/// to their base letters, ligatures and letters without a decomposition are
/// spelled out, and combining marks are dropped. Other characters pass
/// through unchanged.
fn deburr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        if is_combining_mark(c) {
            continue;
        }
        if let Some(spelled) = spelled_letter(c) {
            out.push_str(spelled);
        } else if is_latin_letter(c) {
            out.extend(iter::once(c).nfd().filter(|d| !is_combining_mark(*d)));
        } else {
            out.push(c);
        }
    }

    out
}

fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036f}' | '\u{fe20}'..='\u{fe2f}' | '\u{20d0}'..='\u{20ff}')
}

fn is_latin_letter(c: char) -> bool {
    matches!(c, '\u{c0}'..='\u{d6}' | '\u{d8}'..='\u{f6}' | '\u{f8}'..='\u{17f}')
}

fn spelled_letter(c: char) -> Option<&'static str> {
    let spelled = match c {
        'Æ' => "Ae",
        'æ' => "ae",
        'Ð' | 'Đ' => "D",
        'ð' | 'đ' => "d",
        'Ø' => "O",
        'ø' => "o",
        'Þ' => "Th",
        'þ' => "th",
        'ß' => "ss",
        'Ħ' => "H",
        'ħ' => "h",
        'ı' => "i",
        'Ĳ' => "IJ",
        'ĳ' => "ij",
        'ĸ' => "k",
        'Ŀ' | 'Ł' => "L",
        'ŀ' | 'ł' => "l",
        'ŉ' => "'n",
        'Ŋ' => "N",
        'ŋ' => "n",
        'Œ' => "Oe",
        'œ' => "oe",
        'ſ' => "s",
        'Ŧ' => "T",
        'ŧ' => "t",
        _ => return None,
    };
    Some(spelled)
}

/// Lookup from canonical field name to 0-based column position
///
/// Built from a raw header row. When two header cells canonicalize to the same
/// field name, the later column wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    columns: AHashMap<String, usize>,
    width: usize,
}

impl HeaderIndex {
    /// Get the 0-based column of a field
    pub fn get(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// Check whether a field is present
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Number of distinct field names
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the header row was empty
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of header cells the index was built from, duplicates included
    pub fn width(&self) -> usize {
        self.width
    }

    /// Iterate over `(field name, column)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.columns.iter().map(|(name, &col)| (name.as_str(), col))
    }
}

/// Build a [`HeaderIndex`] from a raw header row
pub fn build_header_index<S: AsRef<str>>(raw_header_row: &[S]) -> HeaderIndex {
    let mut columns = AHashMap::with_capacity(raw_header_row.len());
    for (col, header) in raw_header_row.iter().enumerate() {
        columns.insert(field_name(header.as_ref()), col);
    }

    HeaderIndex {
        columns,
        width: raw_header_row.len(),
    }
}

/// Find the first column whose header canonicalizes to `name`
pub fn name_to_column<S: AsRef<str>>(headers: &[S], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| field_name(header.as_ref()) == name)
}

/// Canonical field name of the header at a 0-based column
pub fn column_to_name<S: AsRef<str>>(headers: &[S], column: usize) -> Option<String> {
    headers.get(column).map(|header| field_name(header.as_ref()))
}
