//! Typed views over row objects
//!
//! A [`Schema`] is an ordered list of field bindings for a user type: for each
//! field, how to read its text out of a value and how to store text into one.
//! Binding names go through the same canonicalization as header cells, so
//! `"Country Name"` and `"countryName"` bind the same column.
//!
//! ```
//! use gsheet_object_core::{RowObject, Schema};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct City {
//!     city: String,
//!     country: Option<String>,
//! }
//!
//! let schema = Schema::<City>::builder()
//!     .field("City", |c| c.city.as_str(), |c, v| c.city = v)
//!     .optional("Country Name", |c| c.country.as_deref(), |c, v| c.country = Some(v))
//!     .build();
//!
//! let mut row = RowObject::default();
//! row.row_number = 3;
//! row.fields.insert("city".into(), "Paris".into());
//!
//! let city = schema.decode(&row);
//! assert_eq!(city.row_number, 3);
//! assert_eq!(city.value, City { city: "Paris".into(), country: None });
//! assert_eq!(schema.encode(&city), vec![("city".to_string(), "Paris".to_string())]);
//! ```

use crate::header::field_name;
use crate::row::RowObject;
use std::fmt;
use std::ops::{Deref, DerefMut};

type Getter<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, String) + Send + Sync>;

struct Binding<T> {
    name: String,
    get: Getter<T>,
    set: Setter<T>,
}

/// A user value decoded from a sheet row, with the row it came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tagged<T> {
    /// 1-based offset of the source row below the header
    pub row_number: usize,
    /// The decoded value
    pub value: T,
}

impl<T> Tagged<T> {
    /// Wrap a value with its row number
    pub fn new(row_number: usize, value: T) -> Self {
        Self { row_number, value }
    }

    /// Discard the row number
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for Tagged<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for Tagged<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

/// Ordered field bindings between a user type and sheet columns
pub struct Schema<T> {
    bindings: Vec<Binding<T>>,
}

impl<T> Schema<T> {
    /// Start building a schema
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder {
            bindings: Vec::new(),
        }
    }

    /// Canonical field names in binding order
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.bindings.iter().map(|b| b.name.as_str())
    }

    /// Number of bound fields
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if no fields are bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Extract `(field name, value)` pairs in binding order
    ///
    /// Optional fields that are `None` are left out.
    pub fn encode(&self, value: &T) -> Vec<(String, String)> {
        self.bindings
            .iter()
            .filter_map(|b| (b.get)(value).map(|text| (b.name.clone(), text)))
            .collect()
    }
}

impl<T: Default> Schema<T> {
    /// Build a value from a row object
    ///
    /// Starts from `T::default()` and applies every bound field present in the
    /// row. Absent fields keep their default.
    pub fn decode(&self, row: &RowObject) -> Tagged<T> {
        let mut value = T::default();
        for binding in &self.bindings {
            if let Some(text) = row.get(&binding.name) {
                (binding.set)(&mut value, text.to_string());
            }
        }
        Tagged::new(row.row_number, value)
    }

    /// Decode every row, keeping order
    pub fn decode_all<'a>(&self, rows: impl IntoIterator<Item = &'a RowObject>) -> Vec<Tagged<T>> {
        rows.into_iter().map(|row| self.decode(row)).collect()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Schema`]
pub struct SchemaBuilder<T> {
    bindings: Vec<Binding<T>>,
}

impl<T> SchemaBuilder<T> {
    /// Bind a required text field
    pub fn field<G, S>(self, name: &str, get: G, set: S) -> Self
    where
        G: for<'a> Fn(&'a T) -> &'a str + Send + Sync + 'static,
        S: Fn(&mut T, String) + Send + Sync + 'static,
    {
        self.bind(name, Box::new(move |v| Some(get(v).to_string())), Box::new(set))
    }

    /// Bind an optional text field; `None` is not written on append
    pub fn optional<G, S>(self, name: &str, get: G, set: S) -> Self
    where
        G: for<'a> Fn(&'a T) -> Option<&'a str> + Send + Sync + 'static,
        S: Fn(&mut T, String) + Send + Sync + 'static,
    {
        self.bind(name, Box::new(move |v| get(v).map(str::to_string)), Box::new(set))
    }

    fn bind(mut self, name: &str, get: Getter<T>, set: Setter<T>) -> Self {
        let name = field_name(name);
        // Rebinding a name replaces the earlier binding in place
        if let Some(existing) = self.bindings.iter_mut().find(|b| b.name == name) {
            existing.get = get;
            existing.set = set;
        } else {
            self.bindings.push(Binding { name, get, set });
        }
        self
    }

    /// Finish the schema
    pub fn build(self) -> Schema<T> {
        Schema {
            bindings: self.bindings,
        }
    }
}
