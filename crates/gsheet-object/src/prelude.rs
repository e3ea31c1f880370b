//! Prelude module - common imports for gsheet-object users
//!
//! ```rust
//! use gsheet_object::prelude::*;
//! ```

#[cfg(feature = "rest")]
pub use crate::RestClient;
pub use crate::{
    // Accessor
    GoogleSheet,
    RowRef,
    SheetConfig,

    // Clients
    MemoryClient,
    SheetsClient,

    // Row mapping
    IndexedCollection,
    RowObject,
    Schema,
    Tagged,

    // Error types
    Result,
    SheetError,
};
