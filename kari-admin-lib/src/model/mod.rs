//! Record model and the API parse boundary
//!
//! Raw JSON never travels past this module: collections are either parsed
//! into the typed DTOs in [`types`] or into dynamic [`Record`]s whose values
//! are already normalized.

mod collection;
mod record;
mod record_serde;
pub mod types;
mod value;

pub use collection::*;
pub use record::*;
pub use record_serde::json_value_to_value;
pub use record_serde::parse_timestamp;
pub use value::*;

/// Conversion of a typed DTO into a dynamic record for the table engine.
pub trait IntoRecord {
    fn into_record(self) -> Record;
}

impl IntoRecord for Record {
    fn into_record(self) -> Record {
        self
    }
}

/// Converts a whole collection.
pub fn into_records<T: IntoRecord>(items: impl IntoIterator<Item = T>) -> Vec<Record> {
    items.into_iter().map(IntoRecord::into_record).collect()
}
