//! Row abstraction

use crate::model::Record;
use crate::model::RecordId;
use crate::model::RowKey;
use crate::model::Value;

/// Anything the table engine can sort, filter and render.
///
/// The engine only ever reads rows; implementations must not hide interior
/// mutation behind these accessors.
pub trait TableRow {
    /// Identity of the row, if it has one.
    fn id(&self) -> Option<&RecordId>;

    /// Value of a field. `None` means the field does not exist.
    fn field(&self, key: &str) -> Option<&Value>;

    /// Rendering key: the id, or `position` within the current collection.
    fn row_key(&self, position: usize) -> RowKey {
        match self.id() {
            Some(id) => RowKey::Id(id.clone()),
            None => RowKey::Position(position),
        }
    }
}

impl TableRow for Record {
    fn id(&self) -> Option<&RecordId> {
        Record::id(self)
    }

    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl<T: TableRow + ?Sized> TableRow for &T {
    fn id(&self) -> Option<&RecordId> {
        (**self).id()
    }

    fn field(&self, key: &str) -> Option<&Value> {
        (**self).field(key)
    }
}
