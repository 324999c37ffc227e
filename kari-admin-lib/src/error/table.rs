//! Paged-table contract violations

/// Errors raised by the paged-table engine.
///
/// Every variant is a caller programming error. The engine never substitutes
/// a default for them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// `items_per_page` must be greater than zero.
    #[error("items per page must be greater than zero")]
    InvalidPageSize,

    /// Pages are numbered from 1.
    #[error("page numbers start at 1, got {0}")]
    InvalidPage(usize),

    /// The requested page starts past the end of the collection.
    ///
    /// Callers clamp with [`clamp_page`](crate::table::clamp_page) before paginating.
    #[error("page {page} is out of range (total pages: {total_pages})")]
    PageOutOfRange { page: usize, total_pages: usize },

    /// The sort column is not one of the table's columns.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// The column exists but is not sortable.
    #[error("column '{0}' is not sortable")]
    NotSortable(String),
}
