//! Cell rendering

use super::Cell;
use super::ColumnSpec;
use super::Page;
use super::TableRow;
use crate::model::RowKey;

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub key: RowKey,
    pub cells: Vec<Cell>,
}

/// Renders the rows of a page.
///
/// Each cell is the column's render function applied to the row, or the raw
/// field coerced to a string, with `"-"` for null, missing and empty values.
/// Row keys fall back to the row's position in the whole collection.
pub fn render<T: TableRow>(page: &Page<'_, &T>, columns: &[ColumnSpec<T>]) -> Vec<RenderedRow> {
    page.items
        .iter()
        .enumerate()
        .map(|(offset, row)| RenderedRow {
            key: row.row_key(page.start_index + offset),
            cells: columns.iter().map(|column| render_cell(*row, column)).collect(),
        })
        .collect()
}

/// Renders a single cell.
pub fn render_cell<T: TableRow>(row: &T, column: &ColumnSpec<T>) -> Cell {
    if let Some(project) = column.render_fn() {
        return project(row);
    }
    match row.field(column.key()) {
        Some(value) if !value.is_blank() => Cell::plain(value.to_string()),
        _ => Cell::empty(),
    }
}
