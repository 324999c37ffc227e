//! Stateful table: the UI state of one list page

use super::Cell;
use super::ColumnSpec;
use super::ColumnWidth;
use super::DEFAULT_WINDOW_RADIUS;
use super::Direction;
use super::Filter;
use super::PageMarker;
use super::PageState;
use super::RenderedRow;
use super::SortState;
use super::TableRow;
use super::compute_page_window;
use super::paginate;
use super::render;
use super::sort;
use super::toggle_sort;
use crate::error::TableError;

/// Message shown when there is nothing to list.
pub const DEFAULT_EMPTY_MESSAGE: &str = "Nenhum dado encontrado";

/// A header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    /// Header text, with an arrow appended when the column is sorted.
    pub text: String,
    pub sortable: bool,
    pub sorted: Option<Direction>,
    pub width: Option<ColumnWidth>,
}

/// Output of [`PagedTable::view`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    /// Nothing survived the filter.
    Empty { message: String },
    Rows {
        headers: Vec<HeaderCell>,
        rows: Vec<RenderedRow>,
        window: Vec<PageMarker>,
        current_page: usize,
        total_pages: usize,
        /// "Mostrando 11 a 20 de 23 resultados"
        summary: String,
    },
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

/// The paged, sortable, filterable table behind every list page.
///
/// Holds only UI state: columns, filter, sort and page. Rows are passed to
/// [`view`](PagedTable::view) on every call and never retained.
///
/// # Example
///
/// ```
/// use kari_admin_lib::model::Record;
/// use kari_admin_lib::table::{ColumnSpec, PagedTable, TableView};
///
/// let records: Vec<Record> = (1..=23)
///     .map(|i| Record::with_id(i as i64).set("votes", i as i64))
///     .collect();
///
/// let mut table = PagedTable::new(vec![ColumnSpec::new("votes", "Votos").sortable()]);
/// table.toggle_sort("votes").unwrap();
/// table.toggle_sort("votes").unwrap();
/// table.go_to_page(3);
///
/// match table.view(&records).unwrap() {
///     TableView::Rows { rows, summary, .. } => {
///         assert_eq!(rows.len(), 3);
///         assert_eq!(summary, "Mostrando 21 a 23 de 23 resultados");
///     }
///     TableView::Empty { .. } => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PagedTable<T> {
    columns: Vec<ColumnSpec<T>>,
    filter: Filter,
    sort: SortState,
    page: PageState,
    window_radius: usize,
    empty_message: String,
    /// Page count seen by the last `view`, used to clamp `go_to_page`.
    known_total_pages: Option<usize>,
}

impl<T: TableRow> PagedTable<T> {
    pub fn new(columns: Vec<ColumnSpec<T>>) -> Self {
        Self {
            columns,
            filter: Filter::new(),
            sort: SortState::none(),
            page: PageState::default(),
            window_radius: DEFAULT_WINDOW_RADIUS,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            known_total_pages: None,
        }
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Result<Self, TableError> {
        self.set_items_per_page(items_per_page)?;
        Ok(self)
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.set_filter(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortState) -> Result<Self, TableError> {
        if let Some(column) = sort.column.as_deref() {
            self.sortable_column(column)?;
        }
        self.sort = sort;
        Ok(self)
    }

    pub fn with_window_radius(mut self, radius: usize) -> Self {
        self.window_radius = radius;
        self
    }

    pub fn columns(&self) -> &[ColumnSpec<T>] {
        &self.columns
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Header click. Fails for columns that do not exist or cannot be sorted.
    pub fn toggle_sort(&mut self, column: &str) -> Result<(), TableError> {
        self.sortable_column(column)?;
        self.sort = toggle_sort(&self.sort, column);
        Ok(())
    }

    /// Moves to `page`, clamped to the pages the last view had.
    pub fn go_to_page(&mut self, page: usize) {
        let page = match self.known_total_pages {
            Some(total) => super::clamp_page(page, total),
            None => page.max(1),
        };
        self.page = self.page.at_page(page);
    }

    /// Changes the page size and re-clamps the current page.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> Result<(), TableError> {
        self.page = PageState::new(self.page.current_page(), items_per_page)?;
        self.known_total_pages = None;
        Ok(())
    }

    /// Replaces the filter and goes back to the first page.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.go_to_first_page();
    }

    /// Updates the search term and goes back to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.set_search(term);
        self.go_to_first_page();
    }

    /// Runs filter, sort, clamp, paginate and render over `rows`.
    ///
    /// A search term without search fields is matched against every column.
    ///
    /// The current page is clamped against the filtered collection and the
    /// clamped value is kept.
    pub fn view(&mut self, rows: &[T]) -> Result<TableView, TableError> {
        let column_search;
        let filter = if self.filter.has_search_fields() {
            &self.filter
        } else {
            column_search = self
                .filter
                .clone()
                .search_in(self.columns.iter().map(|c| c.key()));
            &column_search
        };
        let filtered = filter.apply(rows);
        if filtered.is_empty() {
            self.page = self.page.clamped(0);
            self.known_total_pages = Some(1);
            return Ok(TableView::Empty {
                message: self.empty_message.clone(),
            });
        }

        let ordered = sort(&filtered, &self.sort);
        self.page = self.page.clamped(ordered.len());

        let page = paginate(&ordered, &self.page)?;
        self.known_total_pages = Some(page.total_pages);

        let flattened: Vec<&T> = page.items.iter().map(|row| **row).collect();
        let page = super::Page {
            items: flattened.as_slice(),
            start_index: page.start_index,
            end_index: page.end_index,
            total_pages: page.total_pages,
            total_items: page.total_items,
        };

        Ok(TableView::Rows {
            headers: self.headers(),
            rows: render(&page, &self.columns),
            window: compute_page_window(
                self.page.current_page(),
                page.total_pages,
                self.window_radius,
            ),
            current_page: self.page.current_page(),
            total_pages: page.total_pages,
            summary: format!(
                "Mostrando {} a {} de {} resultados",
                page.start_index + 1,
                page.end_index,
                page.total_items
            ),
        })
    }

    fn headers(&self) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .map(|column| {
                let sorted = self.sort.direction_for(column.key());
                let text = match sorted {
                    Some(direction) => format!("{} {}", column.header(), direction.arrow()),
                    None => column.header().to_string(),
                };
                HeaderCell {
                    key: column.key().to_string(),
                    text,
                    sortable: column.is_sortable(),
                    sorted,
                    width: column.width_hint(),
                }
            })
            .collect()
    }

    fn sortable_column(&self, key: &str) -> Result<&ColumnSpec<T>, TableError> {
        let column = self
            .columns
            .iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| TableError::UnknownColumn(key.to_string()))?;
        if !column.is_sortable() {
            return Err(TableError::NotSortable(key.to_string()));
        }
        Ok(column)
    }

    fn go_to_first_page(&mut self) {
        self.page = self.page.at_page(1);
    }
}

/// Plain-text form of a cell row, handy for logs and snapshots.
pub fn row_texts(cells: &[Cell]) -> Vec<&str> {
    cells.iter().map(|c| c.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn columns() -> Vec<ColumnSpec<Record>> {
        vec![
            ColumnSpec::new("name", "Nome").sortable(),
            ColumnSpec::new("votes", "Votos").sortable(),
            ColumnSpec::new("email", "E-mail"),
        ]
    }

    fn records(n: i64) -> Vec<Record> {
        (1..=n)
            .map(|i| {
                Record::with_id(i)
                    .set("name", format!("Pessoa {:02}", i))
                    .set("votes", i % 4)
            })
            .collect()
    }

    #[test]
    fn test_toggle_sort_validates_column() {
        let mut table = PagedTable::new(columns());
        assert_eq!(
            table.toggle_sort("phone"),
            Err(TableError::UnknownColumn("phone".into()))
        );
        assert_eq!(
            table.toggle_sort("email"),
            Err(TableError::NotSortable("email".into()))
        );
        assert!(table.toggle_sort("votes").is_ok());
        assert_eq!(table.sort_state(), &SortState::asc("votes"));
    }

    #[test]
    fn test_empty_view_carries_message() {
        let mut table = PagedTable::new(columns()).with_empty_message("Nenhum participante");
        assert_eq!(
            table.view(&[]).unwrap(),
            TableView::Empty {
                message: "Nenhum participante".into()
            }
        );

        let mut table = PagedTable::new(columns())
            .with_filter(Filter::new().search_in(["name"]).search("ninguém"));
        match table.view(&records(5)).unwrap() {
            TableView::Empty { message } => assert_eq!(message, DEFAULT_EMPTY_MESSAGE),
            other => panic!("expected empty view, got {other:?}"),
        }
    }

    #[test]
    fn test_page_is_clamped_when_collection_shrinks() {
        let mut table = PagedTable::new(columns());
        table.go_to_page(3);
        assert!(table.view(&records(23)).is_ok());
        assert_eq!(table.page_state().current_page(), 3);

        table.view(&records(12)).unwrap();
        assert_eq!(table.page_state().current_page(), 2);
    }

    #[test]
    fn test_go_to_page_clamps_to_known_pages() {
        let mut table = PagedTable::new(columns());
        table.view(&records(23)).unwrap();
        table.go_to_page(99);
        assert_eq!(table.page_state().current_page(), 3);
        table.go_to_page(0);
        assert_eq!(table.page_state().current_page(), 1);
    }

    #[test]
    fn test_headers_mark_sorted_column() {
        let mut table = PagedTable::new(columns());
        table.toggle_sort("votes").unwrap();
        table.toggle_sort("votes").unwrap();
        let TableView::Rows { headers, rows, .. } = table.view(&records(8)).unwrap() else {
            panic!("expected rows");
        };
        assert_eq!(headers[1].text, "Votos ↓");
        assert_eq!(headers[0].text, "Nome");
        // 3, 7 have three votes and keep their input order
        assert_eq!(row_texts(&rows[0].cells), ["Pessoa 03", "3", "-"]);
        assert_eq!(row_texts(&rows[1].cells), ["Pessoa 07", "3", "-"]);
    }

    #[test]
    fn test_filter_resets_page() {
        let mut table = PagedTable::new(columns()).with_filter(Filter::new().search_in(["name"]));
        table.view(&records(30)).unwrap();
        table.go_to_page(3);
        table.set_search("pessoa 1");
        assert_eq!(table.page_state().current_page(), 1);
        let TableView::Rows { summary, .. } = table.view(&records(30)).unwrap() else {
            panic!("expected rows");
        };
        assert_eq!(summary, "Mostrando 1 a 10 de 10 resultados");
    }

    #[test]
    fn test_search_without_fields_uses_column_keys() {
        let rows = records(30);
        let mut table = PagedTable::new(columns());
        table.set_search("pessoa 2");
        let TableView::Rows { summary, .. } = table.view(&rows).unwrap() else {
            panic!("expected rows");
        };
        // Pessoa 20 to Pessoa 29
        assert_eq!(summary, "Mostrando 1 a 10 de 10 resultados");

        // Explicit search fields still restrict the search.
        let mut table = PagedTable::new(columns()).with_filter(Filter::new().search_in(["email"]));
        table.set_search("pessoa 2");
        assert!(table.view(&rows).unwrap().is_empty());
    }

    #[test]
    fn test_zero_items_per_page_is_rejected() {
        assert_eq!(
            PagedTable::new(columns()).with_items_per_page(0).err(),
            Some(TableError::InvalidPageSize)
        );
    }
}
