//! Pagination

use crate::error::TableError;

/// Page size used when none is configured.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Current page and page size.
///
/// `current_page` is 1-based. Both values are validated on construction so a
/// zero page size can never reach [`paginate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    items_per_page: usize,
}

impl PageState {
    pub fn new(current_page: usize, items_per_page: usize) -> Result<Self, TableError> {
        if items_per_page == 0 {
            return Err(TableError::InvalidPageSize);
        }
        if current_page == 0 {
            return Err(TableError::InvalidPage(current_page));
        }
        Ok(Self {
            current_page,
            items_per_page,
        })
    }

    /// First page with the given size.
    pub fn first(items_per_page: usize) -> Result<Self, TableError> {
        Self::new(1, items_per_page)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Number of pages needed for `total_items`; never less than 1.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.items_per_page).max(1)
    }

    /// Same size, current page clamped to what `total_items` can show.
    pub fn clamped(self, total_items: usize) -> Self {
        Self {
            current_page: clamp_page(self.current_page, self.total_pages(total_items)),
            ..self
        }
    }

    /// Same size, different page. Zero is rejected like in [`PageState::new`].
    pub fn with_page(self, page: usize) -> Result<Self, TableError> {
        Self::new(page, self.items_per_page)
    }

    /// Same size, different page; zero becomes the first page.
    pub fn at_page(self, page: usize) -> Self {
        Self {
            current_page: page.max(1),
            ..self
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// One page of an ordered collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 0-based index of the first item.
    pub start_index: usize,
    /// 0-based index one past the last item.
    pub end_index: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    /// `true` when the whole collection is empty.
    ///
    /// This is the signal for showing the "no data" message instead of an
    /// empty table.
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

/// Slices out the page described by `state`.
///
/// The page must already be clamped (see [`clamp_page`]); a page past the end
/// is a [`TableError::PageOutOfRange`] rather than a silent adjustment. An
/// empty collection has exactly one, empty, page.
pub fn paginate<'a, T>(ordered: &'a [T], state: &PageState) -> Result<Page<'a, T>, TableError> {
    let total_items = ordered.len();
    let total_pages = state.total_pages(total_items);

    if state.current_page > total_pages {
        return Err(TableError::PageOutOfRange {
            page: state.current_page,
            total_pages,
        });
    }

    let start_index = (state.current_page - 1) * state.items_per_page;
    let end_index = (start_index + state.items_per_page).min(total_items);

    Ok(Page {
        items: &ordered[start_index..end_index],
        start_index,
        end_index,
        total_pages,
        total_items,
    })
}

/// `max(1, min(requested, total_pages))`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.min(total_pages).max(1)
}
