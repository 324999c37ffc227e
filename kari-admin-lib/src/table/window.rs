//! Page-window computation for pagination controls

use std::collections::BTreeSet;

/// Default number of pages shown on each side of the current page.
pub const DEFAULT_WINDOW_RADIUS: usize = 2;

/// One slot of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Pages to show in the pagination control.
///
/// Always includes the first and last page plus every page within `radius`
/// of `current_page`. Skipped runs collapse into a single ellipsis, so two
/// ellipses are never adjacent.
///
/// ```
/// use kari_admin_lib::table::{compute_page_window, PageMarker::*};
///
/// assert_eq!(
///     compute_page_window(5, 10, 2),
///     [Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6), Page(7), Ellipsis, Page(10)]
/// );
/// ```
pub fn compute_page_window(current_page: usize, total_pages: usize, radius: usize) -> Vec<PageMarker> {
    let total_pages = total_pages.max(1);
    let current = super::clamp_page(current_page, total_pages);

    let mut pages = BTreeSet::new();
    pages.insert(1);
    pages.insert(total_pages);
    let low = current.saturating_sub(radius).max(1);
    let high = current.saturating_add(radius).min(total_pages);
    pages.extend(low..=high);

    let mut window = Vec::with_capacity(pages.len() + 2);
    let mut previous: Option<usize> = None;
    for page in pages {
        if previous.is_some_and(|p| page - p > 1) {
            window.push(PageMarker::Ellipsis);
        }
        window.push(PageMarker::Page(page));
        previous = Some(page);
    }
    window
}

#[cfg(test)]
mod tests {
    use super::PageMarker::*;
    use super::*;

    #[test]
    fn test_middle_page() {
        assert_eq!(
            compute_page_window(5, 10, 2),
            [
                Page(1),
                Ellipsis,
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10)
            ]
        );
    }

    #[test]
    fn test_first_page_has_no_leading_ellipsis() {
        assert_eq!(
            compute_page_window(1, 10, 2),
            [Page(1), Page(2), Page(3), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_adjacent_window_touches_edges() {
        assert_eq!(
            compute_page_window(3, 5, 2),
            [Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn test_single_page() {
        assert_eq!(compute_page_window(1, 1, 2), [Page(1)]);
        assert_eq!(compute_page_window(1, 0, 2), [Page(1)]);
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        assert_eq!(
            compute_page_window(42, 4, 1),
            [Page(1), Ellipsis, Page(3), Page(4)]
        );
    }
}
