//! Paged-table engine
//!
//! Pure building blocks ([`sort`], [`paginate`], [`clamp_page`],
//! [`compute_page_window`], [`render`], [`toggle_sort`]) plus
//! [`PagedTable`], which strings them together for a list page.
//!
//! Nothing in here fetches data or keeps rows between calls.

mod column;
mod filter;
mod page;
mod render;
mod row;
mod sort;
mod view;
mod window;

pub use column::*;
pub use filter::*;
pub use page::*;
pub use render::*;
pub use row::*;
pub use sort::*;
pub use view::*;
pub use window::*;
