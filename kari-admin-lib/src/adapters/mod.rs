//! Read-only view adapters
//!
//! Map API DTOs into the rows and taxonomies the table engine and the
//! aggregation module work with, and hold the pt-BR display policy.

mod columns;
mod format;
mod image_url;
mod relative;
mod rows;
mod status;

pub use columns::*;
pub use format::*;
pub use image_url::*;
pub use relative::*;
pub use rows::*;
pub use status::*;
