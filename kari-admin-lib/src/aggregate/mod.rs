//! Aggregation module
//!
//! Pure, deterministic transformations from flat entity collections to
//! chart-ready summaries. Nothing here does I/O or mutates its inputs.

mod activity;
mod buckets;
mod category;
mod stats;
mod tally;

pub use activity::*;
pub use buckets::*;
pub use category::*;
pub use stats::*;
pub use tally::*;
