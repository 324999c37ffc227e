//! Kari admin dashboard core
//!
//! Read-only access to the Kari crowdfunding API plus the pieces the admin
//! dashboard is built from: a paged, sortable table engine, aggregation over
//! time buckets and categories, and the adapters that turn API entities into
//! table rows and badges.

pub mod adapters;
pub mod aggregate;
pub mod auth;
pub mod error;
pub mod model;
pub mod table;

mod client;

pub use client::*;
