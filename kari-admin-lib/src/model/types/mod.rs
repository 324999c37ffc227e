//! Typed API DTOs
//!
//! Each collection the dashboard consumes has a serde-derived DTO here. These
//! are the schema half of the parse boundary; see
//! [`parse_collection`](crate::model::parse_collection).

mod campaign;
mod participant;
mod testimonial;
mod timestamp;
mod user;
mod vote;
mod winner;

pub use campaign::*;
pub use participant::*;
pub use testimonial::*;
pub use user::*;
pub use vote::*;
pub use winner::*;
