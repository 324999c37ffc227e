//! Error types

mod adapter;
mod aggregate;
mod api;
mod auth;
mod field;
mod table;

pub use adapter::*;
pub use aggregate::*;
pub use api::*;
pub use auth::*;
pub use field::*;
pub use table::*;

/// Top-level error for operations that cross several concerns.
///
/// Pure table and aggregation calls return their own narrower error types;
/// this enum is what the client and session hand back to page-level callers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl Error {
    /// Returns `true` if the API rejected the current credentials.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Api(err) => err.is_unauthorized(),
            Self::Auth(AuthError::NotAuthenticated) => true,
            _ => false,
        }
    }
}
