//! View adapter errors

/// Errors raised while mapping API data into view shapes.
///
/// Callers are expected to catch these and render a visible fallback
/// (for example [`Badge::fallback`](crate::adapters::Badge::fallback)) instead of
/// failing the whole page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// A status or category string outside the closed taxonomy.
    #[error("unrecognized {kind} value '{value}'")]
    UnknownStatus { kind: &'static str, value: String },

    /// A field the adapter needs is absent.
    #[error("{entity} is missing required field '{field}'")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// An image path could not be joined onto the API origin.
    #[error("invalid image path '{0}'")]
    InvalidImagePath(String),
}

impl AdapterError {
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownStatus {
            kind,
            value: value.into(),
        }
    }

    /// The raw value that was not recognized, if this is an unknown-status error.
    pub fn raw_value(&self) -> Option<&str> {
        match self {
            Self::UnknownStatus { value, .. } => Some(value),
            _ => None,
        }
    }
}
