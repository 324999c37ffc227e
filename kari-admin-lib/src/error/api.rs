//! API error types

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The API rejected the bearer token (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body did not match the expected schema.
    #[error("Response parse error in {collection}: {message}")]
    Parse {
        collection: String,
        message: String,
        /// Position of the offending element when the body is a collection.
        index: Option<usize>,
    },
}

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn parse(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            collection: collection.into(),
            message: message.into(),
            index: None,
        }
    }

    pub fn parse_at(
        collection: impl Into<String>,
        index: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            collection: collection.into(),
            message: message.into(),
            index: Some(index),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}
