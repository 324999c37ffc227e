//! Authentication error types

/// Errors that can occur while logging in or resolving a token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid username or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No session is active.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Network error during authentication.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// The token endpoint answered with something unexpected.
    #[error("Auth response error (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Failed to parse authentication response.
    #[error("Auth response parse error: {0}")]
    Parse(String),
}
