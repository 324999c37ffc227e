//! TokenProvider trait and AccessToken

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::AuthError;

/// A bearer token issued by the Kari API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The bearer token used for API authentication.
    pub access_token: String,
    /// Token type as reported by the API, normally `bearer`.
    pub token_type: String,
    /// When the token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Creates a bearer token with unknown expiry.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "bearer".to_string(),
            expires_at: None,
        }
    }

    /// Creates a new access token with expiration time.
    pub fn with_expiry(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            expires_at: Some(expires_at),
            ..Self::new(access_token)
        }
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Returns the token as a bearer authorization header value.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Source of bearer tokens for [`KariClient`](crate::KariClient).
///
/// The client asks for a token before every request and calls
/// [`invalidate`](TokenProvider::invalidate) when the API answers 401, so a
/// provider backed by a login session can drop the rejected credentials.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets a token for requests against `api_url`.
    async fn get_token(&self, api_url: &str) -> Result<AccessToken, AuthError>;

    /// Called after the API rejected the token. Default: nothing.
    fn invalidate(&self) {}
}

/// A simple token provider that always returns the same static token.
///
/// Useful for testing or when you have a long-lived token.
///
/// # Example
///
/// ```
/// use kari_admin_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("my-access-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(access_token),
        }
    }

    pub fn from_token(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self, _api_url: &str) -> Result<AccessToken, AuthError> {
        Ok(self.token.clone())
    }
}
