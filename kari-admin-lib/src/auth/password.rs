//! OAuth2 password grant against the Kari API

use serde::Deserialize;

use super::AccessToken;
use crate::error::AuthError;

/// Path of the token endpoint, relative to the API base URL.
pub const TOKEN_PATH: &str = "/login/access-token";

/// OAuth2 Resource Owner Password Credentials flow.
///
/// Posts `username` and `password` form-encoded to
/// `{api_url}/login/access-token` and returns the issued bearer token.
///
/// # Example
///
/// ```ignore
/// use kari_admin_lib::auth::PasswordFlow;
///
/// let flow = PasswordFlow::new("http://127.0.0.1:8000/api/v1");
/// let token = flow.authenticate("admin@kariajuda.com", "secret").await?;
/// ```
#[derive(Debug, Clone)]
pub struct PasswordFlow {
    token_url: String,
    http_client: reqwest::Client,
}

impl PasswordFlow {
    pub fn new(api_url: &str) -> Self {
        Self::with_http_client(api_url, reqwest::Client::new())
    }

    pub fn with_http_client(api_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            token_url: format!("{}{}", api_url.trim_end_matches('/'), TOKEN_PATH),
            http_client,
        }
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Exchanges credentials for an access token.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AccessToken, AuthError> {
        log::debug!("Requesting access token from {}", self.token_url);

        let params = [
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await?;

        handle_response(response).await
    }
}

async fn handle_response(response: reqwest::Response) -> Result<AccessToken, AuthError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Parse(e.to_string()))?;
        return Ok(token.into_access_token());
    }

    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.detail_message())
        .unwrap_or(body);

    match status.as_u16() {
        400 | 401 => {
            log::debug!("Login rejected: {}", message);
            Err(AuthError::InvalidCredentials)
        }
        code => Err(AuthError::Rejected {
            status: code,
            message,
        }),
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl TokenResponse {
    fn into_access_token(self) -> AccessToken {
        AccessToken {
            access_token: self.access_token,
            token_type: self.token_type,
            expires_at: None,
        }
    }
}

/// Error body of the API, `{"detail": ...}`.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: serde_json::Value,
}

impl ErrorResponse {
    fn detail_message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_url() {
        let flow = PasswordFlow::new("http://127.0.0.1:8000/api/v1/");
        assert_eq!(
            flow.token_url(),
            "http://127.0.0.1:8000/api/v1/login/access-token"
        );
    }

    #[test]
    fn test_token_response() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token": "abc", "token_type": "bearer"}"#).unwrap();
        let token = token.into_access_token();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_at, None);
    }

    #[test]
    fn test_error_detail() {
        let err: ErrorResponse =
            serde_json::from_str(r#"{"detail": "Incorrect email or password"}"#).unwrap();
        assert_eq!(err.detail_message(), "Incorrect email or password");
    }
}
