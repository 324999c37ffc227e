//! Main KariClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Collection;
use crate::model::Record;
use crate::model::RecordId;
use crate::model::parse_collection;
use crate::model::types::Campaign;
use crate::model::types::Participant;
use crate::model::types::Testimonial;
use crate::model::types::User;
use crate::model::types::Vote;
use crate::model::types::Winner;

/// Base URL of the production API.
pub const PRODUCTION_API_URL: &str = "https://api.kariajuda.com/api/v1";

/// Base URL of a locally running API.
pub const LOCAL_API_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Request timeout used when the builder is not given one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Read-only client for the Kari REST API.
///
/// Every response body passes through
/// [`parse_collection`](crate::model::parse_collection) before it reaches the
/// caller, so malformed payloads surface as [`ApiError::Parse`] instead of
/// half-filled rows.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use kari_admin_lib::{KariClient, auth::StaticTokenProvider};
///
/// let client = KariClient::builder()
///     .url("http://127.0.0.1:8000/api/v1")
///     .token_provider(StaticTokenProvider::new("my-token"))
///     .build()?;
///
/// let campaigns = client.campaigns().await?;
/// ```
#[derive(Clone)]
pub struct KariClient {
    inner: Arc<KariClientInner>,
}

struct KariClientInner {
    base_url: String,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Duration,
}

impl KariClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> KariClientBuilder<Missing, Missing> {
        KariClientBuilder::new()
    }

    /// Returns the API base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Fetches a whole collection and validates it against `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, Error> {
        let body = self.get_json(collection.path()).await?;
        let items = parse_collection(collection, body)?;
        log::debug!("Fetched {} {}", items.len(), collection);
        Ok(items)
    }

    /// Fetches a collection as dynamic records.
    pub async fn fetch_records(&self, collection: Collection) -> Result<Vec<Record>, Error> {
        self.fetch(collection).await
    }

    pub async fn campaigns(&self) -> Result<Vec<Campaign>, Error> {
        self.fetch(Collection::Campaigns).await
    }

    pub async fn participants(&self) -> Result<Vec<Participant>, Error> {
        self.fetch(Collection::Participants).await
    }

    pub async fn votes(&self) -> Result<Vec<Vote>, Error> {
        self.fetch(Collection::Votes).await
    }

    pub async fn winners(&self) -> Result<Vec<Winner>, Error> {
        self.fetch(Collection::Winners).await
    }

    pub async fn testimonials(&self) -> Result<Vec<Testimonial>, Error> {
        self.fetch(Collection::Testimonials).await
    }

    pub async fn users(&self) -> Result<Vec<User>, Error> {
        self.fetch(Collection::Users).await
    }

    /// Votes cast in a single campaign.
    pub async fn campaign_votes(&self, campaign_id: &RecordId) -> Result<Vec<Vote>, Error> {
        let body = self
            .get_json(&format!("/campaigns/{}/votes/", campaign_id))
            .await?;
        Ok(parse_collection(Collection::Votes, body)?)
    }

    /// The account the current token belongs to.
    pub async fn me(&self) -> Result<User, Error> {
        let body = self.get_json("/users/me").await?;
        serde_json::from_value(body)
            .map_err(|e| Error::Api(ApiError::parse("users/me", e.to_string())))
    }

    /// Tells the API to end the session behind the current token.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.url("/auth/logout");
        let request = self.authorized(self.inner.http_client.post(&url)).await?;
        let response = request.send().await.map_err(ApiError::from)?;
        self.check_status(response).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    async fn authorized(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, Error> {
        let token = self
            .inner
            .token_provider
            .get_token(&self.inner.base_url)
            .await?;
        Ok(request
            .bearer_auth(&token.access_token)
            .timeout(self.inner.timeout))
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, Error> {
        let url = self.url(path);
        log::debug!("GET {}", url);

        let request = self.authorized(self.inner.http_client.get(&url)).await?;
        let response = request.send().await.map_err(ApiError::from)?;
        let body = self.check_status(response).await?;

        serde_json::from_str(&body)
            .map_err(|e| Error::Api(ApiError::parse(path.trim_matches('/'), e.to_string())))
    }

    /// Returns the body of a successful response.
    ///
    /// A 401 invalidates the token provider before the error is returned.
    async fn check_status(&self, response: reqwest::Response) -> Result<String, Error> {
        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        if status.is_success() {
            return Ok(body);
        }

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("API rejected the access token, clearing credentials");
            self.inner.token_provider.invalidate();
            return Err(Error::Api(ApiError::Unauthorized(body)));
        }

        Err(Error::Api(ApiError::http(status.as_u16(), body)))
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`KariClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The API base URL, e.g. `https://api.kariajuda.com/api/v1`
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct KariClientBuilder<Url, Provider> {
    url: Url,
    token_provider: Provider,
    timeout: Duration,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl KariClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for KariClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> KariClientBuilder<Missing, P> {
    /// Sets the API base URL.
    pub fn url(self, url: impl Into<String>) -> KariClientBuilder<Set<String>, P> {
        KariClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> KariClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> KariClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        self.shared_token_provider(Arc::new(provider))
    }

    /// Sets a token provider that is shared with other owners, e.g. a
    /// [`Session`](crate::auth::Session) clone.
    pub fn shared_token_provider(
        self,
        provider: Arc<dyn TokenProvider>,
    ) -> KariClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        KariClientBuilder {
            url: self.url,
            token_provider: Set(provider),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> KariClientBuilder<U, P> {
    /// Sets the request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl KariClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`KariClient`].
    ///
    /// Fails with [`ApiError::InvalidUrl`] when the base URL is not an
    /// absolute http(s) URL.
    pub fn build(self) -> Result<KariClient, ApiError> {
        let base_url = normalize_base_url(&self.url.0)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(KariClient {
            inner: Arc::new(KariClientInner {
                base_url,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let parsed = url::Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            raw,
            parsed.scheme()
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
