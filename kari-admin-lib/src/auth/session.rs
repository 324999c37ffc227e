//! Login session

use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use super::AccessToken;
use super::PasswordFlow;
use super::StaticTokenProvider;
use super::TokenProvider;
use crate::KariClient;
use crate::error::AuthError;
use crate::error::Error;
use crate::model::types::User;

/// Who is logged in, as shown in the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            name: user.display_name().to_string(),
            email: user.email.clone(),
            is_admin: user.is_superuser || user.role_key() == "admin",
        }
    }
}

/// Persistable form of a [`Session`].
///
/// Only plain fields, so it can be written with any serde format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub token: AccessToken,
    pub user: CurrentUser,
}

/// An admin login session.
///
/// The session owns the bearer token and the profile of the logged-in user.
/// It is a [`TokenProvider`]: hand a clone to
/// [`KariClientBuilder::shared_token_provider`](crate::KariClientBuilder::shared_token_provider)
/// and a 401 from any request logs the session out.
///
/// Cheap to clone; clones share state.
///
/// # Example
///
/// ```ignore
/// use kari_admin_lib::auth::Session;
///
/// let session = Session::new("http://127.0.0.1:8000/api/v1");
/// let user = session.login("admin@kariajuda.com", "secret").await?;
/// println!("Logged in as {}", user.name);
/// ```
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    api_url: String,
    flow: PasswordFlow,
    state: RwLock<Option<SessionSnapshot>>,
}

impl Session {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        Self {
            inner: Arc::new(SessionInner {
                flow: PasswordFlow::new(&api_url),
                api_url,
                state: RwLock::new(None),
            }),
        }
    }

    /// Creates a session that is already logged in.
    pub fn restore(api_url: impl Into<String>, snapshot: SessionSnapshot) -> Self {
        let session = Self::new(api_url);
        session.set_state(Some(snapshot));
        session
    }

    pub fn api_url(&self) -> &str {
        &self.inner.api_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_some()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.read_state().map(|s| s.user)
    }

    /// State to persist between runs, `None` when logged out.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.read_state()
    }

    /// Exchanges credentials for a token and loads the user's profile.
    ///
    /// On failure the session is left logged out.
    pub async fn login(&self, username: &str, password: &str) -> Result<CurrentUser, Error> {
        self.set_state(None);

        let token = self.inner.flow.authenticate(username, password).await?;

        let client = KariClient::builder()
            .url(self.inner.api_url.clone())
            .token_provider(StaticTokenProvider::from_token(token.clone()))
            .build()?;
        let user = CurrentUser::from(&client.me().await?);

        log::info!("Logged in as {}", user.email);
        self.set_state(Some(SessionSnapshot {
            token,
            user: user.clone(),
        }));
        Ok(user)
    }

    /// Ends the session.
    ///
    /// The server is told about it when possible; local state is cleared
    /// either way.
    pub async fn logout(&self) {
        let Some(snapshot) = self.read_state() else {
            return;
        };

        let client = KariClient::builder()
            .url(self.inner.api_url.clone())
            .token_provider(StaticTokenProvider::from_token(snapshot.token))
            .build();
        match client {
            Ok(client) => {
                if let Err(e) = client.logout().await {
                    log::warn!("Server-side logout failed: {}", e);
                }
            }
            Err(e) => log::warn!("Server-side logout skipped: {}", e),
        }

        self.clear();
    }

    /// Drops the local credentials without contacting the server.
    pub fn clear(&self) {
        if self.read_state().is_some() {
            log::info!("Session cleared");
        }
        self.set_state(None);
    }

    fn read_state(&self) -> Option<SessionSnapshot> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, state: Option<SessionSnapshot>) {
        *self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner) = state;
    }
}

#[async_trait]
impl TokenProvider for Session {
    async fn get_token(&self, _api_url: &str) -> Result<AccessToken, AuthError> {
        match self.read_state() {
            Some(snapshot) if !snapshot.token.is_expired() => Ok(snapshot.token),
            Some(_) => {
                log::info!("Access token expired");
                self.set_state(None);
                Err(AuthError::NotAuthenticated)
            }
            None => Err(AuthError::NotAuthenticated),
        }
    }

    fn invalidate(&self) {
        self.clear();
    }
}
