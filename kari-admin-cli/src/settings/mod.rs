//! Persistent CLI settings.
//!
//! Values are stored as bincode blobs under typed [`Key`]s. The saved login
//! session lives here too, so `kari-admin login` survives between runs.

mod backend;
mod sqlite;

pub use backend::SettingsBackend;
pub use sqlite::SqliteBackend;

use std::marker::PhantomData;
use std::sync::Arc;

use kari_admin_lib::auth::SessionSnapshot;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("could not create settings directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error for {key}: {source}")]
    Serialization { key: String, source: bincode::Error },
    #[error("stored value for {key} is unreadable: {source}")]
    Deserialization { key: String, source: bincode::Error },
}

/// A settings key bound to the type stored under it.
pub struct Key<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Prefix of the user-editable configuration keys.
pub const CONFIG_PREFIX: &str = "config.";

pub const API_URL: Key<String> = Key::new("config.api_url");
pub const PER_PAGE: Key<u32> = Key::new("config.per_page");
pub const UTC_OFFSET: Key<i32> = Key::new("config.utc_offset");
pub const SESSION: Key<SessionSnapshot> = Key::new("session");

/// Typed settings on top of a [`SettingsBackend`].
#[derive(Clone)]
pub struct Settings {
    backend: Arc<dyn SettingsBackend>,
}

impl Settings {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &Key<T>) -> Result<Option<T>, SettingsError> {
        match self.backend.get_bytes(key.name()).await? {
            Some(bytes) => bincode::deserialize(&bytes)
                .map(Some)
                .map_err(|source| SettingsError::Deserialization {
                    key: key.name().to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Like [`get`](Self::get), but an unreadable stored value is dropped
    /// and logged instead of failing the command.
    pub async fn get_lenient<T: DeserializeOwned>(&self, key: &Key<T>) -> Result<Option<T>, SettingsError> {
        match self.get(key).await {
            Err(SettingsError::Deserialization { key: name, source }) => {
                log::warn!("Discarding unreadable setting {}: {}", name, source);
                self.backend.delete(key.name()).await?;
                Ok(None)
            }
            other => other,
        }
    }

    pub async fn set<T: Serialize + Sync>(&self, key: &Key<T>, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(|source| SettingsError::Serialization {
            key: key.name().to_string(),
            source,
        })?;
        log::debug!("Saving setting {} ({} bytes)", key.name(), bytes.len());
        self.backend.set_bytes(key.name(), bytes).await
    }

    pub async fn delete<T>(&self, key: &Key<T>) -> Result<(), SettingsError> {
        self.backend.delete(key.name()).await
    }

    /// Names of the stored configuration keys.
    pub async fn config_keys(&self) -> Result<Vec<String>, SettingsError> {
        self.backend.keys_with_prefix(CONFIG_PREFIX).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kari_admin_lib::auth::AccessToken;
    use kari_admin_lib::auth::CurrentUser;

    async fn settings() -> (tempfile::TempDir, Settings) {
        let dir = tempfile::tempdir().unwrap();
        let backend = SqliteBackend::open(dir.path().join("settings.db"))
            .await
            .unwrap();
        (dir, Settings::new(backend))
    }

    #[tokio::test]
    async fn test_typed_round_trip() {
        let (_dir, settings) = settings().await;

        assert_eq!(settings.get(&PER_PAGE).await.unwrap(), None);
        settings.set(&PER_PAGE, &25).await.unwrap();
        settings.set(&UTC_OFFSET, &-3).await.unwrap();
        assert_eq!(settings.get(&PER_PAGE).await.unwrap(), Some(25));
        assert_eq!(settings.get(&UTC_OFFSET).await.unwrap(), Some(-3));
        assert_eq!(
            settings.config_keys().await.unwrap(),
            vec![PER_PAGE.name().to_string(), UTC_OFFSET.name().to_string()]
        );
    }

    #[test]
    fn test_config_keys_share_prefix() {
        for name in [API_URL.name(), PER_PAGE.name(), UTC_OFFSET.name()] {
            assert!(name.starts_with(CONFIG_PREFIX), "{name}");
        }
        assert!(!SESSION.name().starts_with(CONFIG_PREFIX));
    }

    #[tokio::test]
    async fn test_session_snapshot_is_storable() {
        let (_dir, settings) = settings().await;
        let snapshot = SessionSnapshot {
            token: AccessToken::new("abc"),
            user: CurrentUser {
                name: "Admin Kari".into(),
                email: "admin@kariajuda.com".into(),
                is_admin: true,
            },
        };

        settings.set(&SESSION, &snapshot).await.unwrap();
        assert_eq!(settings.get(&SESSION).await.unwrap(), Some(snapshot));

        settings.delete(&SESSION).await.unwrap();
        assert_eq!(settings.get(&SESSION).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreadable_value_is_discarded() {
        let (_dir, settings) = settings().await;
        settings.backend.set_bytes("config.api_url", vec![0xff]).await.unwrap();

        assert!(settings.get(&API_URL).await.is_err());
        assert_eq!(settings.get_lenient(&API_URL).await.unwrap(), None);
        assert!(settings.config_keys().await.unwrap().is_empty());
    }
}
