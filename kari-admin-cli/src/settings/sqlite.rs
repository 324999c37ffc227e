//! SQLite settings backend with in-memory cache.

use std::path::Path;

use async_sqlite::Client;
use async_trait::async_trait;
use dashmap::DashMap;

use super::SettingsBackend;
use super::SettingsError;

/// Settings stored in a single SQLite table, cached in a `DashMap`.
pub struct SqliteBackend {
    client: Client,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Opens (or creates) the database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        if let Some(parent) = path.as_ref().parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let client = async_sqlite::ClientBuilder::new()
            .path(path.as_ref())
            .open()
            .await?;

        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS kari_settings (
                        key TEXT PRIMARY KEY,
                        value BLOB NOT NULL,
                        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                    )",
                    [],
                )
            })
            .await?;

        log::debug!("Opened settings database at {}", path.as_ref().display());

        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let owned = key.to_string();
        let stored = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM kari_settings WHERE key = ?1")?;
                let mut rows = stmt.query([&owned])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get::<_, Vec<u8>>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;

        if let Some(value) = &stored {
            self.cache.insert(key.to_string(), value.clone());
        }
        Ok(stored)
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let owned = key.to_string();
        let bytes = value.clone();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO kari_settings (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE
                     SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
                    rusqlite::params![&owned, &bytes],
                )
            })
            .await?;

        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        let owned = key.to_string();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM kari_settings WHERE key = ?1", [&owned]))
            .await?;

        self.cache.remove(key);
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        let pattern = format!("{}%", prefix);
        let keys = self
            .client
            .conn(move |conn| {
                let mut stmt =
                    conn.prepare("SELECT key FROM kari_settings WHERE key LIKE ?1 ORDER BY key")?;
                let rows = stmt.query_map([&pattern], |row| row.get(0))?;
                rows.collect::<Result<Vec<String>, _>>()
            })
            .await?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.db");

        let backend = SqliteBackend::open(&path).await.unwrap();
        backend.set_bytes("config.per_page", vec![1, 2, 3]).await.unwrap();
        backend.set_bytes("config.per_page", vec![4]).await.unwrap();
        drop(backend);

        let reopened = SqliteBackend::open(&path).await.unwrap();
        assert_eq!(
            reopened.get_bytes("config.per_page").await.unwrap(),
            Some(vec![4])
        );
    }

    #[tokio::test]
    async fn test_delete_and_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let backend = SqliteBackend::open(dir.path().join("settings.db"))
            .await
            .unwrap();

        backend.set_bytes("config.b", vec![1]).await.unwrap();
        backend.set_bytes("config.a", vec![1]).await.unwrap();
        backend.set_bytes("session", vec![1]).await.unwrap();

        assert_eq!(
            backend.keys_with_prefix("config.").await.unwrap(),
            vec!["config.a".to_string(), "config.b".to_string()]
        );

        backend.delete("session").await.unwrap();
        backend.delete("session").await.unwrap();
        assert_eq!(backend.get_bytes("session").await.unwrap(), None);
    }
}
