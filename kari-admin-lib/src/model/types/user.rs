//! User DTO

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::timestamp;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::RecordId;

/// An administrative account as returned by `GET /users` and `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, alias = "name")]
    pub full_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    /// Raw role key (`admin`, `moderator`, `viewer`).
    #[serde(default)]
    pub role: Option<String>,
    #[serde(
        default,
        alias = "lastLogin",
        deserialize_with = "timestamp::deserialize_opt"
    )]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Name to show: full name, then username, then e-mail.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.username.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&self.email)
    }

    /// Role key, defaulting superusers to `admin` and everyone else to `viewer`.
    pub fn role_key(&self) -> &str {
        match &self.role {
            Some(role) => role,
            None if self.is_superuser => "admin",
            None => "viewer",
        }
    }
}

impl IntoRecord for User {
    fn into_record(self) -> Record {
        let name = self.display_name().to_string();
        let role = self.role_key().to_string();
        let status = if self.is_active { "active" } else { "inactive" };
        Record::with_id(self.id)
            .set("name", name)
            .set("email", self.email)
            .set("username", self.username)
            .set("role", role)
            .set("status", status)
            .set("is_superuser", self.is_superuser)
            .set("last_login", self.last_login)
            .set("created_at", self.created_at)
    }
}
