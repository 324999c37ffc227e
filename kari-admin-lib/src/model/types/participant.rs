//! Participant DTO

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::timestamp;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::RecordId;

/// A campaign participant as returned by `GET /participants/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub campaign_id: Option<RecordId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "photo", alias = "photo_url")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl IntoRecord for Participant {
    fn into_record(self) -> Record {
        Record::with_id(self.id)
            .set("name", self.name)
            .set("email", self.email)
            .set("phone", self.phone)
            .set("campaign_id", self.campaign_id)
            .set("status", self.status)
            .set("image_url", self.image_url)
            .set("created_at", self.created_at)
    }
}
