//! Winner DTO

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::timestamp;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::RecordId;

/// A declared winner as returned by `GET /winners/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    pub id: RecordId,
    pub participant_id: RecordId,
    pub campaign_id: RecordId,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub votes: Option<i64>,
    #[serde(default)]
    pub prize: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "announced_date", deserialize_with = "timestamp::deserialize_opt")]
    pub announced_at: Option<DateTime<Utc>>,
}

impl IntoRecord for Winner {
    fn into_record(self) -> Record {
        Record::with_id(self.id)
            .set("participant_id", self.participant_id)
            .set("campaign_id", self.campaign_id)
            .set("position", self.position)
            .set("votes", self.votes)
            .set("prize", self.prize)
            .set("status", self.status)
            .set("announced_at", self.announced_at)
    }
}
