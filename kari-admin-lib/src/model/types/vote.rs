//! Vote DTO

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::timestamp;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::RecordId;

/// A single vote event as returned by `GET /votes/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub id: RecordId,
    #[serde(default)]
    pub participant_id: Option<RecordId>,
    #[serde(default)]
    pub campaign_id: Option<RecordId>,
    /// Who cast the vote, when the API exposes it.
    #[serde(default, alias = "user_id")]
    pub voter_id: Option<RecordId>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl IntoRecord for Vote {
    fn into_record(self) -> Record {
        Record::with_id(self.id)
            .set("participant_id", self.participant_id)
            .set("campaign_id", self.campaign_id)
            .set("voter_id", self.voter_id)
            .set("created_at", self.created_at)
    }
}
