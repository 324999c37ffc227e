//! Campaign DTO

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::timestamp;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::RecordId;

/// A fundraising campaign as returned by `GET /campaigns/`.
///
/// Monetary amounts accept both JSON numbers and decimal strings. The API has
/// used several names for the same amounts over time, so the older spellings
/// are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "target_amount", alias = "targetAmount")]
    pub goal: Option<Decimal>,
    #[serde(
        default,
        alias = "raised_amount",
        alias = "current_amount",
        alias = "raisedAmount"
    )]
    pub raised: Option<Decimal>,
    /// Raw status string (`active`, `pending`, `completed`).
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub participants_count: Option<i64>,
    #[serde(default)]
    pub votes_count: Option<i64>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Campaign {
    /// The status string to classify.
    ///
    /// Prefers the explicit `status`; otherwise derives it from `is_active`
    /// the way the campaign form writes it back (`active` or `pending`).
    pub fn status_key(&self) -> Option<&str> {
        match (&self.status, self.is_active) {
            (Some(status), _) => Some(status.as_str()),
            (None, Some(true)) => Some("active"),
            (None, Some(false)) => Some("pending"),
            (None, None) => None,
        }
    }
}

impl IntoRecord for Campaign {
    fn into_record(self) -> Record {
        let status = self.status_key().map(str::to_string);
        Record::with_id(self.id)
            .set("title", self.title)
            .set("description", self.description)
            .set("full_description", self.full_description)
            .set("category", self.category)
            .set("goal", self.goal)
            .set("raised", self.raised)
            .set("status", status)
            .set("image_url", self.image_url)
            .set("start_date", self.start_date)
            .set("end_date", self.end_date)
            .set("participants_count", self.participants_count)
            .set("votes_count", self.votes_count)
            .set("created_at", self.created_at)
    }
}
