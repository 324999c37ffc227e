//! Testimonial DTO

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::timestamp;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::RecordId;

/// A delivered-donation testimonial as returned by `GET /testimonials/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub donor_name: Option<String>,
    #[serde(default)]
    pub campaign_title: Option<String>,
    /// Raw category key (`moradia`, `saude`, ...).
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl IntoRecord for Testimonial {
    fn into_record(self) -> Record {
        Record::with_id(self.id)
            .set("title", self.title)
            .set("description", self.description)
            .set("recipient_name", self.recipient_name)
            .set("donor_name", self.donor_name)
            .set("campaign_title", self.campaign_title)
            .set("category", self.category)
            .set("image_url", self.image_url)
            .set("video_url", self.video_url)
            .set("delivery_date", self.delivery_date)
            .set("is_featured", self.is_featured)
            .set("is_active", self.is_active)
            .set("created_at", self.created_at)
    }
}
