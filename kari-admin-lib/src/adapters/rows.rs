//! Row builders: DTOs joined and normalized for the list pages

use std::collections::HashMap;

use crate::aggregate::tally_by_key;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::RecordId;
use crate::model::types::Campaign;
use crate::model::types::Participant;
use crate::model::types::Testimonial;
use crate::model::types::User;
use crate::model::types::Vote;
use crate::model::types::Winner;

use super::ImageResolver;
use super::progress_percentage;

/// A participant with more votes than this is shown as a winner.
pub const WINNER_VOTE_THRESHOLD: usize = 100;

pub const UNKNOWN_CAMPAIGN: &str = "Campanha desconhecida";
pub const UNKNOWN_PARTICIPANT: &str = "Participante desconhecido";
pub const UNNAMED: &str = "Sem nome";
pub const UNTITLED: &str = "Sem título";

pub const CAMPAIGN_SEARCH_FIELDS: [&str; 2] = ["title", "description"];
pub const PARTICIPANT_SEARCH_FIELDS: [&str; 3] = ["name", "email", "phone"];
pub const WINNER_SEARCH_FIELDS: [&str; 3] = ["participant_name", "campaign_name", "prize"];
pub const TESTIMONIAL_SEARCH_FIELDS: [&str; 4] =
    ["title", "recipient_name", "donor_name", "campaign_title"];
pub const USER_SEARCH_FIELDS: [&str; 3] = ["name", "email", "username"];

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn campaign_titles(campaigns: &[Campaign]) -> HashMap<&RecordId, &str> {
    campaigns
        .iter()
        .map(|c| (&c.id, non_empty(Some(c.title.as_str())).unwrap_or(UNTITLED)))
        .collect()
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Campaign list rows.
///
/// Participant and vote counts come from the fetched collections; the counts
/// embedded in the campaign DTO are only used when the collections have
/// nothing for that campaign.
pub fn campaign_rows(
    campaigns: &[Campaign],
    participants: &[Participant],
    votes: &[Vote],
    images: &ImageResolver,
) -> Vec<Record> {
    let participants_per_campaign = tally_by_key(participants, |p| p.campaign_id.clone());
    let votes_per_campaign = tally_by_key(votes, |v| v.campaign_id.clone());

    campaigns
        .iter()
        .map(|campaign| {
            let participants = match participants_per_campaign.get(&campaign.id) {
                0 => campaign.participants_count.unwrap_or(0),
                n => count(n),
            };
            let votes = match votes_per_campaign.get(&campaign.id) {
                0 => campaign.votes_count.unwrap_or(0),
                n => count(n),
            };
            let progress = match (campaign.raised, campaign.goal) {
                (Some(raised), Some(goal)) => progress_percentage(raised, goal),
                _ => 0.0,
            };
            let image = images.resolve_or_placeholder(campaign.image_url.as_deref());

            campaign
                .clone()
                .into_record()
                .set("participants", participants)
                .set("votes", votes)
                .set("progress", progress)
                .set("image", image)
        })
        .collect()
}

/// Participant list rows, joined with their campaign and vote tally.
///
/// Status is derived: more than [`WINNER_VOTE_THRESHOLD`] votes makes a
/// winner, otherwise the API status is kept (default `active`).
pub fn participant_rows(
    participants: &[Participant],
    campaigns: &[Campaign],
    votes: &[Vote],
    images: &ImageResolver,
) -> Vec<Record> {
    let titles = campaign_titles(campaigns);
    let votes_per_participant = tally_by_key(votes, |v| v.participant_id.clone());

    participants
        .iter()
        .map(|p| {
            let received = votes_per_participant.get(&p.id);
            let status = if received > WINNER_VOTE_THRESHOLD {
                "winner"
            } else {
                non_empty(p.status.as_deref()).unwrap_or("active")
            };
            let campaign_name = p
                .campaign_id
                .as_ref()
                .and_then(|id| titles.get(id).copied())
                .unwrap_or(UNKNOWN_CAMPAIGN);

            Record::with_id(p.id.clone())
                .set("name", non_empty(p.name.as_deref()).unwrap_or(UNNAMED))
                .set("email", p.email.clone())
                .set("phone", p.phone.clone())
                .set("campaign_id", p.campaign_id.clone())
                .set("campaign_name", campaign_name)
                .set("registration_date", p.created_at)
                .set("votes", count(received))
                .set("status", status)
                .set("image", images.resolve_or_placeholder(p.image_url.as_deref()))
        })
        .collect()
}

/// Winner rows, joined with participant names and campaign titles.
pub fn winner_rows(winners: &[Winner], participants: &[Participant], campaigns: &[Campaign]) -> Vec<Record> {
    let titles = campaign_titles(campaigns);
    let names: HashMap<&RecordId, &str> = participants
        .iter()
        .map(|p| (&p.id, non_empty(p.name.as_deref()).unwrap_or(UNNAMED)))
        .collect();

    winners
        .iter()
        .map(|w| {
            Record::with_id(w.id.clone())
                .set("participant_id", w.participant_id.clone())
                .set(
                    "participant_name",
                    names.get(&w.participant_id).copied().unwrap_or(UNKNOWN_PARTICIPANT),
                )
                .set("campaign_id", w.campaign_id.clone())
                .set(
                    "campaign_name",
                    titles.get(&w.campaign_id).copied().unwrap_or(UNKNOWN_CAMPAIGN),
                )
                .set("position", w.position)
                .set("votes", w.votes)
                .set("prize", w.prize.clone())
                .set("status", non_empty(w.status.as_deref()).unwrap_or("pending"))
                .set("announced_at", w.announced_at)
        })
        .collect()
}

/// Testimonial rows with resolved image URLs.
pub fn testimonial_rows(testimonials: &[Testimonial], images: &ImageResolver) -> Vec<Record> {
    testimonials
        .iter()
        .map(|t| {
            let image = images.resolve_or_placeholder(t.image_url.as_deref());
            t.clone().into_record().set("image", image)
        })
        .collect()
}

/// User rows with display name, role and status resolved.
pub fn user_rows(users: &[User]) -> Vec<Record> {
    users.iter().cloned().map(IntoRecord::into_record).collect()
}
