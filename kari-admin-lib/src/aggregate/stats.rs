//! Dashboard and voting statistics

use std::collections::HashSet;

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::Timelike;
use chrono::Utc;
use rust_decimal::Decimal;

use super::AggregationBucket;
use super::Tally;
use super::percentage_of;
use super::round1;
use super::tally_by_key;
use crate::model::RecordId;
use crate::model::types::Campaign;
use crate::model::types::Participant;
use crate::model::types::Vote;

/// Identity a vote is counted under for unique voters.
///
/// Vote ids and voter ids live in different id spaces, so a fallback vote id
/// never merges with a voter that happens to share the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum VoterKey<'a> {
    Voter(&'a RecordId),
    Vote(&'a RecordId),
}

/// Headline numbers of the voting dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct VotingStats {
    pub total_votes: usize,
    pub votes_today: usize,
    /// Distinct voters. See [`VotingStats::voter_fallbacks`].
    pub unique_voters: usize,
    /// Votes that carried no voter id and were identified by their own id
    /// instead. Each of them counts as a distinct voter, so a non-zero value
    /// means `unique_voters` is likely overcounted.
    pub voter_fallbacks: usize,
    /// Votes per calendar day over the span from the first to the last vote,
    /// both days included.
    pub average_votes_per_day: f64,
    /// Busiest hour of day as `"HH:00"`.
    pub peak_voting_hour: Option<String>,
}

impl VotingStats {
    /// Computes the stats, reading days and hours in `offset`.
    pub fn compute(votes: &[Vote], now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let today = now.with_timezone(&offset).date_naive();

        let mut voters: HashSet<VoterKey<'_>> = HashSet::new();
        let mut voter_fallbacks = 0;
        let mut votes_today = 0;
        let mut hours = [0usize; 24];
        let mut first_day = None;
        let mut last_day = None;

        for vote in votes {
            match &vote.voter_id {
                Some(voter) => {
                    voters.insert(VoterKey::Voter(voter));
                }
                None => {
                    voter_fallbacks += 1;
                    voters.insert(VoterKey::Vote(&vote.id));
                }
            }

            let Some(at) = vote.created_at else {
                continue;
            };
            let local = at.with_timezone(&offset);
            let day = local.date_naive();
            if day == today {
                votes_today += 1;
            }
            hours[local.hour() as usize] += 1;
            first_day = Some(first_day.map_or(day, |d: chrono::NaiveDate| d.min(day)));
            last_day = Some(last_day.map_or(day, |d: chrono::NaiveDate| d.max(day)));
        }

        if voter_fallbacks > 0 {
            log::warn!(
                "{} of {} votes have no voter id; unique voter count falls back to vote ids",
                voter_fallbacks,
                votes.len()
            );
        }

        let average_votes_per_day = match (first_day, last_day) {
            (Some(first), Some(last)) => {
                let days = (last - first).num_days() + 1;
                let timestamped: usize = hours.iter().sum();
                round1(timestamped as f64 / days as f64)
            }
            _ => 0.0,
        };

        let peak_voting_hour = hours
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, count)| **count)
            .filter(|(_, count)| **count > 0)
            .map(|(hour, _)| format!("{:02}:00", hour));

        Self {
            total_votes: votes.len(),
            votes_today,
            unique_voters: voters.len(),
            voter_fallbacks,
            average_votes_per_day,
            peak_voting_hour,
        }
    }
}

/// A participant's place in the vote ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedParticipant {
    /// 1-based.
    pub position: usize,
    pub participant_id: RecordId,
    pub name: String,
    pub votes: usize,
    /// Share of all attributed votes, one decimal.
    pub percentage: f64,
}

/// Ranks participants by votes received.
///
/// Ties keep the order of `participants`. Votes for ids that are not in
/// `participants` still count towards the total the percentages are based on.
pub fn rank_participants(participants: &[Participant], votes: &[Vote]) -> Vec<RankedParticipant> {
    let tally = tally_by_key(votes, |v| v.participant_id.clone());
    let total = tally.total() as f64;

    let mut ranked: Vec<(&Participant, usize)> = participants
        .iter()
        .map(|p| (p, tally.get(&p.id)))
        .collect();
    ranked.sort_by(|(_, a), (_, b)| b.cmp(a));

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (participant, count))| RankedParticipant {
            position: index + 1,
            participant_id: participant.id.clone(),
            name: participant
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Sem nome".to_string()),
            votes: count,
            percentage: round1(percentage_of(count as f64, total)),
        })
        .collect()
}

/// Summary cards and the campaign status chart of the main dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub campaign_count: usize,
    /// Participants not marked inactive.
    pub active_participants: usize,
    pub total_votes: usize,
    /// Sum of every campaign's raised amount.
    pub total_raised: Decimal,
    /// Campaigns per raw status key, in first-seen order.
    pub status_counts: Tally<String>,
}

impl DashboardSummary {
    pub fn compute(campaigns: &[Campaign], participants: &[Participant], votes: &[Vote]) -> Self {
        let active_participants = participants
            .iter()
            .filter(|p| p.status.as_deref() != Some("inactive"))
            .count();

        Self {
            campaign_count: campaigns.len(),
            active_participants,
            total_votes: votes.len(),
            total_raised: campaigns.iter().filter_map(|c| c.raised).sum(),
            status_counts: tally_by_key(campaigns, |c| c.status_key().map(str::to_string)),
        }
    }

    /// Status breakdown as chart buckets labelled with the status key.
    pub fn status_breakdown(&self) -> Vec<AggregationBucket> {
        self.status_counts
            .iter()
            .map(|(status, count)| AggregationBucket::new(status.clone(), count as u64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn vote(id: i64, participant: Option<i64>, voter: Option<i64>, at: Option<DateTime<Utc>>) -> Vote {
        Vote {
            id: RecordId::Int(id),
            participant_id: participant.map(RecordId::Int),
            campaign_id: None,
            voter_id: voter.map(RecordId::Int),
            created_at: at,
        }
    }

    fn participant(id: i64, name: &str) -> Participant {
        Participant {
            id: RecordId::Int(id),
            name: Some(name.to_string()),
            email: None,
            phone: None,
            campaign_id: None,
            status: None,
            image_url: None,
            created_at: None,
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_voting_stats() {
        let now = Utc.with_ymd_and_hms(2024, 3, 3, 22, 0, 0).unwrap();
        let votes = [
            vote(1, Some(1), Some(10), Utc.with_ymd_and_hms(2024, 3, 1, 20, 5, 0).single()),
            vote(2, Some(1), Some(10), Utc.with_ymd_and_hms(2024, 3, 1, 20, 30, 0).single()),
            vote(3, Some(2), None, Utc.with_ymd_and_hms(2024, 3, 3, 9, 0, 0).single()),
            vote(4, Some(2), Some(11), None),
        ];
        let stats = VotingStats::compute(&votes, now, utc());
        assert_eq!(stats.total_votes, 4);
        assert_eq!(stats.votes_today, 1);
        assert_eq!(stats.unique_voters, 3);
        assert_eq!(stats.voter_fallbacks, 1);
        assert_eq!(stats.average_votes_per_day, 1.0);
        assert_eq!(stats.peak_voting_hour.as_deref(), Some("20:00"));
    }

    #[test]
    fn test_fallback_vote_id_does_not_merge_with_voter_id() {
        let votes = [vote(7, Some(1), None, None), vote(8, Some(1), Some(7), None)];
        let stats = VotingStats::compute(&votes, Utc::now(), utc());
        assert_eq!(stats.unique_voters, 2);
        assert_eq!(stats.voter_fallbacks, 1);
    }

    #[test]
    fn test_voting_stats_empty() {
        let stats = VotingStats::compute(&[], Utc::now(), utc());
        assert_eq!(stats.total_votes, 0);
        assert_eq!(stats.average_votes_per_day, 0.0);
        assert_eq!(stats.peak_voting_hour, None);
    }

    #[test]
    fn test_rank_participants() {
        let participants = [participant(1, "Ana"), participant(2, "Bruno"), participant(3, "Carla")];
        let votes = [
            vote(1, Some(2), None, None),
            vote(2, Some(2), None, None),
            vote(3, Some(3), None, None),
            vote(4, None, None, None),
        ];
        let ranking = rank_participants(&participants, &votes);
        let names: Vec<&str> = ranking.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Bruno", "Carla", "Ana"]);
        assert_eq!(ranking[0].position, 1);
        assert_eq!(ranking[0].percentage, 66.7);
        assert_eq!(ranking[2].votes, 0);
        assert_eq!(ranking[2].percentage, 0.0);
    }
}
