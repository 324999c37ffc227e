//! Recent activity feed

use std::collections::BTreeMap;
use std::fmt;

use chrono::DateTime;
use chrono::DurationRound;
use chrono::TimeDelta;
use chrono::Utc;

/// Where a feed entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Campaign,
    Participant,
    Vote,
    Winner,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::Participant => "participant",
            Self::Vote => "vote",
            Self::Winner => "winner",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub description: String,
    pub at: Option<DateTime<Utc>>,
}

impl ActivityEntry {
    pub fn new(kind: ActivityKind, description: impl Into<String>, at: Option<DateTime<Utc>>) -> Self {
        Self {
            kind,
            description: description.into(),
            at,
        }
    }
}

/// Turns one collection into feed entries of the given kind.
pub fn activity_entries<T, D, F>(
    records: &[T],
    kind: ActivityKind,
    describe: D,
    timestamp_of: F,
) -> Vec<ActivityEntry>
where
    D: Fn(&T) -> String,
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    records
        .iter()
        .map(|record| ActivityEntry::new(kind, describe(record), timestamp_of(record)))
        .collect()
}

/// Collapses votes into one entry per clock hour ("45 novos votos").
///
/// Each entry is stamped with the latest vote of its hour. Votes without a
/// timestamp cannot be placed in a batch and are left out.
pub fn vote_batches<T, F>(votes: &[T], timestamp_of: F) -> Vec<ActivityEntry>
where
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    let mut hours: BTreeMap<DateTime<Utc>, (usize, DateTime<Utc>)> = BTreeMap::new();
    for at in votes.iter().filter_map(&timestamp_of) {
        let hour = at.duration_trunc(TimeDelta::hours(1)).unwrap_or(at);
        let entry = hours.entry(hour).or_insert((0, at));
        entry.0 += 1;
        entry.1 = entry.1.max(at);
    }

    hours
        .into_values()
        .rev()
        .map(|(count, latest)| {
            let description = if count == 1 {
                "1 novo voto".to_string()
            } else {
                format!("{} novos votos", count)
            };
            ActivityEntry::new(ActivityKind::Vote, description, Some(latest))
        })
        .collect()
}

/// Merges entries from every source, newest first, keeping at most `limit`.
///
/// The sort is stable, so entries with the same timestamp keep source order.
/// Entries without a timestamp go last.
pub fn recent_activity_feed<I>(sources: I, limit: usize) -> Vec<ActivityEntry>
where
    I: IntoIterator<Item = Vec<ActivityEntry>>,
{
    let mut feed: Vec<ActivityEntry> = sources.into_iter().flatten().collect();
    feed.sort_by(|a, b| match (a.at, b.at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    feed.truncate(limit);
    feed
}
