//! Aggregation over API-shaped collections.

use chrono::FixedOffset;
use chrono::TimeZone;
use chrono::Utc;
use kari_admin_lib::aggregate::ActivityKind;
use kari_admin_lib::aggregate::DashboardSummary;
use kari_admin_lib::aggregate::HOUR_BLOCK_LABELS;
use kari_admin_lib::aggregate::MONTH_LABELS;
use kari_admin_lib::aggregate::TieBreak;
use kari_admin_lib::aggregate::TimeUnit;
use kari_admin_lib::aggregate::VotingStats;
use kari_admin_lib::aggregate::WEEKDAY_LABELS;
use kari_admin_lib::aggregate::activity_entries;
use kari_admin_lib::aggregate::bucket_by_time_unit;
use kari_admin_lib::aggregate::bucket_by_time_unit_in;
use kari_admin_lib::aggregate::group_by_category;
use kari_admin_lib::aggregate::percentage_of;
use kari_admin_lib::aggregate::rank_participants;
use kari_admin_lib::aggregate::recent_activity_feed;
use kari_admin_lib::aggregate::tally_by_key;
use kari_admin_lib::aggregate::top_n;
use kari_admin_lib::aggregate::vote_batches;
use kari_admin_lib::model::Collection;
use kari_admin_lib::model::parse_collection;
use kari_admin_lib::model::types::Campaign;
use kari_admin_lib::model::types::Participant;
use kari_admin_lib::model::types::Vote;
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;

fn campaigns() -> Vec<Campaign> {
    parse_collection(
        Collection::Campaigns,
        json!([
            {"id": 1, "title": "Educação para Todos", "category": "Educação",
             "status": "active", "goal": 10000, "raised": "2500.50",
             "created_at": "2024-01-15T08:00:00"},
            {"id": 2, "title": "Livros na Escola", "category": "Educação",
             "is_active": false, "goal": 5000, "raised": 1000,
             "created_at": "2024-02-01T10:00:00"},
            {"id": 3, "title": "Saúde em Primeiro Lugar", "category": "Saúde",
             "status": "completed", "raised_amount": 4000,
             "created_at": "2024-03-10T14:00:00"}
        ]),
    )
    .unwrap()
}

fn participants() -> Vec<Participant> {
    parse_collection(
        Collection::Participants,
        json!([
            {"id": 10, "name": "Maria Silva", "campaign_id": 1, "status": "active",
             "created_at": "2024-01-20T09:00:00"},
            {"id": 11, "name": "João Santos", "campaign_id": 1, "status": "inactive"},
            {"id": 12, "name": "", "campaign_id": 3}
        ]),
    )
    .unwrap()
}

fn votes() -> Vec<Vote> {
    parse_collection(
        Collection::Votes,
        json!([
            {"id": 100, "participant_id": 10, "campaign_id": 1, "voter_id": 7,
             "created_at": "2024-03-10T12:10:00Z"},
            {"id": 101, "participant_id": 10, "campaign_id": 1, "voter_id": 8,
             "created_at": "2024-03-10T12:40:00Z"},
            {"id": 102, "participant_id": 12, "campaign_id": 3,
             "created_at": "2024-03-12T02:00:00Z"},
            {"id": 103, "participant_id": null, "campaign_id": 3, "voter_id": 7,
             "created_at": "not a date"}
        ]),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn tally_conserves_keyed_records(keys in prop::collection::vec(prop::option::of(0u8..10), 0..200)) {
        let tally = tally_by_key(&keys, |k| *k);
        let keyed = keys.iter().filter(|k| k.is_some()).count();
        prop_assert_eq!(tally.total(), keyed);
        prop_assert_eq!(tally.unattributed(), keys.len() - keyed);
        prop_assert_eq!(tally.iter().map(|(_, c)| c).sum::<usize>(), keyed);
    }

    #[test]
    fn percentage_is_bounded(count in any::<f64>(), total in any::<f64>()) {
        let p = percentage_of(count, total);
        prop_assert!(p.is_finite());
        prop_assert!((0.0..=100.0).contains(&p));
    }

    #[test]
    fn percentage_of_zero_total_is_zero(count in any::<f64>()) {
        prop_assert_eq!(percentage_of(count, 0.0), 0.0);
    }

    #[test]
    fn top_n_is_sorted_descending(keys in prop::collection::vec(0u8..20, 0..100), n in 0usize..10) {
        let tally = tally_by_key(&keys, |k| Some(*k));
        let top = top_n(&tally, n, TieBreak::KeyAscending);
        prop_assert!(top.len() <= n);
        prop_assert!(top.windows(2).all(|w| w[0].1 > w[1].1 || (w[0].1 == w[1].1 && w[0].0 < w[1].0)));
    }
}

#[test]
fn participants_per_category_scenario() {
    struct Row {
        id: i64,
        category: &'static str,
    }
    let primary = [
        Row { id: 1, category: "Educação" },
        Row { id: 2, category: "Educação" },
        Row { id: 3, category: "Saúde" },
    ];
    let mut related = Vec::new();
    for (campaign, count) in [(1, 10), (2, 5), (3, 20)] {
        related.extend(std::iter::repeat_n(campaign, count));
    }

    let buckets = group_by_category(
        &primary,
        &related,
        |r| Some(r.category.to_string()),
        |r| Some(r.id),
        |c: &i64| Some(*c),
        5,
    )
    .unwrap();

    let got: Vec<(&str, u64)> = buckets.iter().map(|b| (b.label.as_str(), b.value)).collect();
    assert_eq!(got, vec![("Saúde", 20), ("Educação", 15)]);
}

#[test]
fn monthly_trend_with_participant_series() {
    let campaigns = campaigns();
    let participants = participants();

    let campaign_series =
        bucket_by_time_unit(&campaigns, |c| c.created_at, TimeUnit::Month, &MONTH_LABELS).unwrap();
    let participant_series =
        bucket_by_time_unit(&participants, |p| p.created_at, TimeUnit::Month, &MONTH_LABELS)
            .unwrap();
    assert_eq!(participant_series.skipped, 2);

    let merged = campaign_series
        .with_series("participants", &participant_series)
        .unwrap();
    assert_eq!(merged.buckets[0].label, "Jan");
    assert_eq!(merged.buckets[0].value, 1);
    assert_eq!(merged.buckets[0].series_value("participants"), Some(1));
    assert_eq!(merged.total(), 3);
}

#[test]
fn hourly_votes_in_brasilia_time() {
    let votes = votes();
    let brasilia = FixedOffset::west_opt(3 * 3600).unwrap();
    let series = bucket_by_time_unit_in(
        &votes,
        |v| v.created_at,
        TimeUnit::Hour,
        &HOUR_BLOCK_LABELS,
        brasilia,
    )
    .unwrap();

    // 12:10Z and 12:40Z are 09h local, 02:00Z is 23h on the previous day.
    let values: Vec<u64> = series.buckets.iter().map(|b| b.value).collect();
    assert_eq!(values, vec![0, 0, 2, 0, 0, 1]);
    assert_eq!(series.skipped, 1);

    let weekdays =
        bucket_by_time_unit(&votes, |v| v.created_at, TimeUnit::DayOfWeek, &WEEKDAY_LABELS)
            .unwrap();
    // 2024-03-10 is a Sunday, 2024-03-12 a Tuesday.
    assert_eq!(weekdays.buckets[6].value, 2);
    assert_eq!(weekdays.buckets[1].value, 1);
}

#[test]
fn voting_stats_report_fallback_voters() {
    let now = Utc.with_ymd_and_hms(2024, 3, 12, 15, 0, 0).unwrap();
    let stats = VotingStats::compute(&votes(), now, FixedOffset::east_opt(0).unwrap());

    assert_eq!(stats.total_votes, 4);
    assert_eq!(stats.votes_today, 1);
    // Voters 7 and 8, plus vote 102 counted by its own id.
    assert_eq!(stats.unique_voters, 3);
    assert_eq!(stats.voter_fallbacks, 1);
    assert_eq!(stats.peak_voting_hour.as_deref(), Some("12:00"));
    // Three timestamped votes over 10..=12 March.
    assert_eq!(stats.average_votes_per_day, 1.0);
}

#[test]
fn ranking_and_dashboard_summary() {
    let participants = participants();
    let votes = votes();

    let ranked = rank_participants(&participants, &votes);
    assert_eq!(ranked[0].name, "Maria Silva");
    assert_eq!(ranked[0].votes, 2);
    assert_eq!(ranked[0].percentage, 66.7);
    assert_eq!(ranked[1].name, "Sem nome");
    assert_eq!(ranked[2].votes, 0);
    assert_eq!(ranked[2].position, 3);

    let summary = DashboardSummary::compute(&campaigns(), &participants, &votes);
    assert_eq!(summary.campaign_count, 3);
    assert_eq!(summary.active_participants, 2);
    assert_eq!(summary.total_votes, 4);
    assert_eq!(summary.total_raised, Decimal::new(750050, 2));
}

#[test]
fn activity_feed_is_newest_first() {
    let campaigns = campaigns();
    let participants = participants();
    let votes = votes();

    let feed = recent_activity_feed(
        [
            activity_entries(
                &campaigns,
                ActivityKind::Campaign,
                |c| format!("Nova campanha: {}", c.title),
                |c| c.created_at,
            ),
            activity_entries(
                &participants,
                ActivityKind::Participant,
                |p| format!("Novo participante: {}", p.name.as_deref().unwrap_or("")),
                |p| p.created_at,
            ),
            vote_batches(&votes, |v| v.created_at),
        ],
        4,
    );

    assert_eq!(feed.len(), 4);
    assert_eq!(feed[0].kind, ActivityKind::Vote);
    assert_eq!(feed[0].description, "1 novo voto");
    assert_eq!(feed[1].kind, ActivityKind::Campaign);
    assert_eq!(feed[2].description, "2 novos votos");
    assert!(feed.windows(2).all(|w| w[0].at >= w[1].at));
}
