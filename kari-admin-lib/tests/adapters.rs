//! API payloads through the adapters into rendered table pages.

use chrono::FixedOffset;
use kari_admin_lib::adapters::CampaignStatus;
use kari_admin_lib::adapters::ImageResolver;
use kari_admin_lib::adapters::PARTICIPANT_SEARCH_FIELDS;
use kari_admin_lib::adapters::Status;
use kari_admin_lib::adapters::Tone;
use kari_admin_lib::adapters::participant_columns;
use kari_admin_lib::adapters::participant_rows;
use kari_admin_lib::adapters::user_columns;
use kari_admin_lib::adapters::user_rows;
use kari_admin_lib::error::AdapterError;
use kari_admin_lib::model::Collection;
use kari_admin_lib::model::parse_collection;
use kari_admin_lib::model::types::Campaign;
use kari_admin_lib::model::types::Participant;
use kari_admin_lib::model::types::User;
use kari_admin_lib::model::types::Vote;
use kari_admin_lib::table::Filter;
use kari_admin_lib::table::PagedTable;
use kari_admin_lib::table::TableView;
use kari_admin_lib::table::row_texts;
use serde_json::json;

fn brasilia() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).unwrap()
}

fn fixtures() -> (Vec<Campaign>, Vec<Participant>, Vec<Vote>) {
    let campaigns = parse_collection(
        Collection::Campaigns,
        json!([{"id": 1, "title": "Educação para Todos", "status": "active"}]),
    )
    .unwrap();
    let participants = parse_collection(
        Collection::Participants,
        json!([
            {"id": 1, "name": "Maria Silva", "email": "maria@example.com",
             "campaign_id": 1, "status": "active",
             "created_at": "2024-01-15T02:00:00Z"},
            {"id": 2, "name": "João Santos", "campaign_id": 99, "status": "suspended"},
            {"id": 3, "name": "Ana Costa", "campaign_id": 1, "status": "inactive"}
        ]),
    )
    .unwrap();
    let votes: Vec<Vote> = (0..101)
        .map(|i| json!({"id": i, "participant_id": 1, "campaign_id": 1}))
        .chain([json!({"id": 500, "participant_id": 3})])
        .map(|v| serde_json::from_value(v).unwrap())
        .collect();
    (campaigns, participants, votes)
}

#[test]
fn participants_page_renders_badges_and_joins() {
    let (campaigns, participants, votes) = fixtures();
    let images = ImageResolver::new("http://127.0.0.1:8000/api/v1").unwrap();
    let rows = participant_rows(&participants, &campaigns, &votes, &images);

    let mut table = PagedTable::new(participant_columns(brasilia()))
        .with_filter(Filter::new().search_in(PARTICIPANT_SEARCH_FIELDS));
    table.toggle_sort("votes").unwrap();
    table.toggle_sort("votes").unwrap();

    let TableView::Rows { rows: rendered, headers, .. } = table.view(&rows).unwrap() else {
        panic!("expected rows");
    };

    assert_eq!(headers[5].text, "Votos ↓");

    let first = &rendered[0].cells;
    assert_eq!(
        row_texts(first),
        vec![
            "Maria Silva",
            "maria@example.com",
            "-",
            "Educação para Todos",
            "14/01/2024",
            "101",
            "Vencedor"
        ]
    );

    // Unknown campaign join and an unknown raw status shown as-is.
    let joao = rendered
        .iter()
        .find(|r| r.cells[0].text == "João Santos")
        .unwrap();
    assert_eq!(joao.cells[3].text, "Campanha desconhecida");
    assert_eq!(joao.cells[6].text, "suspended");
    assert_eq!(joao.cells[6].tone, Some(Tone::Gray));
}

#[test]
fn status_filter_selects_exact_values() {
    let (campaigns, participants, votes) = fixtures();
    let images = ImageResolver::new("http://127.0.0.1:8000/api/v1").unwrap();
    let rows = participant_rows(&participants, &campaigns, &votes, &images);

    let mut table = PagedTable::new(participant_columns(brasilia()))
        .with_filter(Filter::new().with("status", "inactive"));
    let TableView::Rows { rows: rendered, .. } = table.view(&rows).unwrap() else {
        panic!("expected rows");
    };
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].cells[0].text, "Ana Costa");

    table.set_filter(Filter::new().with("status", "all"));
    assert_eq!(table.filter(), &Filter::new());
}

#[test]
fn users_page_shows_never_for_missing_login() {
    let users: Vec<User> = parse_collection(
        Collection::Users,
        json!([
            {"id": 1, "email": "admin@kariajuda.com", "full_name": "Admin Kari",
             "is_superuser": true, "last_login": "2024-03-01T12:00:00Z"},
            {"id": 2, "email": "viewer@kariajuda.com", "is_active": false}
        ]),
    )
    .unwrap();

    let rows = user_rows(&users);
    let mut table = PagedTable::new(user_columns(brasilia()));
    let TableView::Rows { rows: rendered, .. } = table.view(&rows).unwrap() else {
        panic!("expected rows");
    };
    let texts: Vec<Vec<&str>> = rendered.iter().map(|r| row_texts(&r.cells)).collect();
    assert!(texts[0].contains(&"Administrador"));
    assert!(texts[1].contains(&"Nunca"));
    assert!(texts[1].contains(&"Inativo"));
}

#[test]
fn unknown_status_is_an_error_for_strict_callers() {
    let err = "archived".parse::<CampaignStatus>().unwrap_err();
    assert!(matches!(
        err,
        AdapterError::UnknownStatus { ref value, .. } if value == "archived"
    ));
    assert_eq!(CampaignStatus::Completed.label(), "Encerrada");
}
