//! Column sets of the list pages

use chrono::FixedOffset;
use rust_decimal::Decimal;

use super::Badge;
use super::CampaignStatus;
use super::ParticipantStatus;
use super::Status;
use super::TestimonialCategory;
use super::Tone;
use super::UserRole;
use super::UserStatus;
use super::WinnerStatus;
use super::badge_or_fallback;
use super::format_count;
use super::format_currency;
use super::format_date;
use super::format_date_range;
use super::format_last_login;
use super::format_percentage;
use crate::model::Record;
use crate::table::Cell;
use crate::table::ColumnSpec;
use crate::table::ColumnWidth;

/// Status badge for a raw field, with the raw value as fallback.
pub fn badge_cell<S: Status>(row: &Record, key: &str) -> Cell {
    match row.get_string(key).ok().flatten() {
        Some(raw) if !raw.is_empty() => badge_or_fallback::<S>(raw).into(),
        _ => Cell::empty(),
    }
}

fn date_cell(row: &Record, key: &str, offset: FixedOffset) -> Cell {
    match row.get_datetime(key).ok().flatten() {
        Some(at) => Cell::plain(format_date(&at.with_timezone(&offset))),
        None => Cell::empty(),
    }
}

fn count_cell(row: &Record, key: &str) -> Cell {
    match row.get_int(key).ok().flatten() {
        Some(n) => Cell::plain(format_count(n.max(0).unsigned_abs())),
        None => Cell::empty(),
    }
}

fn decimal(row: &Record, key: &str) -> Option<Decimal> {
    row.get_decimal(key).ok().flatten()
}

fn flag_cell(row: &Record, key: &str, on: Badge, off: Option<Badge>) -> Cell {
    match (row.get_bool(key).ok().flatten(), off) {
        (Some(true), _) => on.into(),
        (Some(false), Some(off)) => off.into(),
        _ => Cell::empty(),
    }
}

fn col(key: &str, header: &str) -> ColumnSpec<Record> {
    ColumnSpec::new(key, header)
}

pub fn campaign_columns(offset: FixedOffset) -> Vec<ColumnSpec<Record>> {
    vec![
        col("title", "Campanha")
            .sortable()
            .width(ColumnWidth::Percent(30)),
        col("start_date", "Período")
            .sortable()
            .render(move |row| {
                let start = row.get_datetime("start_date").ok().flatten();
                let end = row.get_datetime("end_date").ok().flatten();
                let start = start.map(|at| at.with_timezone(&offset));
                let end = end.map(|at| at.with_timezone(&offset));
                match (&start, &end) {
                    (None, None) => Cell::empty(),
                    _ => Cell::plain(format_date_range(start.as_ref(), end.as_ref())),
                }
            }),
        col("status", "Status")
            .sortable()
            .render(|row| badge_cell::<CampaignStatus>(row, "status")),
        col("participants", "Participantes")
            .sortable()
            .render(|row| count_cell(row, "participants")),
        col("votes", "Votos")
            .sortable()
            .render(|row| match row.get_int("votes").ok().flatten() {
                Some(n) => Cell::plain(format!("{} votos", format_count(n.max(0).unsigned_abs()))),
                None => Cell::empty(),
            }),
        col("raised", "Arrecadação")
            .sortable()
            .render(|row| {
                let raised = decimal(row, "raised").unwrap_or(Decimal::ZERO);
                let progress = row.get_float("progress").ok().flatten().unwrap_or(0.0);
                match decimal(row, "goal") {
                    Some(goal) => Cell::plain(format!(
                        "{} / {} ({})",
                        format_currency(raised),
                        format_currency(goal),
                        format_percentage(progress)
                    )),
                    None => Cell::plain(format_currency(raised)),
                }
            }),
    ]
}

pub fn participant_columns(offset: FixedOffset) -> Vec<ColumnSpec<Record>> {
    vec![
        col("name", "Participante").sortable(),
        col("email", "E-mail"),
        col("phone", "Telefone"),
        col("campaign_name", "Campanha").sortable(),
        col("registration_date", "Cadastro")
            .sortable()
            .render(move |row| date_cell(row, "registration_date", offset)),
        col("votes", "Votos")
            .sortable()
            .render(|row| count_cell(row, "votes")),
        col("status", "Status")
            .sortable()
            .render(|row| badge_cell::<ParticipantStatus>(row, "status")),
    ]
}

pub fn winner_columns(offset: FixedOffset) -> Vec<ColumnSpec<Record>> {
    vec![
        col("position", "Posição")
            .sortable()
            .width(ColumnWidth::Chars(8))
            .render(|row| match row.get_int("position").ok().flatten() {
                Some(n) => Cell::plain(format!("{}º", n)),
                None => Cell::empty(),
            }),
        col("participant_name", "Participante").sortable(),
        col("campaign_name", "Campanha").sortable(),
        col("votes", "Votos")
            .sortable()
            .render(|row| count_cell(row, "votes")),
        col("prize", "Prêmio"),
        col("announced_at", "Anúncio")
            .sortable()
            .render(move |row| date_cell(row, "announced_at", offset)),
        col("status", "Status")
            .sortable()
            .render(|row| badge_cell::<WinnerStatus>(row, "status")),
    ]
}

pub fn testimonial_columns(offset: FixedOffset) -> Vec<ColumnSpec<Record>> {
    vec![
        col("title", "Entrega").sortable(),
        col("recipient_name", "Beneficiário").sortable(),
        col("donor_name", "Doador"),
        col("category", "Categoria")
            .sortable()
            .render(|row| badge_cell::<TestimonialCategory>(row, "category")),
        col("delivery_date", "Data da entrega")
            .sortable()
            .render(move |row| date_cell(row, "delivery_date", offset)),
        col("is_featured", "Destaque")
            .render(|row| flag_cell(row, "is_featured", Badge::new("Destaque", Tone::Yellow), None)),
        col("is_active", "Status").sortable().render(|row| {
            flag_cell(
                row,
                "is_active",
                Badge::new("Ativo", Tone::Green),
                Some(Badge::new("Inativo", Tone::Red)),
            )
        }),
    ]
}

pub fn user_columns(offset: FixedOffset) -> Vec<ColumnSpec<Record>> {
    vec![
        col("name", "Usuário").sortable(),
        col("email", "E-mail").sortable(),
        col("role", "Função")
            .sortable()
            .render(|row| badge_cell::<UserRole>(row, "role")),
        col("status", "Status")
            .sortable()
            .render(|row| badge_cell::<UserStatus>(row, "status")),
        col("last_login", "Último acesso")
            .sortable()
            .render(move |row| {
                let at = row.get_datetime("last_login").ok().flatten();
                let at = at.map(|at| at.with_timezone(&offset));
                Cell::plain(format_last_login(at.as_ref()))
            }),
    ]
}
