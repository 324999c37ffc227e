//! Subcommand handlers.

use std::future::Future;
use std::io::BufRead;
use std::io::Write;

use chrono::Utc;
use kari_admin_lib::adapters::CAMPAIGN_SEARCH_FIELDS;
use kari_admin_lib::adapters::CampaignStatus;
use kari_admin_lib::adapters::ImageResolver;
use kari_admin_lib::adapters::PARTICIPANT_SEARCH_FIELDS;
use kari_admin_lib::adapters::ParticipantStatus;
use kari_admin_lib::adapters::Status;
use kari_admin_lib::adapters::TESTIMONIAL_SEARCH_FIELDS;
use kari_admin_lib::adapters::TestimonialCategory;
use kari_admin_lib::adapters::USER_SEARCH_FIELDS;
use kari_admin_lib::adapters::UserRole;
use kari_admin_lib::adapters::UserStatus;
use kari_admin_lib::adapters::WINNER_SEARCH_FIELDS;
use kari_admin_lib::adapters::WinnerStatus;
use kari_admin_lib::adapters::campaign_columns;
use kari_admin_lib::adapters::campaign_rows;
use kari_admin_lib::adapters::format_count;
use kari_admin_lib::adapters::format_currency;
use kari_admin_lib::adapters::format_percentage;
use kari_admin_lib::adapters::format_time_ago;
use kari_admin_lib::adapters::participant_columns;
use kari_admin_lib::adapters::participant_rows;
use kari_admin_lib::adapters::testimonial_columns;
use kari_admin_lib::adapters::testimonial_rows;
use kari_admin_lib::adapters::user_columns;
use kari_admin_lib::adapters::user_rows;
use kari_admin_lib::adapters::winner_columns;
use kari_admin_lib::adapters::winner_rows;
use kari_admin_lib::aggregate::ActivityKind;
use kari_admin_lib::aggregate::DashboardSummary;
use kari_admin_lib::aggregate::HOUR_BLOCK_LABELS;
use kari_admin_lib::aggregate::MONTH_LABELS;
use kari_admin_lib::aggregate::TimeUnit;
use kari_admin_lib::aggregate::VotingStats;
use kari_admin_lib::aggregate::WEEKDAY_LABELS;
use kari_admin_lib::aggregate::activity_entries;
use kari_admin_lib::aggregate::bucket_by_time_unit_in;
use kari_admin_lib::aggregate::group_by_category;
use kari_admin_lib::aggregate::rank_participants;
use kari_admin_lib::aggregate::recent_activity_feed;
use kari_admin_lib::aggregate::vote_batches;
use kari_admin_lib::error::Error as KariError;
use kari_admin_lib::model::Collection;
use kari_admin_lib::model::Record;
use kari_admin_lib::model::RecordId;
use kari_admin_lib::table::ALL;
use kari_admin_lib::table::ColumnSpec;
use kari_admin_lib::table::Direction;
use kari_admin_lib::table::Filter;
use kari_admin_lib::table::PagedTable;
use kari_admin_lib::table::SortState;

use crate::cli::CampaignArgs;
use crate::cli::ConfigCommand;
use crate::cli::ListArgs;
use crate::cli::LoginArgs;
use crate::cli::ParticipantArgs;
use crate::cli::TestimonialArgs;
use crate::cli::UserArgs;
use crate::cli::VotingArgs;
use crate::cli::WinnerArgs;
use crate::config::offset_from_hours;
use crate::context::Context;
use crate::error::CliError;
use crate::output::print_buckets;
use crate::output::print_pairs;
use crate::output::print_rows;
use crate::output::print_table_view;
use crate::settings;

/// Entries shown in the dashboard's recent activity list.
const ACTIVITY_LIMIT: usize = 10;

/// Categories shown in the participants-per-category chart.
const TOP_CATEGORIES: usize = 5;

// =============================================================================
// Session
// =============================================================================

pub async fn login(ctx: &Context, args: LoginArgs) -> Result<(), CliError> {
    let password = match args.password {
        Some(password) => password,
        None => read_password()?,
    };

    let user = ctx.session.login(&args.username, &password).await?;
    println!("Logado como {} <{}>", user.name, user.email);
    Ok(())
}

fn read_password() -> Result<String, CliError> {
    eprint!("Senha: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(CliError::Input("password must not be empty".into()));
    }
    Ok(password)
}

pub async fn logout(ctx: &Context) -> Result<(), CliError> {
    if !ctx.session.is_authenticated() {
        println!("Nenhuma sessão ativa");
        return Ok(());
    }
    ctx.session.logout().await;
    println!("Sessão encerrada");
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<(), CliError> {
    let user = ctx.session.current_user().ok_or(CliError::NotLoggedIn)?;
    let role = if user.is_admin {
        UserRole::Admin.label()
    } else {
        "Usuário"
    };
    print_pairs(
        "Sessão",
        &[
            ("Nome", user.name),
            ("E-mail", user.email),
            ("Perfil", role.to_string()),
            ("API", ctx.config.api_url.clone()),
        ],
    );
    Ok(())
}

// =============================================================================
// List pages
// =============================================================================

/// Loads a collection the page can live without.
///
/// Failures other than a rejected session are logged and leave the page with
/// an empty collection, so joins fall back to their "unknown" labels.
async fn optional<T, F>(collection: Collection, fetch: F) -> Result<Vec<T>, CliError>
where
    F: Future<Output = Result<Vec<T>, KariError>>,
{
    match fetch.await {
        Ok(items) => Ok(items),
        Err(err) if err.is_unauthorized() => Err(err.into()),
        Err(err) => {
            log::warn!("Could not load {}: {}", collection, err);
            eprintln!("aviso: não foi possível carregar {} ({})", collection, err);
            Ok(Vec::new())
        }
    }
}

/// `"all"` or a value of the taxonomy `S`.
fn taxonomy_filter<S: Status>(raw: &str) -> Result<Option<&'static str>, CliError> {
    if raw == ALL {
        return Ok(None);
    }
    Ok(Some(raw.parse::<S>()?.key()))
}

fn list_table(
    columns: Vec<ColumnSpec<Record>>,
    filter: Filter,
    list: &ListArgs,
    per_page: usize,
) -> Result<PagedTable<Record>, CliError> {
    let mut table = PagedTable::new(columns)
        .with_items_per_page(per_page)?
        .with_filter(filter);

    if let Some(term) = &list.search {
        table.set_search(term.as_str());
    }
    if let Some(column) = &list.sort {
        let direction = if list.desc {
            Direction::Desc
        } else {
            Direction::Asc
        };
        table = table.with_sort(SortState::by(column.as_str(), direction))?;
    }
    table.go_to_page(list.page);
    Ok(table)
}

fn parse_id(raw: &str) -> RecordId {
    match raw.parse::<i64>() {
        Ok(n) => RecordId::Int(n),
        Err(_) => RecordId::Text(raw.to_string()),
    }
}

pub async fn campaigns(ctx: &Context, args: CampaignArgs) -> Result<(), CliError> {
    let client = ctx.client()?;
    let images = ImageResolver::new(&ctx.config.api_url)?;

    let mut filter = Filter::new().search_in(CAMPAIGN_SEARCH_FIELDS);
    if let Some(status) = taxonomy_filter::<CampaignStatus>(&args.status)? {
        filter.set("status", status);
    }

    let (campaigns, participants, votes) = tokio::join!(
        client.campaigns(),
        optional(Collection::Participants, client.participants()),
        optional(Collection::Votes, client.votes()),
    );
    let rows = campaign_rows(&campaigns?, &participants?, &votes?, &images);

    let mut table = list_table(
        campaign_columns(ctx.config.offset),
        filter,
        &args.list,
        ctx.config.per_page,
    )?;
    print_table_view("Campanhas", &table.view(&rows)?);
    Ok(())
}

pub async fn participants(ctx: &Context, args: ParticipantArgs) -> Result<(), CliError> {
    let client = ctx.client()?;
    let images = ImageResolver::new(&ctx.config.api_url)?;

    let mut filter = Filter::new().search_in(PARTICIPANT_SEARCH_FIELDS);
    if let Some(status) = taxonomy_filter::<ParticipantStatus>(&args.status)? {
        filter.set("status", status);
    }
    if let Some(campaign) = &args.campaign {
        filter.set("campaign_id", parse_id(campaign).to_string());
    }

    let (participants, campaigns, votes) = tokio::join!(
        client.participants(),
        optional(Collection::Campaigns, client.campaigns()),
        optional(Collection::Votes, client.votes()),
    );
    let rows = participant_rows(&participants?, &campaigns?, &votes?, &images);

    let mut table = list_table(
        participant_columns(ctx.config.offset),
        filter,
        &args.list,
        ctx.config.per_page,
    )?;
    print_table_view("Participantes", &table.view(&rows)?);
    Ok(())
}

pub async fn winners(ctx: &Context, args: WinnerArgs) -> Result<(), CliError> {
    let client = ctx.client()?;

    let mut filter = Filter::new().search_in(WINNER_SEARCH_FIELDS);
    if let Some(status) = taxonomy_filter::<WinnerStatus>(&args.status)? {
        filter.set("status", status);
    }

    let (winners, participants, campaigns) = tokio::join!(
        client.winners(),
        optional(Collection::Participants, client.participants()),
        optional(Collection::Campaigns, client.campaigns()),
    );
    let rows = winner_rows(&winners?, &participants?, &campaigns?);

    let mut table = list_table(
        winner_columns(ctx.config.offset),
        filter,
        &args.list,
        ctx.config.per_page,
    )?;
    print_table_view("Vencedores", &table.view(&rows)?);
    Ok(())
}

pub async fn testimonials(ctx: &Context, args: TestimonialArgs) -> Result<(), CliError> {
    let client = ctx.client()?;
    let images = ImageResolver::new(&ctx.config.api_url)?;

    let mut filter = Filter::new().search_in(TESTIMONIAL_SEARCH_FIELDS);
    if let Some(category) = taxonomy_filter::<TestimonialCategory>(&args.category)? {
        filter.set("category", category);
    }

    let rows = testimonial_rows(&client.testimonials().await?, &images);
    let mut table = list_table(
        testimonial_columns(ctx.config.offset),
        filter,
        &args.list,
        ctx.config.per_page,
    )?;
    print_table_view("Depoimentos", &table.view(&rows)?);
    Ok(())
}

pub async fn users(ctx: &Context, args: UserArgs) -> Result<(), CliError> {
    let client = ctx.client()?;

    let mut filter = Filter::new().search_in(USER_SEARCH_FIELDS);
    if let Some(role) = taxonomy_filter::<UserRole>(&args.role)? {
        filter.set("role", role);
    }
    if let Some(status) = taxonomy_filter::<UserStatus>(&args.status)? {
        filter.set("status", status);
    }

    let rows = user_rows(&client.users().await?);
    let mut table = list_table(
        user_columns(ctx.config.offset),
        filter,
        &args.list,
        ctx.config.per_page,
    )?;
    print_table_view("Usuários", &table.view(&rows)?);
    Ok(())
}

// =============================================================================
// Dashboards
// =============================================================================

fn activity_label(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::Campaign => "Campanha",
        ActivityKind::Participant => "Participante",
        ActivityKind::Vote => "Votos",
        ActivityKind::Winner => "Vencedor",
    }
}

pub async fn dashboard(ctx: &Context) -> Result<(), CliError> {
    let client = ctx.client()?;
    let offset = ctx.config.offset;

    let (campaigns, participants, votes, winners) = tokio::join!(
        client.campaigns(),
        optional(Collection::Participants, client.participants()),
        optional(Collection::Votes, client.votes()),
        optional(Collection::Winners, client.winners()),
    );
    let (campaigns, participants, votes, winners) = (campaigns?, participants?, votes?, winners?);

    let summary = DashboardSummary::compute(&campaigns, &participants, &votes);
    print_pairs(
        "Resumo",
        &[
            ("Campanhas", format_count(summary.campaign_count as u64)),
            (
                "Participantes ativos",
                format_count(summary.active_participants as u64),
            ),
            ("Total de votos", format_count(summary.total_votes as u64)),
            ("Arrecadado", format_currency(summary.total_raised)),
        ],
    );

    let mut breakdown = summary.status_breakdown();
    for bucket in &mut breakdown {
        if let Ok(status) = bucket.label.parse::<CampaignStatus>() {
            bucket.label = status.plural_label().to_string();
        }
    }
    print_buckets("Campanhas por status", "Campanhas", &breakdown, &[]);

    let (categorized, uncategorized): (Vec<_>, Vec<_>) = campaigns
        .iter()
        .cloned()
        .partition(|c| c.category.as_deref().is_some_and(|s| !s.trim().is_empty()));
    if !uncategorized.is_empty() {
        log::warn!(
            "{} campaigns have no category and are left out of the category chart",
            uncategorized.len()
        );
    }
    let categories = group_by_category(
        &categorized,
        &participants,
        |c| c.category.clone(),
        |c| Some(c.id.clone()),
        |p| p.campaign_id.clone(),
        TOP_CATEGORIES,
    )?;
    print_buckets("Participantes por categoria", "Participantes", &categories, &[]);

    let monthly = bucket_by_time_unit_in(
        &campaigns,
        |c| c.created_at,
        TimeUnit::Month,
        &MONTH_LABELS,
        offset,
    )?
    .with_series(
        "participants",
        &bucket_by_time_unit_in(
            &participants,
            |p| p.created_at,
            TimeUnit::Month,
            &MONTH_LABELS,
            offset,
        )?,
    )?
    .with_series(
        "votes",
        &bucket_by_time_unit_in(&votes, |v| v.created_at, TimeUnit::Month, &MONTH_LABELS, offset)?,
    )?;
    print_buckets(
        "Tendência mensal",
        "Campanhas",
        &monthly.buckets,
        &[("participants", "Participantes"), ("votes", "Votos")],
    );

    let names: std::collections::HashMap<&RecordId, &str> = participants
        .iter()
        .map(|p| (&p.id, p.name.as_deref().unwrap_or("Sem nome")))
        .collect();
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
                |p| format!("Novo participante: {}", p.name.as_deref().unwrap_or("Sem nome")),
                |p| p.created_at,
            ),
            activity_entries(
                &winners,
                ActivityKind::Winner,
                |w| {
                    let name = names.get(&w.participant_id).copied().unwrap_or("Participante");
                    format!("{} venceu", name)
                },
                |w| w.announced_at,
            ),
            vote_batches(&votes, |v| v.created_at),
        ],
        ACTIVITY_LIMIT,
    );
    let now = Utc::now();
    print_rows(
        "Atividade recente",
        &["Quando", "Tipo", "Descrição"],
        feed.into_iter()
            .map(|entry| {
                vec![
                    entry
                        .at
                        .map(|at| format_time_ago(at, now))
                        .unwrap_or_else(|| "-".to_string()),
                    activity_label(entry.kind).to_string(),
                    entry.description,
                ]
            })
            .collect(),
    );
    Ok(())
}

pub async fn voting(ctx: &Context, args: VotingArgs) -> Result<(), CliError> {
    let client = ctx.client()?;
    let offset = ctx.config.offset;
    let campaign = args.campaign.as_deref().map(parse_id);

    let votes = match &campaign {
        Some(id) => client.campaign_votes(id).await?,
        None => client.votes().await?,
    };
    let mut participants = optional(Collection::Participants, client.participants()).await?;
    if let Some(id) = &campaign {
        participants.retain(|p| p.campaign_id.as_ref() == Some(id));
    }

    let stats = VotingStats::compute(&votes, Utc::now(), offset);
    let mut pairs = vec![
        ("Total de votos", format_count(stats.total_votes as u64)),
        ("Votos hoje", format_count(stats.votes_today as u64)),
        ("Eleitores únicos", format_count(stats.unique_voters as u64)),
        (
            "Média por dia",
            format!("{:.1}", stats.average_votes_per_day).replace('.', ","),
        ),
        (
            "Horário de pico",
            stats.peak_voting_hour.clone().unwrap_or_else(|| "-".to_string()),
        ),
    ];
    if stats.voter_fallbacks > 0 {
        pairs.push((
            "Votos sem eleitor",
            format_count(stats.voter_fallbacks as u64),
        ));
    }
    print_pairs("Votação", &pairs);

    let ranking = rank_participants(&participants, &votes);
    print_rows(
        "Ranking",
        &["#", "Participante", "Votos", "%"],
        ranking
            .into_iter()
            .take(args.top)
            .map(|r| {
                vec![
                    format!("{}º", r.position),
                    r.name,
                    format_count(r.votes as u64),
                    format_percentage(r.percentage),
                ]
            })
            .collect(),
    );

    let hourly = bucket_by_time_unit_in(
        &votes,
        |v| v.created_at,
        TimeUnit::Hour,
        &HOUR_BLOCK_LABELS,
        offset,
    )?;
    print_buckets("Votos por horário", "Votos", &hourly.buckets, &[]);

    let weekly = bucket_by_time_unit_in(
        &votes,
        |v| v.created_at,
        TimeUnit::DayOfWeek,
        &WEEKDAY_LABELS,
        offset,
    )?;
    print_buckets("Votos por dia da semana", "Votos", &weekly.buckets, &[]);
    Ok(())
}

// =============================================================================
// Config
// =============================================================================

pub async fn config(ctx: &Context, command: ConfigCommand) -> Result<(), CliError> {
    match command {
        ConfigCommand::Show => {
            let stored = ctx.settings.config_keys().await?;
            print_pairs(
                "Configuração",
                &[
                    ("API", ctx.config.api_url.clone()),
                    ("Itens por página", ctx.config.per_page.to_string()),
                    ("Fuso (UTC)", format!("{:+}", ctx.config.utc_offset)),
                    (
                        "Salvas",
                        if stored.is_empty() {
                            "-".to_string()
                        } else {
                            stored.join(", ")
                        },
                    ),
                ],
            );
        }
        ConfigCommand::SetApiUrl { url } => {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CliError::Input(format!("{} is not an http(s) URL", url)));
            }
            let url = url.trim_end_matches('/').to_string();
            ctx.settings.set(&settings::API_URL, &url).await?;
            println!("API salva: {}", url);
        }
        ConfigCommand::SetPerPage { per_page } => {
            if per_page == 0 {
                return Err(CliError::Input("per-page must be at least 1".into()));
            }
            ctx.settings.set(&settings::PER_PAGE, &per_page).await?;
            println!("Itens por página: {}", per_page);
        }
        ConfigCommand::SetUtcOffset { hours } => {
            offset_from_hours(hours)?;
            ctx.settings.set(&settings::UTC_OFFSET, &hours).await?;
            println!("Fuso salvo: UTC{:+}", hours);
        }
    }
    Ok(())
}
