mod cli;
mod commands;
mod config;
mod context;
mod error;
mod output;
mod paths;
mod settings;

use std::fs::File;

use clap::Parser;
use simplelog::WriteLogger;

use crate::cli::Cli;
use crate::cli::Command;
use crate::config::Config;
use crate::context::Context;
use crate::error::CliError;
use crate::settings::Settings;
use crate::settings::SqliteBackend;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        eprintln!("erro: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn init_logging(cli: &Cli) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        eprintln!("aviso: no data directory, logging disabled");
        return;
    };
    if let Some(dir) = path.parent()
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        eprintln!("aviso: could not create {}: {}", dir.display(), e);
        return;
    }
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("aviso: could not create {}: {}", path.display(), e);
            return;
        }
    };
    if let Err(e) = WriteLogger::init(cli.log_level.into(), simplelog::Config::default(), file) {
        eprintln!("aviso: could not initialize logger: {}", e);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let db = paths::settings_db()
        .ok_or_else(|| CliError::Input("could not determine a data directory".into()))?;
    let settings = Settings::new(SqliteBackend::open(&db).await?);

    let config = Config::resolve(&cli, &settings).await?;
    log::info!("Using API {}", config.api_url);

    let ctx = Context::load(config, settings).await?;
    let result = dispatch(&ctx, cli.command).await;

    // Login, logout and rejected tokens all change the session, even when the
    // command itself failed.
    if let Err(e) = ctx.persist_session().await {
        log::error!("Could not save session: {}", e);
        if result.is_ok() {
            return Err(e);
        }
    }
    result
}

async fn dispatch(ctx: &Context, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login(args) => commands::login(ctx, args).await,
        Command::Logout => commands::logout(ctx).await,
        Command::Whoami => commands::whoami(ctx),
        Command::Campaigns(args) => commands::campaigns(ctx, args).await,
        Command::Participants(args) => commands::participants(ctx, args).await,
        Command::Winners(args) => commands::winners(ctx, args).await,
        Command::Testimonials(args) => commands::testimonials(ctx, args).await,
        Command::Users(args) => commands::users(ctx, args).await,
        Command::Dashboard => commands::dashboard(ctx).await,
        Command::Voting(args) => commands::voting(ctx, args).await,
        Command::Config(command) => commands::config(ctx, command).await,
    }
}
