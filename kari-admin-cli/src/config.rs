//! Effective configuration: command line, then stored settings, then defaults.

use chrono::FixedOffset;
use kari_admin_lib::LOCAL_API_URL;
use kari_admin_lib::table::DEFAULT_ITEMS_PER_PAGE;

use crate::cli::Cli;
use crate::error::CliError;
use crate::settings;
use crate::settings::Settings;

/// Brasília time, where the platform's admins work.
pub const DEFAULT_UTC_OFFSET: i32 = -3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub per_page: usize,
    pub utc_offset: i32,
    pub offset: FixedOffset,
}

impl Config {
    pub async fn resolve(cli: &Cli, settings: &Settings) -> Result<Self, CliError> {
        let stored_url = settings.get_lenient(&settings::API_URL).await?;
        let stored_per_page = settings.get_lenient(&settings::PER_PAGE).await?;
        let stored_offset = settings.get_lenient(&settings::UTC_OFFSET).await?;

        Self::merge(
            cli.api_url.clone().or(stored_url),
            cli.per_page.or(stored_per_page),
            cli.utc_offset.or(stored_offset),
        )
    }

    fn merge(
        api_url: Option<String>,
        per_page: Option<u32>,
        utc_offset: Option<i32>,
    ) -> Result<Self, CliError> {
        let per_page = match per_page {
            Some(0) => return Err(CliError::Input("--per-page must be at least 1".into())),
            Some(n) => n as usize,
            None => DEFAULT_ITEMS_PER_PAGE,
        };
        let utc_offset = utc_offset.unwrap_or(DEFAULT_UTC_OFFSET);
        let offset = offset_from_hours(utc_offset)?;

        Ok(Self {
            api_url: api_url.unwrap_or_else(|| LOCAL_API_URL.to_string()),
            per_page,
            utc_offset,
            offset,
        })
    }
}

pub fn offset_from_hours(hours: i32) -> Result<FixedOffset, CliError> {
    let out_of_range = || CliError::Input(format!("UTC offset {} is out of range", hours));
    if !(-12..=14).contains(&hours) {
        return Err(out_of_range());
    }
    FixedOffset::east_opt(hours * 3600).ok_or_else(out_of_range)
}
