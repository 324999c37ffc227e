//! Command line arguments.

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
    name = "kari-admin",
    version,
    about = "Kari admin dashboard in the terminal",
    long_about = "Read-only admin dashboard for the Kari crowdfunding platform.\n\n\
                  Log in once with `kari-admin login`; the session is kept in the\n\
                  settings database until `kari-admin logout` or until the API\n\
                  rejects it."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API base URL (overrides the stored setting).
    #[arg(long = "api-url", env = "KARI_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Hours from UTC used for dates and hourly charts (overrides the stored setting).
    #[arg(
        long = "utc-offset",
        env = "KARI_UTC_OFFSET",
        global = true,
        allow_hyphen_values = true
    )]
    pub utc_offset: Option<i32>,

    /// Rows per page (overrides the stored setting).
    #[arg(long = "per-page", global = true)]
    pub per_page: Option<u32>,

    /// Log level written to the log file.
    #[arg(long = "log-level", value_enum, default_value = "info", global = true)]
    pub log_level: LogLevelArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in with e-mail and password.
    Login(LoginArgs),
    /// End the saved session.
    Logout,
    /// Show who is logged in.
    Whoami,
    /// List campaigns.
    Campaigns(CampaignArgs),
    /// List participants.
    Participants(ParticipantArgs),
    /// List winners.
    Winners(WinnerArgs),
    /// List testimonials.
    Testimonials(TestimonialArgs),
    /// List admin users.
    Users(UserArgs),
    /// Overview: totals, status breakdown, categories, trends and recent activity.
    Dashboard,
    /// Voting statistics, ranking and vote distribution.
    Voting(VotingArgs),
    /// Show or change stored settings.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args)]
pub struct LoginArgs {
    /// Account e-mail.
    #[arg(long, short = 'u', env = "KARI_USERNAME")]
    pub username: String,

    /// Password; read from standard input when omitted.
    #[arg(long, env = "KARI_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Options shared by every list page.
#[derive(Args, Clone)]
pub struct ListArgs {
    /// Case-insensitive search.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Column to sort by.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show.
    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: usize,
}

#[derive(Args)]
pub struct CampaignArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// active, pending, completed or all.
    #[arg(long, default_value = "all")]
    pub status: String,
}

#[derive(Args)]
pub struct ParticipantArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// active, inactive, winner or all.
    #[arg(long, default_value = "all")]
    pub status: String,

    /// Only participants of this campaign id.
    #[arg(long)]
    pub campaign: Option<String>,
}

#[derive(Args)]
pub struct WinnerArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// pending, announced, claimed or all.
    #[arg(long, default_value = "all")]
    pub status: String,
}

#[derive(Args)]
pub struct TestimonialArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Category key (moradia, saude, ...) or all.
    #[arg(long, default_value = "all")]
    pub category: String,
}

#[derive(Args)]
pub struct UserArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// admin, moderator, viewer or all.
    #[arg(long, default_value = "all")]
    pub role: String,

    /// active, inactive or all.
    #[arg(long, default_value = "all")]
    pub status: String,
}

#[derive(Args)]
pub struct VotingArgs {
    /// Restrict to one campaign id.
    #[arg(long)]
    pub campaign: Option<String>,

    /// How many participants the ranking shows.
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings.
    Show,
    /// Store the API base URL.
    SetApiUrl { url: String },
    /// Store the number of rows per page.
    SetPerPage { per_page: u32 },
    /// Store the UTC offset in hours.
    SetUtcOffset {
        #[arg(allow_hyphen_values = true)]
        hours: i32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for simplelog::LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Off => Self::Off,
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
            LogLevelArg::Trace => Self::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_offset_and_list_flags() {
        let cli = Cli::try_parse_from([
            "kari-admin",
            "--utc-offset",
            "-3",
            "participants",
            "--status",
            "winner",
            "--sort",
            "votes",
            "--desc",
            "-p",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.utc_offset, Some(-3));
        let Command::Participants(args) = cli.command else {
            panic!("expected participants");
        };
        assert_eq!(args.status, "winner");
        assert_eq!(args.list.sort.as_deref(), Some("votes"));
        assert!(args.list.desc);
        assert_eq!(args.list.page, 2);
    }
}
