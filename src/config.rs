// src/config.rs
use crate::api::PacingPolicy;
use crate::constants::{DEFAULT_CHECK_INTERVAL_DAYS, DEFAULT_REQUEST_INTERVAL_SECS};
use crate::error::AppError;
use crate::types::{ApiToken, ChannelId, DatabaseId, GuildId};
use clap::Parser;
use std::default::Default;
use std::time::Duration;

pub const ENV_DISCORD_TOKEN: &str = "DISCORD_TOKEN";
pub const ENV_DISCORD_GUILD_ID: &str = "DISCORD_GUILD_ID";
pub const ENV_NEW_ITEM_CHANNEL_ID: &str = "NEW_ITEM_NOTIFICATION_DISCORD_CHANNEL_ID";
pub const ENV_JOB_REPORT_CHANNEL_ID: &str = "JOB_REPORT_DISCORD_CHANNEL_ID";
pub const ENV_NOTION_TOKEN: &str = "NOTION_TOKEN";
pub const ENV_NOTION_DATABASE_ID: &str = "NOTION_DATABASE_ID";
pub const ENV_CHECK_INTERVAL: &str = "CHECK_INTERVAL";
pub const ENV_REQUEST_INTERVAL: &str = "REQUEST_INTERVAL";

/// Parsed command-line input. Credentials and channel ids come from the
/// environment; flags only tune the run.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Days before today whose saved items count as new (overrides CHECK_INTERVAL)
    #[arg(long)]
    pub check_interval: Option<u32>,

    /// Minimum seconds between two Neos folder resolutions (overrides REQUEST_INTERVAL)
    #[arg(long)]
    pub request_interval: Option<u64>,

    /// Also pace after failed resolutions
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub pace_failures: bool,

    /// Crawl and render, but print messages to stdout instead of posting them
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Resolved job configuration.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub discord_token: ApiToken,
    pub discord_guild_id: GuildId,
    pub new_item_channel_id: ChannelId,
    pub job_report_channel_id: ChannelId,
    pub notion_token: ApiToken,
    pub notion_database_id: DatabaseId,
    pub check_interval_days: u32,
    pub request_interval: Duration,
    pub pacing: PacingPolicy,
    pub dry_run: bool,
    pub verbose: bool,
}

impl JobConfig {
    /// Resolves the configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    /// Resolves against an arbitrary variable lookup.
    pub fn resolve_with<F>(cli: CommandLineInput, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, AppError> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| {
                    AppError::MissingConfiguration(format!(
                        "{} environment variable not set",
                        key
                    ))
                })
        };

        let discord_token = ApiToken::new(required(ENV_DISCORD_TOKEN)?)?;
        let discord_guild_id = GuildId::parse(&required(ENV_DISCORD_GUILD_ID)?)?;
        let new_item_channel_id = ChannelId::parse(&required(ENV_NEW_ITEM_CHANNEL_ID)?)?;
        let job_report_channel_id = ChannelId::parse(&required(ENV_JOB_REPORT_CHANNEL_ID)?)?;
        let notion_token = ApiToken::new(required(ENV_NOTION_TOKEN)?)?;
        let notion_database_id = DatabaseId::parse(&required(ENV_NOTION_DATABASE_ID)?)?;

        let check_interval_days = cli
            .check_interval
            .filter(|days| *days > 0)
            .or_else(|| positive_number(lookup(ENV_CHECK_INTERVAL)))
            .unwrap_or(DEFAULT_CHECK_INTERVAL_DAYS);
        let request_interval_secs = cli
            .request_interval
            .filter(|secs| *secs > 0)
            .or_else(|| positive_number(lookup(ENV_REQUEST_INTERVAL)))
            .unwrap_or(DEFAULT_REQUEST_INTERVAL_SECS);

        let pacing = if cli.pace_failures {
            PacingPolicy::AfterEveryCall
        } else {
            PacingPolicy::AfterSuccess
        };

        Ok(JobConfig {
            discord_token,
            discord_guild_id,
            new_item_channel_id,
            job_report_channel_id,
            notion_token,
            notion_database_id,
            check_interval_days,
            request_interval: Duration::from_secs(request_interval_secs),
            pacing,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }
}

/// A strictly positive number, or `None` for anything else.
fn positive_number<T>(raw: Option<String>) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    raw.and_then(|value| value.trim().parse::<T>().ok())
        .filter(|value| *value > T::default())
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            discord_token: ApiToken::new("discord_token_for_testing_only")
                .expect("Default Discord token should be valid"),
            discord_guild_id: GuildId::parse("100000000000000001")
                .expect("Default guild id should be valid"),
            new_item_channel_id: ChannelId::parse("200000000000000002")
                .expect("Default channel id should be valid"),
            job_report_channel_id: ChannelId::parse("300000000000000003")
                .expect("Default channel id should be valid"),
            notion_token: ApiToken::new("secret_notion_token_for_testing_only")
                .expect("Default Notion token should be valid"),
            notion_database_id: DatabaseId::parse("12345678123456781234567812345678")
                .expect("Default database id should be valid"),
            check_interval_days: DEFAULT_CHECK_INTERVAL_DAYS,
            request_interval: Duration::from_secs(DEFAULT_REQUEST_INTERVAL_SECS),
            pacing: PacingPolicy::default(),
            dry_run: false,
            verbose: false,
        }
    }
}
