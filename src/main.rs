// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use neos2discord::{
    CommandLineInput, ConsoleTransport, DiscordHttpClient, JobCode, JobConfig, MessageTransport,
    NeosHttpClient, NewItemNotificationJob, NotionHttpClient,
};
use std::fs;
use std::process;
use std::sync::Arc;

/// Sets up logging configuration. Every line carries the run's job code.
fn setup_logging(verbose: bool, job_code: &JobCode) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("neos2discord.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // `{` and `}` are pattern syntax; the job code is digits only.
    let pattern = format!("{{d(%Y-%m-%d %H:%M:%S)}} [{{l}}] {} - {{m}}{{n}}", job_code);

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(&pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(&pattern)))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Wires the HTTP clients into a job.
fn build_job(config: JobConfig, job_code: JobCode) -> anyhow::Result<NewItemNotificationJob> {
    let neos = Arc::new(NeosHttpClient::new().context("building Neos client")?);
    let roots = Arc::new(
        NotionHttpClient::new(&config.notion_token, config.notion_database_id.clone())
            .context("building Notion client")?,
    );
    let transport: Arc<dyn MessageTransport> = if config.dry_run {
        log::info!("Dry run: messages are printed, not posted");
        Arc::new(ConsoleTransport::new())
    } else {
        Arc::new(DiscordHttpClient::new(&config.discord_token).context("building Discord client")?)
    };

    Ok(NewItemNotificationJob::new(
        config, job_code, neos, roots, transport,
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();
    let job_code = JobCode::generate();

    setup_logging(cli.verbose, &job_code)?;

    let config = match JobConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            log::error!("job {} cannot start: {}", job_code, e);
            process::exit(e.exit_code());
        }
    };
    let job = build_job(config, job_code)?;

    let summary = match job.run().await {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("job {} failed: {}", job.job_code(), e);
            process::exit(e.exit_code());
        }
    };
    log::info!(
        "done: {} new items from {} creators, {} messages delivered, {} dropped, {} link errors",
        summary.counts.new_items,
        summary.creators,
        summary.delivery.delivered,
        summary.delivery.dropped,
        summary.link_errors
    );

    Ok(())
}
