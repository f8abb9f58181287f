// src/job.rs
//! The new-item notification run: resolve channels, crawl, digest, notify,
//! and report to the operator channel around all of it.

use crate::api::{CrawlReport, InventoryCrawler, NeosRepository};
use crate::config::JobConfig;
use crate::digest::{digest_new_items, NewItemDigest, NewItemWindow};
use crate::discord::{MessageTransport, ReadinessGate};
use crate::error::AppError;
use crate::model::{CreatorBucket, ObjectStore};
use crate::notify::reports::{
    configuration_error_report, finish_report, start_report, unknown_error_report,
};
use crate::notify::{render_digest, CreatorProfile, DeliveryPipeline, DeliveryReport, RunCounts};
use crate::notion::RootLinkSource;
use crate::pipeline::{DigestComposer, InventorySource, NotificationDelivery};
use crate::types::JobCode;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// What a completed run did.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    pub window: NewItemWindow,
    pub counts: RunCounts,
    pub resolution_calls: usize,
    pub link_errors: usize,
    pub creators: usize,
    pub delivery: DeliveryReport,
    pub elapsed: Duration,
}

pub struct NewItemNotificationJob {
    config: JobConfig,
    job_code: JobCode,
    neos: Arc<dyn NeosRepository>,
    roots: Arc<dyn RootLinkSource>,
    transport: Arc<dyn MessageTransport>,
    gate: Arc<ReadinessGate>,
    delivery: DeliveryPipeline,
    window: Option<NewItemWindow>,
}

impl NewItemNotificationJob {
    pub fn new(
        config: JobConfig,
        job_code: JobCode,
        neos: Arc<dyn NeosRepository>,
        roots: Arc<dyn RootLinkSource>,
        transport: Arc<dyn MessageTransport>,
    ) -> Self {
        let gate = Arc::new(ReadinessGate::new());
        let delivery = DeliveryPipeline::new(Arc::clone(&transport), Arc::clone(&gate));
        Self {
            config,
            job_code,
            neos,
            roots,
            transport,
            gate,
            delivery,
            window: None,
        }
    }

    /// Use a fixed window instead of the one ending today.
    pub fn with_window(mut self, window: NewItemWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn job_code(&self) -> &JobCode {
        &self.job_code
    }

    /// Run once.
    ///
    /// Configuration problems end the run before any crawling. Anything that
    /// goes wrong after that is reported as an unknown error on the operator
    /// channel and returned.
    pub async fn run(&self) -> Result<JobSummary, AppError> {
        let started = Instant::now();
        log::info!("start job newItemNotification");

        let window = match self.window {
            Some(window) => window,
            None => NewItemWindow::ending_today(self.config.check_interval_days)?,
        };

        self.resolve_channels().await?;

        match self.check(window, started).await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                log::error!("run failed: {}", e);
                self.delivery
                    .deliver(
                        &self.config.job_report_channel_id,
                        &unknown_error_report(&self.job_code),
                    )
                    .await;
                Err(e)
            }
        }
    }

    /// Both channels must exist in the configured guild. Opens the gate.
    async fn resolve_channels(&self) -> Result<(), AppError> {
        let guild_id = &self.config.discord_guild_id;

        self.transport
            .resolve_channel(guild_id, &self.config.job_report_channel_id)
            .await?;

        if let Err(e) = self
            .transport
            .resolve_channel(guild_id, &self.config.new_item_channel_id)
            .await
        {
            log::error!("new item channel unavailable: {}", e);
            self.gate.open();
            self.delivery
                .deliver(
                    &self.config.job_report_channel_id,
                    &configuration_error_report(&e.to_string(), &self.job_code),
                )
                .await;
            return Err(e);
        }

        self.gate.open();
        Ok(())
    }

    async fn check(&self, window: NewItemWindow, started: Instant) -> Result<JobSummary, AppError> {
        log::info!(
            "start checking.({}). checkInterval: {}",
            window,
            window.check_interval_days()
        );
        self.delivery
            .deliver(
                &self.config.job_report_channel_id,
                &start_report(&window, &self.job_code),
            )
            .await;

        let crawl = self.discover().await?;
        let digest = self.compose(&crawl.store, &window);

        let counts = RunCounts {
            checked_links: crawl.registry.len(),
            checked_objects: crawl.store.len(),
            new_items: digest.new_item_count,
        };
        log::info!("checked link count: {}", counts.checked_links);
        log::info!("checked object count: {}", counts.checked_objects);
        log::info!("newItem count: {}", counts.new_items);

        self.notify(&digest.buckets, &window).await;

        let elapsed = started.elapsed();
        self.delivery
            .deliver(
                &self.config.job_report_channel_id,
                &finish_report(&window, elapsed, counts, &self.job_code),
            )
            .await;
        log::info!(
            "finish checking.({}). processTime: {}",
            window,
            elapsed.as_millis()
        );

        Ok(JobSummary {
            window,
            counts,
            resolution_calls: crawl.calls,
            link_errors: crawl.error_count(),
            creators: digest.buckets.len(),
            delivery: self.delivery.report(),
            elapsed,
        })
    }

    async fn profile_of(&self, bucket: &CreatorBucket) -> CreatorProfile {
        match self.neos.fetch_user(&bucket.creator_id).await {
            Ok(user) => CreatorProfile::from_user(&bucket.creator_id, &user),
            Err(e) => {
                log::warn!("user lookup failed for {}: {}", bucket.creator_id, e);
                CreatorProfile::anonymous(&bucket.creator_id)
            }
        }
    }
}

#[async_trait::async_trait]
impl InventorySource for NewItemNotificationJob {
    async fn discover(&self) -> Result<CrawlReport, AppError> {
        let roots = self.roots.active_root_links().await?;
        for root in &roots {
            log::info!("root link: {}", root);
        }

        let crawler = InventoryCrawler::new(Arc::clone(&self.neos), self.config.request_interval)
            .with_policy(self.config.pacing);
        Ok(crawler.crawl(roots).await)
    }
}

impl DigestComposer for NewItemNotificationJob {
    fn compose(&self, store: &ObjectStore, window: &NewItemWindow) -> NewItemDigest {
        digest_new_items(store, window)
    }
}

#[async_trait::async_trait]
impl NotificationDelivery for NewItemNotificationJob {
    async fn notify(&self, buckets: &[CreatorBucket], window: &NewItemWindow) -> DeliveryReport {
        let channel_id = &self.config.new_item_channel_id;
        join_all(buckets.iter().map(|bucket| async move {
            let profile = self.profile_of(bucket).await;
            let digest = render_digest(bucket, &profile, window);
            self.delivery.deliver_digest(channel_id, &digest).await;
        }))
        .await;
        self.delivery.report()
    }
}
