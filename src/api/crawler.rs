// src/api/crawler.rs
//! Breadth-first crawl of the inventory graph from a set of root links.
//!
//! The crawl is one sequential loop over a [`Frontier`]: it owns the queue,
//! the registry and the object store outright, and paces its calls against
//! the Neos API.

use super::classifier::classify;
use super::frontier::{DedupRegistry, Frontier};
use super::NeosRepository;
use crate::error::AppError;
use crate::model::{InventoryLink, ObjectStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Which resolutions are followed by the pacing sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacingPolicy {
    /// Only successful resolutions are paced; failures go straight on.
    AfterSuccess,
    /// Every resolution call is paced.
    #[default]
    AfterEveryCall,
}

impl PacingPolicy {
    fn applies(self, succeeded: bool) -> bool {
        match self {
            PacingPolicy::AfterSuccess => succeeded,
            PacingPolicy::AfterEveryCall => true,
        }
    }
}

/// A link that failed to resolve, or an entry under it that failed to
/// classify.
#[derive(Debug)]
pub struct LinkFailure {
    pub link: InventoryLink,
    pub error: AppError,
}

/// Everything one crawl produced.
#[derive(Debug)]
pub struct CrawlReport {
    pub store: ObjectStore,
    pub registry: DedupRegistry,
    /// Links whose listing came back.
    pub visited: usize,
    /// Resolution calls issued, successful or not.
    pub calls: usize,
    pub errors: Vec<LinkFailure>,
}

impl CrawlReport {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Drives resolution of every link reachable from the roots.
pub struct InventoryCrawler {
    repository: Arc<dyn NeosRepository>,
    pace: Duration,
    policy: PacingPolicy,
}

impl InventoryCrawler {
    pub fn new(repository: Arc<dyn NeosRepository>, pace: Duration) -> Self {
        Self {
            repository,
            pace,
            policy: PacingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PacingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Crawl until the frontier is empty. Failures of single links are
    /// recorded in the report and never end the crawl.
    pub async fn crawl(&self, roots: impl IntoIterator<Item = InventoryLink>) -> CrawlReport {
        let mut frontier = Frontier::seeded(roots);
        let mut store = ObjectStore::new();
        let mut errors = Vec::new();
        let mut visited = 0usize;
        let mut calls = 0usize;

        log::info!("Crawling from {} root links", frontier.pending());

        while let Some(link) = frontier.next() {
            let started = Instant::now();
            calls += 1;
            let outcome = self
                .repository
                .fetch_records(&link.owner_id, &link.record_id)
                .await;
            let succeeded = outcome.is_ok();

            match outcome {
                Ok(entries) => {
                    visited += 1;
                    log::info!(
                        "link resolved. name: {} recordUri: {}",
                        link.name,
                        link.record_uri()
                    );

                    let origin = Arc::new(link);
                    let classification = classify(entries, &origin);
                    let discovered = classification.links.len();
                    let queued = classification
                        .links
                        .into_iter()
                        .filter(|child| frontier.offer(child.clone()))
                        .count();
                    log::debug!(
                        "{}: {} objects, {} links ({} new), {} pending",
                        origin.key(),
                        classification.objects.len(),
                        discovered,
                        queued,
                        frontier.pending()
                    );
                    store.extend(classification.objects);

                    for error in classification.errors {
                        log::error!(
                            "link error. name: {} recordUri: {} error: {}",
                            origin.name,
                            origin.record_uri(),
                            error
                        );
                        errors.push(LinkFailure {
                            link: (*origin).clone(),
                            error,
                        });
                    }
                }
                Err(error) => {
                    log::error!(
                        "link error. name: {} recordUri: {} error: {}",
                        link.name,
                        link.record_uri(),
                        error
                    );
                    errors.push(LinkFailure { link, error });
                }
            }

            if self.policy.applies(succeeded) {
                let remaining = self.pace.saturating_sub(started.elapsed());
                if !remaining.is_zero() {
                    tokio::time::sleep(remaining).await;
                }
            }
        }

        log::info!(
            "Crawl finished: {} links resolved in {} calls, {} objects, {} errors",
            visited,
            calls,
            store.len(),
            errors.len()
        );

        CrawlReport {
            store,
            registry: frontier.into_registry(),
            visited,
            calls,
            errors,
        }
    }
}
