// src/notify/delivery.rs
//! Shipping rendered messages to Discord.
//!
//! Every send waits on the readiness gate, retries for as long as Discord
//! answers with a rate limit, and is dropped (logged, counted) on any other
//! failure. Nothing here returns an error to the caller.

use super::batcher::CreatorDigest;
use crate::constants::BACKPRESSURE_GRACE;
use crate::discord::{MessagePayload, MessageTransport, PostedMessage, ReadinessGate};
use crate::error_recovery::retry_on_backpressure;
use crate::types::ChannelId;
use futures::future::join_all;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// What became of one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered(PostedMessage),
    Dropped,
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered(_))
    }
}

/// Totals over the lifetime of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub dropped: usize,
}

#[derive(Debug, Default)]
struct DeliveryCounters {
    delivered: AtomicUsize,
    dropped: AtomicUsize,
}

/// Sends payloads through a [`MessageTransport`] with backpressure retry.
pub struct DeliveryPipeline {
    transport: Arc<dyn MessageTransport>,
    gate: Arc<ReadinessGate>,
    grace: Duration,
    counters: DeliveryCounters,
}

impl DeliveryPipeline {
    pub fn new(transport: Arc<dyn MessageTransport>, gate: Arc<ReadinessGate>) -> Self {
        Self {
            transport,
            gate,
            grace: BACKPRESSURE_GRACE,
            counters: DeliveryCounters::default(),
        }
    }

    /// Deliver one payload. Rate limits are waited out; anything else drops it.
    pub async fn deliver(&self, channel_id: &ChannelId, payload: &MessagePayload) -> DeliveryOutcome {
        self.gate.wait_ready().await;

        let result = retry_on_backpressure(
            || self.transport.send_message(channel_id, payload),
            self.grace,
        )
        .await;

        match result {
            Ok(message) => {
                self.counters.delivered.fetch_add(1, Ordering::SeqCst);
                DeliveryOutcome::Delivered(message)
            }
            Err(e) => {
                self.counters.dropped.fetch_add(1, Ordering::SeqCst);
                log::error!("discord send error, message dropped. channel: {} error: {}", channel_id, e);
                DeliveryOutcome::Dropped
            }
        }
    }

    /// Open a thread on `message`, with the same retry policy as sends.
    pub async fn open_thread(&self, message: &PostedMessage, name: &str) -> Option<ChannelId> {
        self.gate.wait_ready().await;

        match retry_on_backpressure(|| self.transport.start_thread(message, name), self.grace).await {
            Ok(thread_id) => Some(thread_id),
            Err(e) => {
                log::error!(
                    "discord thread error. message: {} error: {}",
                    message.id,
                    e
                );
                None
            }
        }
    }

    /// Summary first; once it is accepted, a thread on it receives the
    /// detail pages concurrently.
    pub async fn deliver_digest(&self, channel_id: &ChannelId, digest: &CreatorDigest) {
        let summary = match self.deliver(channel_id, &digest.summary).await {
            DeliveryOutcome::Delivered(message) => message,
            DeliveryOutcome::Dropped => {
                self.drop_pages(digest, "summary was not delivered");
                return;
            }
        };

        let Some(thread_id) = self.open_thread(&summary, &digest.thread_name).await else {
            self.drop_pages(digest, "thread could not be opened");
            return;
        };

        let outcomes = join_all(
            digest
                .detail_pages
                .iter()
                .map(|page| self.deliver(&thread_id, page)),
        )
        .await;

        let delivered = outcomes.iter().filter(|o| o.is_delivered()).count();
        log::info!(
            "creator {}: {} of {} detail messages delivered",
            digest.creator_id,
            delivered,
            outcomes.len()
        );
    }

    fn drop_pages(&self, digest: &CreatorDigest, reason: &str) {
        let pages = digest.detail_pages.len();
        self.counters.dropped.fetch_add(pages, Ordering::SeqCst);
        log::error!(
            "creator {}: {} detail messages dropped, {}",
            digest.creator_id,
            pages,
            reason
        );
    }

    pub fn report(&self) -> DeliveryReport {
        DeliveryReport {
            delivered: self.counters.delivered.load(Ordering::SeqCst),
            dropped: self.counters.dropped.load(Ordering::SeqCst),
        }
    }
}
