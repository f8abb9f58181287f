// src/pipeline.rs
//! Stage traits of a new-item run: discover, digest, notify.
//!
//! Each trait describes a single capability, enabling testing each stage in isolation.

use crate::api::CrawlReport;
use crate::digest::{NewItemDigest, NewItemWindow};
use crate::error::AppError;
use crate::model::{CreatorBucket, ObjectStore};
use crate::notify::DeliveryReport;

/// Crawls the watched inventory folders.
#[async_trait::async_trait]
pub trait InventorySource {
    async fn discover(&self) -> Result<CrawlReport, AppError>;
}

/// Picks the new items out of a crawl and groups them per creator.
pub trait DigestComposer {
    fn compose(&self, store: &ObjectStore, window: &NewItemWindow) -> NewItemDigest;
}

/// Sends the per-creator digests.
#[async_trait::async_trait]
pub trait NotificationDelivery {
    async fn notify(&self, buckets: &[CreatorBucket], window: &NewItemWindow) -> DeliveryReport;
}
