// src/api/mod.rs
//! Neos API interaction: the ability to list an inventory folder and to
//! crawl everything reachable from a set of folders.
//!
//! HTTP details stay in [`client`]; classification and traversal depend only
//! on the [`NeosRepository`] trait.

pub mod classifier;
pub mod client;
pub mod crawler;
pub mod frontier;
pub mod parser;
pub mod responses;

use crate::error::AppError;
use crate::model::RawRecord;
use crate::types::{OwnerId, RecordId};

/// One child entry of a listing. Entries decode independently, so a listing
/// can hold a mix of usable records and per-entry failures.
pub type RecordEntry = Result<RawRecord, AppError>;

/// The ability to read a Neos inventory.
///
/// Business logic depends on this trait, never on HTTP details.
#[async_trait::async_trait]
pub trait NeosRepository: Send + Sync {
    /// Children of the folder `owner_id/record_id`.
    async fn fetch_records(
        &self,
        owner_id: &OwnerId,
        record_id: &RecordId,
    ) -> Result<Vec<RecordEntry>, AppError>;

    /// Public profile of a user, for rendering.
    async fn fetch_user(&self, owner_id: &OwnerId) -> Result<NeosUser, AppError>;
}

// Re-export the public interface
pub use classifier::{classify, Classification};
pub use client::NeosHttpClient;
pub use crawler::{CrawlReport, InventoryCrawler, LinkFailure, PacingPolicy};
pub use frontier::{DedupRegistry, Frontier};
pub use responses::NeosUser;
