// src/lib.rs
//! neos2discord library: watches Neos inventories and announces newly saved
//! items on Discord.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `JobConfig`, `CommandLineInput`
//! - **Domain model**: `InventoryLink`, `RawRecord`, `InventoryObject`, `ObjectStore`
//! - **Neos API**: `NeosRepository`, `NeosHttpClient`, `InventoryCrawler`
//! - **Digest**: `NewItemWindow`, `select_new_items`, `group_by_creator`
//! - **Discord**: `MessageTransport`, `DiscordHttpClient`, `ReadinessGate`
//! - **Notification**: `DeliveryPipeline`, summary and detail rendering
//! - **Root links**: `RootLinkSource`, `NotionHttpClient`
//! - **Job**: `NewItemNotificationJob`

pub mod api;
pub mod config;
pub mod constants;
pub mod digest;
pub mod discord;
pub mod error;
pub mod error_recovery;
pub mod job;
pub mod model;
pub mod notify;
pub mod notion;
pub mod pipeline;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, RemoteService};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, JobConfig};

// --- Domain Model ---
pub use crate::model::{
    CreatorBucket, InventoryLink, InventoryObject, LinkKey, ObjectStore, RawRecord, RecordFields,
};

// --- Domain Types ---
pub use crate::types::{
    ApiToken, ChannelId, DatabaseId, GuildId, JobCode, MessageId, OwnerId, OwnerKind, RecordId,
};

// --- Neos API ---
pub use crate::api::{
    classify, Classification, CrawlReport, DedupRegistry, Frontier, InventoryCrawler,
    LinkFailure, NeosHttpClient, NeosRepository, NeosUser, PacingPolicy, RecordEntry,
};

// --- Digest ---
pub use crate::digest::{
    digest_new_items, group_by_creator, select_new_items, NewItemDigest, NewItemWindow,
};

// --- Discord ---
pub use crate::discord::{
    ConsoleTransport, DiscordHttpClient, Embed, MessagePayload, MessageTransport, PostedMessage,
    ReadinessGate,
};

// --- Notification ---
pub use crate::notify::{
    render_digest, CreatorDigest, CreatorProfile, DeliveryOutcome, DeliveryPipeline,
    DeliveryReport, RunCounts,
};

// --- Root Links ---
pub use crate::notion::{NotionHttpClient, RootLinkEntry, RootLinkSource};

// --- Pipeline Traits ---
pub use crate::pipeline::{DigestComposer, InventorySource, NotificationDelivery};

// --- Job ---
pub use crate::job::{JobSummary, NewItemNotificationJob};
