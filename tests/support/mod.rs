// tests/support/mod.rs
//! In-memory stand-ins for Neos, the root-link table, and Discord.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use neos2discord::api::parser::parse_record_entries;
use neos2discord::api::responses::UserProfile;
use neos2discord::{
    AppError, ChannelId, GuildId, MessagePayload, MessageTransport, NeosRepository, NeosUser,
    OwnerId, PostedMessage, RecordEntry, RecordId, RemoteService, RootLinkEntry, RootLinkSource,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

// ---------------------------------------------------------------------------
// Record fixtures
// ---------------------------------------------------------------------------

pub fn directory(id: &str, owner: &str, name: &str) -> Value {
    json!({
        "id": id,
        "recordType": "directory",
        "ownerId": owner,
        "name": name,
        "path": "Inventory",
        "assetUri": null,
        "tags": []
    })
}

pub fn link(id: &str, name: &str, asset_uri: &str) -> Value {
    json!({
        "id": id,
        "recordType": "link",
        "ownerId": "U-linker",
        "name": name,
        "path": "Inventory",
        "assetUri": asset_uri,
        "tags": []
    })
}

pub fn object(id: &str, name: &str, creator: &str, created: DateTime<Utc>) -> Value {
    json!({
        "id": id,
        "recordType": "object",
        "ownerId": creator,
        "name": name,
        "path": "Inventory\\Shelf",
        "assetUri": format!("neosdb:///{}.7zbson", id),
        "thumbnailUri": format!("neosdb:///thumb-{}.webp", id),
        "creationTime": created.to_rfc3339(),
        "lastModifyingUserId": creator,
        "tags": []
    })
}

// ---------------------------------------------------------------------------
// Neos
// ---------------------------------------------------------------------------

/// Folders keyed by `owner/record`. Unknown folders answer 404.
#[derive(Default)]
pub struct FakeNeos {
    folders: HashMap<String, Vec<Value>>,
    users: HashMap<String, NeosUser>,
    latency: Duration,
    calls: Mutex<Vec<String>>,
}

impl FakeNeos {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folder(mut self, key: &str, children: Vec<Value>) -> Self {
        self.folders.insert(key.to_string(), children);
        self
    }

    pub fn with_user(mut self, id: &str, username: &str, icon: Option<&str>) -> Self {
        self.users.insert(
            id.to_string(),
            NeosUser {
                username: username.to_string(),
                profile: Some(UserProfile {
                    icon_url: icon.map(str::to_string),
                }),
            },
        );
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Folder keys in the order they were resolved.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NeosRepository for FakeNeos {
    async fn fetch_records(
        &self,
        owner_id: &OwnerId,
        record_id: &RecordId,
    ) -> Result<Vec<RecordEntry>, AppError> {
        let key = format!("{}/{}", owner_id, record_id);
        self.calls.lock().unwrap().push(key.clone());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match self.folders.get(&key) {
            Some(children) => Ok(parse_record_entries(children.clone())),
            None => Err(AppError::RemoteService {
                service: RemoteService::Neos,
                status: reqwest::StatusCode::NOT_FOUND,
                message: format!("no folder {}", key),
            }),
        }
    }

    async fn fetch_user(&self, owner_id: &OwnerId) -> Result<NeosUser, AppError> {
        self.users
            .get(owner_id.as_str())
            .cloned()
            .ok_or_else(|| AppError::RemoteService {
                service: RemoteService::Neos,
                status: reqwest::StatusCode::NOT_FOUND,
                message: format!("no user {}", owner_id),
            })
    }
}

// ---------------------------------------------------------------------------
// Root links
// ---------------------------------------------------------------------------

pub struct FakeRoots {
    entries: Option<Vec<RootLinkEntry>>,
}

impl FakeRoots {
    pub fn new(entries: Vec<RootLinkEntry>) -> Self {
        Self {
            entries: Some(entries),
        }
    }

    pub fn failing() -> Self {
        Self { entries: None }
    }
}

pub fn root(name: &str, owner: &str, record: &str, active: bool) -> RootLinkEntry {
    RootLinkEntry {
        name: name.to_string(),
        owner_id: owner.to_string(),
        record_id: record.to_string(),
        active,
    }
}

#[async_trait::async_trait]
impl RootLinkSource for FakeRoots {
    async fn fetch_entries(&self) -> Result<Vec<RootLinkEntry>, AppError> {
        self.entries.clone().ok_or_else(|| AppError::RemoteService {
            service: RemoteService::Notion,
            status: reqwest::StatusCode::UNAUTHORIZED,
            message: "API token is invalid.".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Discord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub channel_id: String,
    pub payload: MessagePayload,
    pub at: Instant,
}

impl SentMessage {
    pub fn content(&self) -> &str {
        self.payload.content.as_deref().unwrap_or_default()
    }
}

/// Accepts everything unless a failure is scripted for the next send.
#[derive(Default)]
pub struct FakeTransport {
    missing_channels: HashSet<String>,
    scripted_failures: Mutex<VecDeque<AppError>>,
    failing_threads: bool,
    sent: Mutex<Vec<SentMessage>>,
    threads: Mutex<Vec<(String, String)>>,
    attempts: AtomicU64,
    next_id: AtomicU64,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_channel(mut self, channel_id: &str) -> Self {
        self.missing_channels.insert(channel_id.to_string());
        self
    }

    pub fn failing_threads(mut self) -> Self {
        self.failing_threads = true;
        self
    }

    /// The next send attempts fail with these errors, in order.
    pub fn script_failures(&self, errors: Vec<AppError>) {
        self.scripted_failures.lock().unwrap().extend(errors);
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, channel_id: &str) -> Vec<SentMessage> {
        self.sent()
            .into_iter()
            .filter(|m| m.channel_id == channel_id)
            .collect()
    }

    /// `(anchor message id, thread name)` per opened thread.
    pub fn threads(&self) -> Vec<(String, String)> {
        self.threads.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }

    fn allocate(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait::async_trait]
impl MessageTransport for FakeTransport {
    async fn resolve_channel(
        &self,
        guild_id: &GuildId,
        channel_id: &ChannelId,
    ) -> Result<(), AppError> {
        if self.missing_channels.contains(channel_id.as_str()) {
            return Err(AppError::ChannelNotFound {
                guild_id: guild_id.to_string(),
                channel_id: channel_id.to_string(),
            });
        }
        Ok(())
    }

    async fn send_message(
        &self,
        channel_id: &ChannelId,
        payload: &MessagePayload,
    ) -> Result<PostedMessage, AppError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.scripted_failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        self.sent.lock().unwrap().push(SentMessage {
            channel_id: channel_id.to_string(),
            payload: payload.clone(),
            at: Instant::now(),
        });
        Ok(PostedMessage {
            id: neos2discord::MessageId::parse(&format!("m{}", self.allocate()))?,
            channel_id: channel_id.clone(),
        })
    }

    async fn start_thread(
        &self,
        message: &PostedMessage,
        name: &str,
    ) -> Result<ChannelId, AppError> {
        if self.failing_threads {
            return Err(AppError::RemoteService {
                service: RemoteService::Discord,
                status: reqwest::StatusCode::FORBIDDEN,
                message: "Missing Permissions".to_string(),
            });
        }
        self.threads
            .lock()
            .unwrap()
            .push((message.id.to_string(), name.to_string()));
        Ok(ChannelId::parse(&format!("t{}", self.allocate()))?)
    }
}

pub fn rate_limited(millis: u64) -> AppError {
    AppError::RateLimited {
        retry_after: Duration::from_millis(millis),
    }
}

pub fn forbidden() -> AppError {
    AppError::RemoteService {
        service: RemoteService::Discord,
        status: reqwest::StatusCode::FORBIDDEN,
        message: "Missing Access".to_string(),
    }
}
