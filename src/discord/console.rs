// src/discord/console.rs
//! Transport that prints payloads instead of posting them (`--dry-run`).

use super::{MessagePayload, MessageTransport, PostedMessage};
use crate::error::AppError;
use crate::types::{ChannelId, GuildId, MessageId};
use std::sync::atomic::{AtomicU64, Ordering};

/// Prints each payload as pretty JSON to stdout and hands out sequential
/// ids, so the rest of the run behaves as if Discord had accepted it.
#[derive(Debug, Default)]
pub struct ConsoleTransport {
    next_id: AtomicU64,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&self) -> String {
        format!("dry-run-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait::async_trait]
impl MessageTransport for ConsoleTransport {
    async fn resolve_channel(
        &self,
        guild_id: &GuildId,
        channel_id: &ChannelId,
    ) -> Result<(), AppError> {
        log::info!("dry run: assuming channel {} is in guild {}", channel_id, guild_id);
        Ok(())
    }

    async fn send_message(
        &self,
        channel_id: &ChannelId,
        payload: &MessagePayload,
    ) -> Result<PostedMessage, AppError> {
        let body = serde_json::to_string_pretty(payload)?;
        println!("--- channel {} ---\n{}", channel_id, body);
        Ok(PostedMessage {
            id: MessageId::parse(&self.allocate())?,
            channel_id: channel_id.clone(),
        })
    }

    async fn start_thread(
        &self,
        message: &PostedMessage,
        name: &str,
    ) -> Result<ChannelId, AppError> {
        let thread_id = ChannelId::parse(&self.allocate())?;
        println!(
            "--- thread {} '{}' on message {} ---",
            thread_id, name, message.id
        );
        Ok(thread_id)
    }
}
