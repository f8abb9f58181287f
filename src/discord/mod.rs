// src/discord/mod.rs
//! Discord messaging: payload types, the transport seam, and its REST and
//! console implementations.

mod client;
mod console;
pub mod embeds;
mod gate;

use crate::error::AppError;
use crate::types::{ChannelId, GuildId, MessageId};

pub use client::DiscordHttpClient;
pub use console::ConsoleTransport;
pub use embeds::{Embed, EmbedAuthor, EmbedField, EmbedImage, MessagePayload};
pub use gate::ReadinessGate;

/// A message the transport accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
}

/// The ability to post to Discord.
///
/// Threads are channels: follow-ups go out through [`send_message`] with
/// the id returned by [`start_thread`].
///
/// [`send_message`]: MessageTransport::send_message
/// [`start_thread`]: MessageTransport::start_thread
#[async_trait::async_trait]
pub trait MessageTransport: Send + Sync {
    /// Check that `channel_id` exists and belongs to `guild_id`.
    async fn resolve_channel(&self, guild_id: &GuildId, channel_id: &ChannelId)
        -> Result<(), AppError>;

    async fn send_message(
        &self,
        channel_id: &ChannelId,
        payload: &MessagePayload,
    ) -> Result<PostedMessage, AppError>;

    /// Open a thread anchored on `message`; returns the thread's channel id.
    async fn start_thread(&self, message: &PostedMessage, name: &str)
        -> Result<ChannelId, AppError>;
}
