// src/notify/batcher.rs
//! Rendering a creator bucket into a summary message and detail pages.

use super::links::{asset_web_url, inventory_markdown};
use crate::api::NeosUser;
use crate::constants::{EMBEDS_PER_MESSAGE, SUMMARY_PREVIEW_ITEMS};
use crate::digest::NewItemWindow;
use crate::discord::{Embed, EmbedAuthor, MessagePayload};
use crate::model::{CreatorBucket, InventoryObject};
use crate::types::OwnerId;

/// How a creator is shown in their summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatorProfile {
    pub display_name: String,
    pub icon_url: Option<String>,
}

impl CreatorProfile {
    pub fn from_user(creator_id: &OwnerId, user: &NeosUser) -> Self {
        let display_name = if user.username.trim().is_empty() {
            creator_id.to_string()
        } else {
            user.username.clone()
        };
        Self {
            display_name,
            icon_url: user.icon_url().and_then(asset_web_url),
        }
    }

    /// Used when the user lookup fails.
    pub fn anonymous(creator_id: &OwnerId) -> Self {
        Self {
            display_name: creator_id.to_string(),
            icon_url: None,
        }
    }
}

/// All messages for one creator.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatorDigest {
    pub creator_id: OwnerId,
    pub summary: MessagePayload,
    /// Name of the thread opened on the summary.
    pub thread_name: String,
    pub detail_pages: Vec<MessagePayload>,
}

impl CreatorDigest {
    pub fn item_count(&self) -> usize {
        self.detail_pages.iter().map(|page| page.embeds.len()).sum()
    }
}

pub fn render_digest(
    bucket: &CreatorBucket,
    profile: &CreatorProfile,
    window: &NewItemWindow,
) -> CreatorDigest {
    CreatorDigest {
        creator_id: bucket.creator_id.clone(),
        summary: summary_message(bucket, profile, window),
        thread_name: format!("{} {}", profile.display_name, window.start_label()),
        detail_pages: detail_pages(bucket),
    }
}

/// Creator header, up to three previews, and a `more N items` marker.
pub fn summary_message(
    bucket: &CreatorBucket,
    profile: &CreatorProfile,
    window: &NewItemWindow,
) -> MessagePayload {
    let mut header = Embed::new().title(&profile.display_name).description(format!(
        "{} items saved from {} to {}days.",
        bucket.len(),
        window.start_label(),
        window.check_interval_days()
    ));
    if let Some(icon) = &profile.icon_url {
        header = header.thumbnail(icon.clone());
    }

    let mut embeds = vec![header];
    embeds.extend(bucket.preview(SUMMARY_PREVIEW_ITEMS).iter().map(preview_embed));

    let remaining = bucket.remaining_after(SUMMARY_PREVIEW_ITEMS);
    if remaining > 0 {
        embeds.push(Embed::new().title(format!("more {} items", remaining)));
    }

    MessagePayload::embeds(embeds)
}

/// Every item of the bucket, at most ten embeds per message, in bucket order.
pub fn detail_pages(bucket: &CreatorBucket) -> Vec<MessagePayload> {
    bucket
        .pages(EMBEDS_PER_MESSAGE)
        .map(|page| MessagePayload::embeds(page.iter().map(detail_embed).collect()))
        .collect()
}

pub fn preview_embed(item: &InventoryObject) -> Embed {
    let folder_url = item.origin.viewer_url();
    let mut author = EmbedAuthor::named(&item.name).url(folder_url);
    if let Some(icon) = item.thumbnail_uri.as_deref().and_then(asset_web_url) {
        author = author.icon_url(icon);
    }
    Embed::new()
        .author(author)
        .description(inventory_markdown(&item.path, &item.origin))
}

pub fn detail_embed(item: &InventoryObject) -> Embed {
    let mut embed = Embed::new()
        .title(&item.name)
        .author(EmbedAuthor::named(item.last_modifying_user_id.as_str()))
        .timestamp(item.creation_time);
    // Discord rejects an embed field with an empty value.
    if !item.asset_uri.trim().is_empty() {
        embed = embed.field("assetUrl", &item.asset_uri);
    }
    embed = embed.field("inventory", inventory_markdown(&item.origin.name, &item.origin));
    if let Some(thumbnail) = item.thumbnail_uri.as_deref().and_then(asset_web_url) {
        embed = embed.thumbnail(thumbnail);
    }
    embed
}
