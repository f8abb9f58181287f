// src/constants.rs
//! Domain constants that define the operational boundaries of the job.
//!
//! Each constant is named for the domain concept it constrains. Reading them
//! tells you how the job behaves: how hard it leans on the remote services,
//! how it shapes Discord messages, and where it sends people to look.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Crawl defaults
// ---------------------------------------------------------------------------

/// How many days back from the start of today count as "new".
pub const DEFAULT_CHECK_INTERVAL_DAYS: u32 = 7;

/// Minimum spacing between two record resolutions against the Neos API.
///
/// Applies to failed resolutions too unless `--pace-failures false`.
pub const DEFAULT_REQUEST_INTERVAL_SECS: u64 = 3;

// ---------------------------------------------------------------------------
// Discord message shape
// ---------------------------------------------------------------------------

/// Discord accepts at most ten embeds per message.
pub const EMBEDS_PER_MESSAGE: usize = 10;

/// Items previewed inline in a creator's summary message.
pub const SUMMARY_PREVIEW_ITEMS: usize = 3;

/// Slack added on top of the `retry_after` Discord sends with a 429.
pub const BACKPRESSURE_GRACE: Duration = Duration::from_millis(500);

/// Discord caps thread names at 100 characters.
pub const THREAD_NAME_MAX_CHARS: usize = 100;

/// Limit for embed titles and author names.
pub const EMBED_TEXT_MAX_CHARS: usize = 256;

pub const EMBED_FIELD_VALUE_MAX_CHARS: usize = 1024;

/// Minutes of inactivity before Discord archives a detail thread (one day).
pub const THREAD_AUTO_ARCHIVE_MINUTES: u32 = 1440;

// ---------------------------------------------------------------------------
// Remote endpoints
// ---------------------------------------------------------------------------

pub const NEOS_API_BASE_URL: &str = "https://api.neos.com/api";

pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

pub const NOTION_VERSION: &str = "2022-06-28";

/// How many rows the Notion API returns per page of a database query (API maximum).
pub const NOTION_API_PAGE_SIZE: usize = 100;

pub const DISCORD_API_BASE_URL: &str = "https://discord.com/api/v10";

/// Public blob storage that serves Neos assets over HTTPS.
pub const NEOS_ASSET_BASE_URL: &str = "https://cloudxstorage.blob.core.windows.net/assets";

/// Web viewer for a Neos inventory folder.
pub const INVENTORY_VIEWER_BASE_URL: &str = "https://util.neos.love/inventory/v1/link";
