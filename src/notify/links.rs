// src/notify/links.rs
//! Browser URLs for Neos assets and inventory folders.

use crate::constants::NEOS_ASSET_BASE_URL;
use crate::model::InventoryLink;

/// `neosdb:///<hash>.<ext>` → `<asset host>/<hash>`.
///
/// `None` when the URI has no usable asset id.
pub fn asset_web_url(asset_uri: &str) -> Option<String> {
    let last_segment = asset_uri.rsplit('/').next()?;
    let asset_id = last_segment.split('.').next()?.trim();
    if asset_id.is_empty() {
        return None;
    }
    Some(format!("{}/{}", NEOS_ASSET_BASE_URL, asset_id))
}

/// Markdown link to an inventory folder.
pub fn inventory_markdown(label: &str, link: &InventoryLink) -> String {
    format!("[{}]({})", label, link.viewer_url())
}
