// src/notion/parser.rs
//! Reading root-link rows out of Notion page objects.
//!
//! Only four properties matter, so rows are read as loose JSON: a missing or
//! mistyped property reads as empty rather than failing the whole query.

use super::RootLinkEntry;
use serde_json::Value;

/// Map a database row (a Notion page object) to a [`RootLinkEntry`].
///
/// Reads `Name` (title), `OwnerId` and `RecordId` (rich text), and
/// `Active` (checkbox), taking the first text fragment of each text property.
pub fn parse_root_link_row(page: &Value) -> RootLinkEntry {
    let properties = &page["properties"];
    RootLinkEntry {
        name: first_plain_text(&properties["Name"]["title"]),
        owner_id: first_plain_text(&properties["OwnerId"]["rich_text"]),
        record_id: first_plain_text(&properties["RecordId"]["rich_text"]),
        active: properties["Active"]["checkbox"].as_bool().unwrap_or(false),
    }
}

fn first_plain_text(fragments: &Value) -> String {
    fragments[0]["plain_text"]
        .as_str()
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}
