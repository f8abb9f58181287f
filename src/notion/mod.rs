// src/notion/mod.rs
//! Root links: the inventory folders an operator asked the job to watch,
//! kept as rows of a Notion database.

mod client;
mod parser;
mod simple_pagination;

use crate::error::AppError;
use crate::model::InventoryLink;
use crate::types::{OwnerId, RecordId};

pub use client::NotionHttpClient;
pub use parser::parse_root_link_row;
pub use simple_pagination::{fetch_all_pages_simple, PaginatedResponse, PaginationResult};

/// One row of the root-link table, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RootLinkEntry {
    pub name: String,
    pub owner_id: String,
    pub record_id: String,
    pub active: bool,
}

impl RootLinkEntry {
    /// The link this row seeds, if it is active and names a folder.
    pub fn to_link(&self) -> Option<InventoryLink> {
        if !self.active {
            return None;
        }
        let owner_id = OwnerId::parse(&self.owner_id).ok()?;
        let record_id = RecordId::parse(&self.record_id).ok()?;
        Some(InventoryLink::new(self.name.clone(), owner_id, record_id))
    }
}

/// The ability to list root-link rows.
#[async_trait::async_trait]
pub trait RootLinkSource: Send + Sync {
    async fn fetch_entries(&self) -> Result<Vec<RootLinkEntry>, AppError>;

    /// Links of the rows that are active and complete.
    async fn active_root_links(&self) -> Result<Vec<InventoryLink>, AppError> {
        let entries = self.fetch_entries().await?;
        let total = entries.len();
        let links: Vec<InventoryLink> = entries
            .iter()
            .filter_map(|entry| {
                let link = entry.to_link();
                if link.is_none() {
                    log::debug!("Skipping root row '{}'", entry.name);
                }
                link
            })
            .collect();
        log::info!("{} of {} root rows are active", links.len(), total);
        Ok(links)
    }
}
