//! Pointers into the remote inventory tree.

use crate::constants::INVENTORY_VIEWER_BASE_URL;
use crate::types::{OwnerId, RecordId};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A pointer to one node (folder) of a Neos inventory.
///
/// Two links with the same owner and record are the same node, whatever
/// their display names say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLink {
    pub name: String,
    pub owner_id: OwnerId,
    pub record_id: RecordId,
}

impl InventoryLink {
    pub fn new(name: impl Into<String>, owner_id: OwnerId, record_id: RecordId) -> Self {
        Self {
            name: name.into(),
            owner_id,
            record_id,
        }
    }

    /// Identity of the node this link points at.
    pub fn key(&self) -> LinkKey {
        LinkKey(format!("{}/{}", self.owner_id, self.record_id))
    }

    /// `neosrec:///owner/record`, the form Neos itself uses.
    pub fn record_uri(&self) -> String {
        format!("neosrec:///{}/{}", self.owner_id, self.record_id)
    }

    /// Browser URL for the folder.
    pub fn viewer_url(&self) -> String {
        format!(
            "{}/{}/{}",
            INVENTORY_VIEWER_BASE_URL, self.owner_id, self.record_id
        )
    }
}

impl fmt::Display for InventoryLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.record_uri())
    }
}

/// `ownerId/recordId` identity key of an [`InventoryLink`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkKey(String);

impl LinkKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LinkKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
