//! Raw inventory records as returned by the Neos records endpoint.

use serde::Deserialize;

/// Fields shared by every record kind.
///
/// Neos omits or nulls most fields depending on the record kind, so only
/// `id` is mandatory at this layer; the classifier decides what each kind
/// actually needs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub asset_uri: Option<String>,
    #[serde(default)]
    pub creation_time: Option<String>,
    #[serde(default)]
    pub thumbnail_uri: Option<String>,
    #[serde(default)]
    pub last_modifying_user_id: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl RecordFields {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn owner_id(&self) -> &str {
        self.owner_id.as_deref().unwrap_or_default()
    }

    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or_default()
    }

    pub fn asset_uri(&self) -> &str {
        self.asset_uri.as_deref().unwrap_or_default()
    }
}

/// One child entry of an inventory folder, tagged by `recordType`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "recordType", rename_all = "lowercase")]
pub enum RawRecord {
    /// A saved item: the leaves the job reports on.
    Object(RecordFields),
    /// A shortcut to a folder that may live in another owner's inventory.
    Link(RecordFields),
    /// A sub-folder of the same owner.
    Directory(RecordFields),
}
