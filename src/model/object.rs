//! Saved items discovered during a crawl, and the store that collects them.

use super::InventoryLink;
use crate::types::{OwnerId, RecordId};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::Arc;

/// A saved item (an `object` record) found while resolving a folder.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryObject {
    pub id: RecordId,
    pub name: String,
    pub path: String,
    pub owner_id: OwnerId,
    pub creation_time: DateTime<Utc>,
    pub asset_uri: String,
    pub thumbnail_uri: Option<String>,
    /// The creator the item is reported under.
    pub last_modifying_user_id: OwnerId,
    /// The folder link whose resolution produced this item. Rendering only.
    pub origin: Arc<InventoryLink>,
}

/// Every object discovered in one run, keyed by record id.
///
/// Iteration follows first discovery. Re-inserting an id replaces the value
/// but keeps the slot, so a later resolution of the same object wins without
/// reordering the store.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    objects: IndexMap<RecordId, InventoryObject>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns the replaced object, if any.
    pub fn insert(&mut self, object: InventoryObject) -> Option<InventoryObject> {
        self.objects.insert(object.id.clone(), object)
    }

    pub fn extend(&mut self, objects: impl IntoIterator<Item = InventoryObject>) {
        for object in objects {
            self.insert(object);
        }
    }

    pub fn get(&self, id: &RecordId) -> Option<&InventoryObject> {
        self.objects.get(id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryObject> {
        self.objects.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.objects.keys()
    }
}
