// src/digest/grouping.rs
//! Selecting new items and partitioning them per creator.

use super::NewItemWindow;
use crate::model::{CreatorBucket, InventoryObject, ObjectStore};
use crate::types::OwnerId;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Objects created inside `window`, in store order.
pub fn select_new_items(store: &ObjectStore, window: &NewItemWindow) -> Vec<InventoryObject> {
    store
        .iter()
        .filter(|object| window.contains(&object.creation_time))
        .cloned()
        .collect()
}

/// Partition by last modifier.
///
/// Buckets come out in order of each creator's first item. Within a bucket
/// the first item seen with a given name wins, and the survivors are sorted
/// by creation time (ties keep their input order).
pub fn group_by_creator(items: impl IntoIterator<Item = InventoryObject>) -> Vec<CreatorBucket> {
    let mut partitions: IndexMap<OwnerId, (HashSet<String>, Vec<InventoryObject>)> =
        IndexMap::new();

    for item in items {
        let (seen_names, bucket) = partitions
            .entry(item.last_modifying_user_id.clone())
            .or_default();
        if seen_names.insert(item.name.clone()) {
            bucket.push(item);
        }
    }

    partitions
        .into_iter()
        .map(|(creator_id, (_, mut items))| {
            items.sort_by_key(|item| item.creation_time);
            CreatorBucket { creator_id, items }
        })
        .collect()
}
