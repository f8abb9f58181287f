//! Turning the crawl's object store into per-creator digests of new items.

mod grouping;
mod window;

pub use grouping::{group_by_creator, select_new_items};
pub use window::NewItemWindow;

use crate::model::{CreatorBucket, ObjectStore};

/// New items of one run, grouped per creator.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItemDigest {
    /// Items inside the window before per-creator name dedup.
    pub new_item_count: usize,
    pub buckets: Vec<CreatorBucket>,
}

pub fn digest_new_items(store: &ObjectStore, window: &NewItemWindow) -> NewItemDigest {
    let new_items = select_new_items(store, window);
    let new_item_count = new_items.len();
    NewItemDigest {
        new_item_count,
        buckets: group_by_creator(new_items),
    }
}
