use super::InventoryObject;
use crate::types::OwnerId;

/// New items of one creator, unique by name and ordered by creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatorBucket {
    pub creator_id: OwnerId,
    pub items: Vec<InventoryObject>,
}

impl CreatorBucket {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The first `limit` items.
    pub fn preview(&self, limit: usize) -> &[InventoryObject] {
        &self.items[..self.items.len().min(limit)]
    }

    /// Items not covered by a preview of `limit`.
    pub fn remaining_after(&self, limit: usize) -> usize {
        self.items.len().saturating_sub(limit)
    }

    /// Consecutive slices of at most `size` items, in bucket order.
    pub fn pages(&self, size: usize) -> std::slice::Chunks<'_, InventoryObject> {
        self.items.chunks(size.max(1))
    }
}
