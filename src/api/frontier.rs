// src/api/frontier.rs
//! Work queue and visit registry for the inventory crawl.

use crate::model::{InventoryLink, LinkKey};
use indexmap::IndexSet;
use std::collections::VecDeque;

/// Every link key ever scheduled during a crawl. Only grows.
#[derive(Debug, Clone, Default)]
pub struct DedupRegistry {
    keys: IndexSet<LinkKey>,
}

impl DedupRegistry {
    /// Record a link; `false` when its key was already present.
    pub fn register(&mut self, link: &InventoryLink) -> bool {
        self.keys.insert(link.key())
    }

    pub fn contains(&self, link: &InventoryLink) -> bool {
        self.keys.contains(&link.key())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in the order they were first scheduled.
    pub fn keys(&self) -> impl Iterator<Item = &LinkKey> {
        self.keys.iter()
    }
}

/// FIFO of links awaiting resolution. Every queued link is registered.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<InventoryLink>,
    registry: DedupRegistry,
}

impl Frontier {
    /// A frontier holding each distinct root once, in the given order.
    pub fn seeded(roots: impl IntoIterator<Item = InventoryLink>) -> Self {
        let mut frontier = Self::default();
        for root in roots {
            frontier.offer(root);
        }
        frontier
    }

    /// Queue a link unless its key has been scheduled before.
    pub fn offer(&mut self, link: InventoryLink) -> bool {
        if self.registry.register(&link) {
            self.queue.push_back(link);
            true
        } else {
            false
        }
    }

    /// Next link in discovery order.
    pub fn next(&mut self) -> Option<InventoryLink> {
        self.queue.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn registry(&self) -> &DedupRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> DedupRegistry {
        self.registry
    }
}
