//! Inventory domain model: pointers, raw records, discovered objects and
//! per-creator buckets.

mod bucket;
mod link;
mod object;
mod record;

pub use bucket::CreatorBucket;
pub use link::{InventoryLink, LinkKey};
pub use object::{InventoryObject, ObjectStore};
pub use record::{RawRecord, RecordFields};
