//! Rendering new-item digests and delivering them to Discord.

pub mod batcher;
pub mod delivery;
pub mod links;
pub mod reports;

pub use batcher::{render_digest, CreatorDigest, CreatorProfile};
pub use delivery::{DeliveryOutcome, DeliveryPipeline, DeliveryReport};
pub use reports::RunCounts;
