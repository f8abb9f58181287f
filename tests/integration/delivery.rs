// tests/integration/delivery.rs
//! Delivery pipeline behaviour under rate limits and failures.

use crate::support::{forbidden, rate_limited, FakeTransport};
use chrono::{NaiveDate, TimeZone, Utc};
use neos2discord::{
    render_digest, ChannelId, CreatorBucket, CreatorProfile, DeliveryOutcome, DeliveryPipeline,
    InventoryLink, InventoryObject, MessagePayload, NewItemWindow, OwnerId, ReadinessGate,
    RecordId,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn channel() -> ChannelId {
    ChannelId::parse("200000000000000002").unwrap()
}

fn pipeline(transport: &Arc<FakeTransport>) -> DeliveryPipeline {
    DeliveryPipeline::new(transport.clone(), Arc::new(ReadinessGate::opened()))
}

fn bucket(size: usize) -> CreatorBucket {
    let origin = Arc::new(InventoryLink::new(
        "Shelf",
        OwnerId::parse("G-1").unwrap(),
        RecordId::parse("R-1").unwrap(),
    ));
    let items = (0..size)
        .map(|i| InventoryObject {
            id: RecordId::parse(&format!("O-{}", i)).unwrap(),
            name: format!("Item {}", i),
            path: "Inventory\\Shelf".to_string(),
            owner_id: OwnerId::parse("G-1").unwrap(),
            creation_time: Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap(),
            asset_uri: format!("neosdb:///asset{}.7zbson", i),
            thumbnail_uri: None,
            last_modifying_user_id: OwnerId::parse("U-a").unwrap(),
            origin: Arc::clone(&origin),
        })
        .collect();
    CreatorBucket {
        creator_id: OwnerId::parse("U-a").unwrap(),
        items,
    }
}

fn digest(size: usize) -> neos2discord::CreatorDigest {
    let window =
        NewItemWindow::ending_on(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(), 7, &Utc).unwrap();
    let creator = OwnerId::parse("U-a").unwrap();
    render_digest(&bucket(size), &CreatorProfile::anonymous(&creator), &window)
}

#[tokio::test(start_paused = true)]
async fn rate_limited_send_waits_and_retries() {
    let transport = Arc::new(FakeTransport::new());
    transport.script_failures(vec![rate_limited(1200)]);
    let pipeline = pipeline(&transport);

    let started = Instant::now();
    let outcome = pipeline
        .deliver(&channel(), &MessagePayload::text("hello"))
        .await;

    assert!(outcome.is_delivered());
    assert!(started.elapsed() >= Duration::from_millis(1700));
    assert_eq!(transport.attempts(), 2);
    assert_eq!(pipeline.report().delivered, 1);
    assert_eq!(pipeline.report().dropped, 0);
}

#[tokio::test(start_paused = true)]
async fn repeated_rate_limits_are_all_waited_out() {
    let transport = Arc::new(FakeTransport::new());
    transport.script_failures(vec![rate_limited(100), rate_limited(100), rate_limited(100)]);
    let pipeline = pipeline(&transport);

    let started = Instant::now();
    let outcome = pipeline
        .deliver(&channel(), &MessagePayload::text("hello"))
        .await;

    assert!(outcome.is_delivered());
    assert_eq!(transport.attempts(), 4);
    assert!(started.elapsed() >= Duration::from_millis(3 * 600));
}

#[tokio::test]
async fn other_failures_are_attempted_once_and_dropped() {
    let transport = Arc::new(FakeTransport::new());
    transport.script_failures(vec![forbidden()]);
    let pipeline = pipeline(&transport);

    let outcome = pipeline
        .deliver(&channel(), &MessagePayload::text("hello"))
        .await;

    assert_eq!(outcome, DeliveryOutcome::Dropped);
    assert_eq!(transport.attempts(), 1);
    assert!(transport.sent().is_empty());
    assert_eq!(pipeline.report().dropped, 1);
}

#[tokio::test(start_paused = true)]
async fn sends_wait_for_the_gate() {
    let transport = Arc::new(FakeTransport::new());
    let gate = Arc::new(ReadinessGate::new());
    let pipeline = Arc::new(DeliveryPipeline::new(transport.clone(), Arc::clone(&gate)));

    let pending = {
        let pipeline = Arc::clone(&pipeline);
        tokio::spawn(async move {
            pipeline
                .deliver(&channel(), &MessagePayload::text("queued"))
                .await
        })
    };

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(transport.attempts(), 0);

    gate.open();
    let outcome = pending.await.unwrap();
    assert!(outcome.is_delivered());
    assert_eq!(transport.attempts(), 1);
}

#[tokio::test]
async fn summary_precedes_thread_pages() {
    let transport = Arc::new(FakeTransport::new());
    let pipeline = pipeline(&transport);

    pipeline.deliver_digest(&channel(), &digest(23)).await;

    let sent = transport.sent();
    assert_eq!(sent.len(), 4);
    assert_eq!(sent[0].channel_id, "200000000000000002");
    assert_eq!(sent[0].payload.embeds.len(), 5);

    let threads = transport.threads();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].1, "U-a 2024 3/1");

    let page_channels: Vec<_> = sent[1..].iter().map(|m| m.channel_id.clone()).collect();
    assert!(page_channels.iter().all(|c| c != "200000000000000002"));
    assert!(page_channels.windows(2).all(|w| w[0] == w[1]));

    let mut sizes: Vec<_> = sent[1..].iter().map(|m| m.payload.embeds.len()).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![3, 10, 10]);
    assert_eq!(pipeline.report().delivered, 4);
}

#[tokio::test]
async fn dropped_summary_drops_its_pages() {
    let transport = Arc::new(FakeTransport::new());
    transport.script_failures(vec![forbidden()]);
    let pipeline = pipeline(&transport);

    pipeline.deliver_digest(&channel(), &digest(12)).await;

    assert!(transport.sent().is_empty());
    assert!(transport.threads().is_empty());
    assert_eq!(transport.attempts(), 1);
    // summary plus two pages
    assert_eq!(pipeline.report().dropped, 3);
}

#[tokio::test]
async fn failed_thread_keeps_the_summary_only() {
    let transport = Arc::new(FakeTransport::new().failing_threads());
    let pipeline = pipeline(&transport);

    pipeline.deliver_digest(&channel(), &digest(4)).await;

    assert_eq!(transport.sent().len(), 1);
    assert_eq!(pipeline.report().delivered, 1);
    assert_eq!(pipeline.report().dropped, 1);
}
