// tests/integration/job_run.rs
//! A whole run: channels, crawl, digest, notifications, and reports.

use crate::support::{link, object, root, FakeNeos, FakeRoots, FakeTransport};
use chrono::{Local, NaiveDate, TimeZone, Utc};
use neos2discord::{AppError, JobCode, JobConfig, NewItemNotificationJob, NewItemWindow};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

const NEW_ITEM_CHANNEL: &str = "200000000000000002";
const REPORT_CHANNEL: &str = "300000000000000003";

fn config() -> JobConfig {
    JobConfig {
        request_interval: Duration::ZERO,
        ..JobConfig::default()
    }
}

fn job_code() -> JobCode {
    JobCode::from_parts(Local.with_ymd_and_hms(2024, 3, 8, 7, 5, 2).unwrap(), 42)
}

fn window() -> NewItemWindow {
    NewItemWindow::ending_on(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(), 7, &Utc).unwrap()
}

fn inventory() -> FakeNeos {
    let at = |day, hour| Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap();
    FakeNeos::new()
        .with_folder(
            "U-a/R-1",
            vec![
                object("O-1", "Chair", "U-a", at(3, 9)),
                object("O-2", "Old", "U-a", Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
                link("L-1", "Shared", "neosrec:///G-b/R-2"),
            ],
        )
        .with_folder(
            "G-b/R-2",
            vec![
                object("O-3", "Lamp", "U-b", at(5, 18)),
                object("O-4", "Chair", "U-a", at(4, 10)),
            ],
        )
        .with_user("U-a", "alice", Some("neosdb:///face.webp"))
}

fn job(
    neos: Arc<FakeNeos>,
    roots: FakeRoots,
    transport: Arc<FakeTransport>,
) -> NewItemNotificationJob {
    NewItemNotificationJob::new(config(), job_code(), neos, Arc::new(roots), transport)
        .with_window(window())
}

fn active_roots() -> FakeRoots {
    FakeRoots::new(vec![
        root("Main", "U-a", "R-1", true),
        root("Paused", "U-z", "R-9", false),
    ])
}

#[tokio::test]
async fn run_announces_new_items_per_creator() {
    let neos = Arc::new(inventory());
    let transport = Arc::new(FakeTransport::new());

    let summary = job(neos.clone(), active_roots(), transport.clone())
        .run()
        .await
        .unwrap();

    // The inactive root is never resolved.
    assert_eq!(neos.calls(), vec!["U-a/R-1", "G-b/R-2"]);

    assert_eq!(summary.counts.checked_links, 2);
    assert_eq!(summary.counts.checked_objects, 4);
    assert_eq!(summary.counts.new_items, 3);
    assert_eq!(summary.creators, 2);
    assert_eq!(summary.link_errors, 0);
    assert_eq!(summary.resolution_calls, 2);

    let reports = transport.sent_to(REPORT_CHANNEL);
    assert_eq!(reports.len(), 2);
    assert_eq!(
        reports[0].content(),
        "start checking.(2024-03-01T00:00:00+00:00-2024-03-08T00:00:00+00:00). checkInterval=7. jobCode=07050242"
    );
    assert!(reports[1].content().starts_with(
        "finish checking.(2024-03-01T00:00:00+00:00-2024-03-08T00:00:00+00:00). processTime: "
    ));
    assert!(reports[1]
        .content()
        .ends_with("checked link count:2. checked object count:4. new item count:3. jobCode=07050242"));

    let all = transport.sent();
    assert_eq!(all.first().unwrap().content(), reports[0].content());
    assert_eq!(all.last().unwrap().content(), reports[1].content());

    let summaries = transport.sent_to(NEW_ITEM_CHANNEL);
    assert_eq!(summaries.len(), 2);
    let titles: HashSet<_> = summaries
        .iter()
        .filter_map(|m| m.payload.embeds[0].title.clone())
        .collect();
    assert_eq!(titles, HashSet::from(["alice".to_string(), "U-b".to_string()]));

    let thread_names: HashSet<_> = transport.threads().into_iter().map(|(_, n)| n).collect();
    assert_eq!(
        thread_names,
        HashSet::from(["alice 2024 3/1".to_string(), "U-b 2024 3/1".to_string()])
    );

    // Two reports, two summaries, one detail page each.
    assert_eq!(all.len(), 6);
    assert_eq!(summary.delivery.delivered, 6);
    assert_eq!(summary.delivery.dropped, 0);
}

#[tokio::test]
async fn same_name_keeps_the_first_item_seen() {
    let neos = Arc::new(inventory());
    let transport = Arc::new(FakeTransport::new());

    job(neos, active_roots(), transport.clone())
        .run()
        .await
        .unwrap();

    let alice_summary = transport
        .sent_to(NEW_ITEM_CHANNEL)
        .into_iter()
        .find(|m| m.payload.embeds[0].title.as_deref() == Some("alice"))
        .unwrap();
    assert_eq!(
        alice_summary.payload.embeds[0].description.as_deref(),
        Some("1 items saved from 2024 3/1 to 7days.")
    );
    let preview = alice_summary.payload.embeds[1].author.as_ref().unwrap();
    assert_eq!(preview.name, "Chair");
    assert_eq!(
        preview.url.as_deref(),
        Some("https://util.neos.love/inventory/v1/link/U-a/R-1")
    );
}

#[tokio::test]
async fn missing_new_item_channel_stops_before_crawling() {
    let neos = Arc::new(inventory());
    let transport = Arc::new(FakeTransport::new().without_channel(NEW_ITEM_CHANNEL));

    let result = job(neos.clone(), active_roots(), transport.clone())
        .run()
        .await;

    assert!(matches!(result, Err(AppError::ChannelNotFound { .. })));
    assert!(neos.calls().is_empty());

    let reports = transport.sent_to(REPORT_CHANNEL);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].content().starts_with("configuration error:"));
    assert!(reports[0].content().ends_with("jobCode=07050242"));
}

#[tokio::test]
async fn missing_report_channel_sends_nothing() {
    let neos = Arc::new(inventory());
    let transport = Arc::new(FakeTransport::new().without_channel(REPORT_CHANNEL));

    let result = job(neos.clone(), active_roots(), transport.clone())
        .run()
        .await;

    assert!(matches!(
        result,
        Err(AppError::ChannelNotFound { ref channel_id, .. }) if channel_id == REPORT_CHANNEL
    ));
    assert!(neos.calls().is_empty());
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn unexpected_failure_is_reported() {
    let neos = Arc::new(inventory());
    let transport = Arc::new(FakeTransport::new());

    let result = job(neos.clone(), FakeRoots::failing(), transport.clone())
        .run()
        .await;

    assert!(result.is_err());
    assert!(neos.calls().is_empty());

    let reports = transport.sent_to(REPORT_CHANNEL);
    let contents: Vec<_> = reports.iter().map(|m| m.content().to_string()).collect();
    assert_eq!(contents.len(), 2);
    assert!(contents[0].starts_with("start checking."));
    assert_eq!(contents[1], "unknown error. jobCode=07050242");
}

#[tokio::test]
async fn nothing_new_sends_only_reports() {
    let neos = Arc::new(FakeNeos::new().with_folder("U-a/R-1", vec![]));
    let transport = Arc::new(FakeTransport::new());

    let summary = job(neos, active_roots(), transport.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.counts.new_items, 0);
    assert_eq!(summary.creators, 0);
    assert!(transport.sent_to(NEW_ITEM_CHANNEL).is_empty());
    assert_eq!(transport.sent_to(REPORT_CHANNEL).len(), 2);
}
