// tests/unit/root_links.rs
//! Root-link rows and which of them seed a crawl.

use crate::support::{root, FakeRoots};
use neos2discord::notion::parse_root_link_row;
use neos2discord::RootLinkSource;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn only_active_complete_rows_seed_the_crawl() {
    let roots = FakeRoots::new(vec![
        root("Main", "U-a", "R-1", true),
        root("Paused", "U-b", "R-2", false),
        root("No owner", "", "R-3", true),
        root("No record", "G-c", "", true),
        root("Group", "G-c", "R-4", true),
    ]);

    let links = roots.active_root_links().await.unwrap();
    let keys: Vec<_> = links.iter().map(|l| l.key().to_string()).collect();
    assert_eq!(keys, vec!["U-a/R-1", "G-c/R-4"]);
    assert_eq!(links[1].name, "Group");
}

#[tokio::test]
async fn source_failures_propagate() {
    assert!(FakeRoots::failing().active_root_links().await.is_err());
}

#[test]
fn unchecked_rows_are_inactive() {
    let page = json!({
        "object": "page",
        "properties": {
            "Name": { "title": [{ "plain_text": "Storage" }] },
            "OwnerId": { "rich_text": [{ "plain_text": "U-a" }] },
            "RecordId": { "rich_text": [{ "plain_text": "R-9" }] },
            "Active": { "checkbox": false }
        }
    });

    let entry = parse_root_link_row(&page);
    assert_eq!(entry.owner_id, "U-a");
    assert!(!entry.active);
    assert!(entry.to_link().is_none());
}
