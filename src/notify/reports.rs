// src/notify/reports.rs
//! Plain-text run reports for the operator channel.

use crate::digest::NewItemWindow;
use crate::discord::MessagePayload;
use crate::types::JobCode;
use std::time::Duration;

/// Counts reported when a run finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunCounts {
    pub checked_links: usize,
    pub checked_objects: usize,
    pub new_items: usize,
}

pub fn start_report(window: &NewItemWindow, job_code: &JobCode) -> MessagePayload {
    MessagePayload::text(format!(
        "start checking.({}). checkInterval={}. jobCode={}",
        window,
        window.check_interval_days(),
        job_code
    ))
}

pub fn finish_report(
    window: &NewItemWindow,
    elapsed: Duration,
    counts: RunCounts,
    job_code: &JobCode,
) -> MessagePayload {
    MessagePayload::text(format!(
        "finish checking.({}). processTime: {}. checked link count:{}. checked object count:{}. new item count:{}. jobCode={}",
        window,
        elapsed.as_millis(),
        counts.checked_links,
        counts.checked_objects,
        counts.new_items,
        job_code
    ))
}

pub fn unknown_error_report(job_code: &JobCode) -> MessagePayload {
    MessagePayload::text(format!("unknown error. jobCode={}", job_code))
}

pub fn configuration_error_report(reason: &str, job_code: &JobCode) -> MessagePayload {
    MessagePayload::text(format!("configuration error: {}. jobCode={}", reason, job_code))
}
