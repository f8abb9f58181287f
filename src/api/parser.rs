// src/api/parser.rs
//! Turning raw HTTP bodies into typed values.
//!
//! Shared by the Neos, Notion, and Discord clients: every client extracts the
//! body with [`extract_response_text`](super::client::extract_response_text)
//! and hands it here.

use super::client::ApiResponse;
use super::RecordEntry;
use crate::error::{AppError, RemoteService};
use crate::model::RawRecord;
use serde_json::Value;

const BODY_PREVIEW_CHARS: usize = 500;

/// Parse a successful body as `T`, or turn a non-success status into
/// [`AppError::RemoteService`].
pub fn parse_api_response<T>(result: ApiResponse<String>, service: RemoteService) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if !result.status.is_success() {
        return Err(AppError::RemoteService {
            service,
            status: result.status,
            message: format!("{} from {}", preview(&result.data), result.url),
        });
    }

    serde_json::from_str(&result.data).map_err(|e| {
        log::error!("Failed to parse {} response from {}: {}", service, result.url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(&result.data)))
    })
}

/// Decode each child entry of a records listing on its own, so one entry of
/// an unknown kind or shape does not spoil its siblings.
pub fn parse_record_entries(values: Vec<Value>) -> Vec<RecordEntry> {
    values.into_iter().map(parse_record_entry).collect()
}

fn parse_record_entry(value: Value) -> RecordEntry {
    let record_type = value
        .get("recordType")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if !matches!(record_type, "object" | "link" | "directory") {
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("<unknown>")
            .to_string();
        return Err(AppError::UnsupportedRecord {
            id,
            record_type: record_type.to_string(),
        });
    }

    serde_json::from_value::<RawRecord>(value).map_err(AppError::from)
}

fn preview(body: &str) -> String {
    if body.chars().count() > BODY_PREVIEW_CHARS {
        let head: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}
