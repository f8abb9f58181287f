// src/api/classifier.rs
//! Splits the children of a resolved folder into saved items and further
//! folders to visit.

use super::RecordEntry;
use crate::error::AppError;
use crate::model::{InventoryLink, InventoryObject, RawRecord, RecordFields};
use crate::types::{OwnerId, RecordId, ValidationError};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::sync::Arc;

/// Outcome of classifying one folder listing.
#[derive(Debug, Default)]
pub struct Classification {
    /// Folders (sub-directories and followed links) to visit next.
    pub links: Vec<InventoryLink>,
    pub objects: Vec<InventoryObject>,
    /// Entries that could not be interpreted. Their siblings are unaffected.
    pub errors: Vec<AppError>,
}

/// Classify every entry of a listing produced by resolving `origin`.
pub fn classify(entries: Vec<RecordEntry>, origin: &Arc<InventoryLink>) -> Classification {
    let mut classification = Classification::default();

    for entry in entries {
        let outcome = entry.and_then(|record| classify_record(record, origin));
        match outcome {
            Ok(Classified::Link(link)) => classification.links.push(link),
            Ok(Classified::Object(object)) => classification.objects.push(*object),
            Err(e) => classification.errors.push(e),
        }
    }

    classification
}

enum Classified {
    Link(InventoryLink),
    Object(Box<InventoryObject>),
}

fn classify_record(record: RawRecord, origin: &Arc<InventoryLink>) -> Result<Classified, AppError> {
    match record {
        RawRecord::Object(fields) => {
            Ok(Classified::Object(Box::new(resolve_object(fields, origin)?)))
        }
        RawRecord::Directory(fields) => {
            let owner_id = OwnerId::parse(fields.owner_id())?;
            let record_id = RecordId::parse(&fields.id)?;
            Ok(Classified::Link(InventoryLink::new(
                fields.name(),
                owner_id,
                record_id,
            )))
        }
        RawRecord::Link(fields) => {
            let (owner_id, record_id) =
                decode_link_target(fields.asset_uri()).ok_or_else(|| AppError::MalformedLink {
                    name: fields.name().to_string(),
                    asset_uri: fields.asset_uri().to_string(),
                })?;
            Ok(Classified::Link(InventoryLink::new(
                fields.name(),
                owner_id,
                record_id,
            )))
        }
    }
}

/// Target of a link record: `neosrec:///<owner>/<record>` splits on `/` into
/// `["neosrec:", "", "", owner, record]`.
pub fn decode_link_target(asset_uri: &str) -> Option<(OwnerId, RecordId)> {
    let mut segments = asset_uri.split('/').skip(3);
    let owner = OwnerId::parse(segments.next()?).ok()?;
    let record = RecordId::parse(segments.next()?).ok()?;
    Some((owner, record))
}

fn resolve_object(fields: RecordFields, origin: &Arc<InventoryLink>) -> Result<InventoryObject, AppError> {
    let id = RecordId::parse(&fields.id)?;
    let creation_time = parse_creation_time(fields.creation_time.as_deref())?;

    // Items listed under a folder belong to the folder's owner unless the
    // record says otherwise.
    let owner_id = match fields.owner_id.as_deref() {
        Some(owner) if !owner.trim().is_empty() => OwnerId::parse(owner)?,
        _ => origin.owner_id.clone(),
    };
    let last_modifying_user_id = match fields.last_modifying_user_id.as_deref() {
        Some(user) if !user.trim().is_empty() => OwnerId::parse(user)?,
        _ => owner_id.clone(),
    };

    Ok(InventoryObject {
        id,
        name: fields.name().to_string(),
        path: fields.path().to_string(),
        owner_id,
        creation_time,
        asset_uri: fields.asset_uri().to_string(),
        thumbnail_uri: fields.thumbnail_uri.filter(|uri| !uri.is_empty()),
        last_modifying_user_id,
        origin: Arc::clone(origin),
    })
}

/// Neos timestamps are RFC 3339, occasionally without an offset (then UTC).
pub fn parse_creation_time(value: Option<&str>) -> Result<DateTime<Utc>, ValidationError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::EmptyField("creationTime"))?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| ValidationError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
