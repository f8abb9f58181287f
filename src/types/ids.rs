use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Strong typing for IDs with phantom types
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuildMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatabaseMarker;

/// Neos user (`U-...`) or group (`G-...`) that owns records.
pub type OwnerId = Id<OwnerMarker>;
/// Neos record id (`R-...`). Inventory objects are identified by their record id too.
pub type RecordId = Id<RecordMarker>;
/// Discord snowflakes.
pub type ChannelId = Id<ChannelMarker>;
pub type MessageId = Id<MessageMarker>;
pub type GuildId = Id<GuildMarker>;
/// Notion database holding the root links.
pub type DatabaseId = Id<DatabaseMarker>;

/// Ids travel inside URL paths and `neosrec:///owner/record` URIs, so they
/// must be non-empty and free of separators.
static ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^/\\\s?#]+$").expect("Failed to compile id regex - this is a bug in the code")
});

impl<T> Id<T> {
    /// Parse and validate a raw id string.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidId("id cannot be empty".to_string()));
        }
        if !ID_REGEX.is_match(trimmed) {
            return Err(ValidationError::InvalidId(format!(
                "id contains a separator or whitespace: {}",
                trimmed
            )));
        }
        Ok(Self::from_normalized(trimmed.to_string()))
    }

    /// Create an ID from an already trusted string (internal use)
    pub(crate) fn from_normalized(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_normalized(value))
    }
}

/// Which Neos API namespace an owner lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    User,
    Group,
}

impl OwnerKind {
    /// Path segment used by the Neos API for this owner kind.
    pub fn namespace(self) -> &'static str {
        match self {
            OwnerKind::User => "users",
            OwnerKind::Group => "groups",
        }
    }
}

impl Id<OwnerMarker> {
    /// Owners prefixed with `U-` are users; everything else is routed as a group.
    pub fn kind(&self) -> OwnerKind {
        if self.value.starts_with("U-") {
            OwnerKind::User
        } else {
            OwnerKind::Group
        }
    }
}
