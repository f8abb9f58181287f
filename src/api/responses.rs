// src/api/responses.rs
//! Wire shapes of the Neos cloud API responses the job reads.

use serde::Deserialize;

/// The part of a single record the listing call needs: where it lives.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordLocation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
}

impl RecordLocation {
    /// Neos lists a folder's children by the folder's own path joined with
    /// its name using a backslash.
    pub fn children_path(&self) -> String {
        format!("{}\\{}", self.path, self.name)
    }
}

/// Public profile of a Neos user.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeosUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub icon_url: Option<String>,
}

impl NeosUser {
    pub fn icon_url(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.icon_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}
