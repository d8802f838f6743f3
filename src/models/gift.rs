//! Gift model and the request bodies that act on it.

use serde::{Deserialize, Serialize};

/// A registry entry a guest may reserve.
///
/// Once `reserved` flips to true there is no exposed path back: `reserved_by`
/// and `reserved_at` are set together with the flag and never cleared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: String,
    pub name: String,
    pub reserved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_at: Option<String>,
    pub created_at: String,
}

impl Gift {
    /// Case-insensitive name comparison used for the duplicate check.
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }
}

/// Request body for adding a new gift.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGiftRequest {
    pub name: String,
}

/// Request body for reserving a gift.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    pub guest_name: String,
}

/// Request body for clearing the whole list.
///
/// `confirm` must be true; clearing is irreversible.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearRequest {
    #[serde(default)]
    pub confirm: bool,
}
